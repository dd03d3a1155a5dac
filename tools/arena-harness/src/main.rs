//! arena-harness: run a seeded bot-versus-bot match and log a summary.
//!
//! Usage:
//!   arena-harness --bots 4 --ticks 3600 --seed 7
//!   arena-harness --config match.json --log skirmish_brain=debug

use std::path::PathBuf;
use std::process;

use skirmish_core::enums::TaskMode;
use skirmish_core::events::MatchEvent;
use skirmish_geometry::LAYOUT_NAMES;
use skirmish_sim::{ArenaEngine, SimConfig};
use tracing::info;

const DEFAULT_TICKS: u64 = 60 * 60;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "help" || a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    init_logging(parse_value(&args, "--log").as_deref());

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage();
            process::exit(1);
        }
    };
    let ticks = match parse_number(&args, "--ticks", DEFAULT_TICKS) {
        Ok(ticks) => ticks,
        Err(message) => {
            eprintln!("Error: {message}");
            process::exit(1);
        }
    };

    let mut engine = match ArenaEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error creating match: {e}");
            process::exit(1);
        }
    };

    run_match(&mut engine, ticks);
}

fn print_usage() {
    eprintln!(
        "arena-harness: SKIRMISH headless match runner\n\
         \n\
         Options:\n\
         \n\
           --config <path>   JSON match config (fields not given keep their defaults)\n\
           --bots <N>        Number of bots\n\
           --skill <S>       Skill of every bot, 0..1\n\
           --layout <name>   Arena layout ({})\n\
           --seed <N>        RNG seed\n\
           --ticks <N>       Ticks to simulate (default: {DEFAULT_TICKS})\n\
           --log <filter>    Log filter, e.g. info or skirmish_brain=debug (default: RUST_LOG or info)\n\
         \n\
         Examples:\n\
         \n\
           arena-harness --bots 4 --ticks 3600 --seed 7\n\
           arena-harness --config match.json --log skirmish_brain=debug\n",
        LAYOUT_NAMES.join(", ")
    );
}

fn init_logging(filter: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_value(args: &[String], flag: &str) -> Option<String> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> Result<T, String> {
    match parse_value(args, flag) {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("{flag} expects a number, got {raw}")),
        None => Ok(default),
    }
}

/// Config file first, then command-line overrides.
fn build_config(args: &[String]) -> Result<SimConfig, String> {
    let mut config = match parse_value(args, "--config") {
        Some(path) => {
            let path = PathBuf::from(path);
            let json = std::fs::read_to_string(&path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            SimConfig::from_json(&json).map_err(|e| e.to_string())?
        }
        None => SimConfig::default(),
    };

    config.bots = parse_number(args, "--bots", config.bots)?;
    config.seed = parse_number(args, "--seed", config.seed)?;
    if let Some(layout) = parse_value(args, "--layout") {
        config.layout = layout;
    }
    if parse_value(args, "--skill").is_some() {
        config.skills = vec![parse_number(args, "--skill", 0.5_f32)?];
    }
    Ok(config)
}

#[derive(Default)]
struct MatchTally {
    hits: usize,
    damage: f32,
    eliminations: usize,
    weapon_switches: usize,
    aiming_ticks: u64,
    suppressing_ticks: u64,
}

fn run_match(engine: &mut ArenaEngine, ticks: u64) {
    let mut tally = MatchTally::default();
    let mut last = None;

    for _ in 0..ticks {
        let snapshot = engine.tick();
        for event in &snapshot.events {
            match event {
                MatchEvent::Hit(hit) => {
                    tally.hits += 1;
                    tally.damage += hit.amount;
                }
                MatchEvent::Eliminated { .. } => tally.eliminations += 1,
                MatchEvent::WeaponSwitched { .. } => tally.weapon_switches += 1,
                _ => {}
            }
        }
        for bot in snapshot.combatants.iter().filter_map(|c| c.bot.as_ref()) {
            match bot.mode {
                TaskMode::Aiming => tally.aiming_ticks += 1,
                TaskMode::Suppressing => tally.suppressing_ticks += 1,
                TaskMode::Idle => {}
            }
        }
        last = Some(snapshot);
    }

    info!(
        layout = %engine.geometry().name,
        seed = engine.config().seed,
        ticks,
        sim_ms = engine.time().now_ms,
        phase = ?engine.phase(),
        hits = tally.hits,
        damage = tally.damage,
        eliminations = tally.eliminations,
        weapon_switches = tally.weapon_switches,
        aiming_ticks = tally.aiming_ticks,
        suppressing_ticks = tally.suppressing_ticks,
        "match finished"
    );

    let Some(snapshot) = last else {
        return;
    };
    let mut standings = snapshot.combatants;
    standings.sort_by(|a, b| b.frags.cmp(&a.frags).then(a.deaths.cmp(&b.deaths)));
    for (place, combatant) in standings.iter().enumerate() {
        let tracked = combatant.bot.as_ref().map_or(0, |b| b.tracked_opponents);
        info!(
            place = place + 1,
            name = %combatant.name,
            handle = %combatant.handle,
            frags = combatant.frags,
            deaths = combatant.deaths,
            tracked,
            "standing"
        );
    }
}
