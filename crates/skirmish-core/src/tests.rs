#[cfg(test)]
mod tests {
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::MatchEvent;
    use crate::state::{ArenaSnapshot, BotTaskView, CombatantView};
    use crate::types::*;
    use crate::weapons::{laser_range, weapon_def, Inventory, Loadout};

    #[test]
    fn test_entity_handle_bits() {
        let h = EntityHandle::new(42, 7);
        assert_eq!(h.index(), 42);
        assert_eq!(h.generation(), 7);
        assert_eq!(h.0, (7u64 << 32) | 42);
        assert_eq!(h.to_string(), "#42v7");
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..TICK_RATE {
            t.advance();
        }
        assert_eq!(t.tick, TICK_RATE as u64);
        assert_eq!(t.now_ms, FRAME_TIME_MS * TICK_RATE as u64);
    }

    #[test]
    fn test_bounded_fraction() {
        assert_eq!(bounded_fraction(-5.0, 10.0), 0.0);
        assert_eq!(bounded_fraction(5.0, 10.0), 0.5);
        assert_eq!(bounded_fraction(50.0, 10.0), 1.0);
        assert_eq!(bounded_fraction(3.0, 0.0), 1.0);
    }

    #[test]
    fn test_view_axes_orthonormal() {
        let axes = ViewAxes::from_look_dir(Vec3::new(1.0, 1.0, 0.0));
        assert!((axes.forward.length() - 1.0).abs() < 1e-5);
        assert!((axes.right.length() - 1.0).abs() < 1e-5);
        assert!((axes.up.length() - 1.0).abs() < 1e-5);
        assert!(axes.forward.dot(axes.right).abs() < 1e-5);
        assert!(axes.forward.dot(axes.up).abs() < 1e-5);
        // Looking along +X, right points to -Y and up to +Z.
        let axes = ViewAxes::from_look_dir(Vec3::X);
        assert!((axes.right - Vec3::NEG_Y).length() < 1e-5);
        assert!((axes.up - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_view_axes_vertical_look() {
        let axes = ViewAxes::from_look_dir(Vec3::Z);
        assert_eq!(axes.right, Vec3::NEG_Y);
        assert!(axes.up.is_finite());
    }

    #[test]
    fn test_weapon_table() {
        assert_eq!(laser_range(), 700.0);
        for w in Weapon::ALL {
            let def = weapon_def(w);
            assert!(def.range > 0.0, "{} has no range", def.name);
            assert!(def.refire_ms > 0);
            assert_eq!(w.name(), def.name);
        }
        assert!(weapon_def(Weapon::RocketLauncher).splash);
        assert!(!weapon_def(Weapon::Electrobolt).splash);
        assert_eq!(Weapon::ALL[Weapon::Lasergun.index()], Weapon::Lasergun);
    }

    #[test]
    fn test_legacy_range_classes() {
        assert_eq!(LegacyRange::classify(0.0), LegacyRange::Melee);
        assert_eq!(LegacyRange::classify(300.0), LegacyRange::Short);
        assert_eq!(LegacyRange::classify(700.0), LegacyRange::Medium);
        assert_eq!(LegacyRange::classify(2000.0), LegacyRange::Long);
    }

    #[test]
    fn test_loadout_gunblade_always_usable() {
        let mut loadout = Loadout::melee_only();
        assert!(loadout.has_weapon(Weapon::Gunblade));
        assert!(loadout.can_fire(Weapon::Gunblade));
        assert!(loadout.only_melee());
        loadout.remove(Weapon::Gunblade);
        assert!(loadout.has_weapon(Weapon::Gunblade));
        assert!(loadout.consume(Weapon::Gunblade));
    }

    #[test]
    fn test_loadout_ammo_capped_and_consumed() {
        let mut loadout = Loadout::default();
        loadout.give(Weapon::RocketLauncher, 500);
        assert_eq!(loadout.ammo(Weapon::RocketLauncher), 20);
        assert!(!loadout.only_melee());

        loadout.set_ammo(Weapon::RocketLauncher, 1);
        assert!(loadout.consume(Weapon::RocketLauncher));
        assert!(!loadout.consume(Weapon::RocketLauncher));
        assert!(!loadout.can_fire(Weapon::RocketLauncher));

        // Ammo without the weapon is not ready to fire.
        loadout.add_ammo(Weapon::Electrobolt, 5);
        assert_eq!(loadout.ammo(Weapon::Electrobolt), 5);
        assert_eq!(loadout.ready_to_fire(Weapon::Electrobolt), 0);
    }

    #[test]
    fn test_full_loadout_excludes_instagun() {
        let loadout = Loadout::full();
        assert!(loadout.has_weapon(Weapon::Electrobolt));
        assert!(!loadout.has_weapon(Weapon::Instagun));
        assert_eq!(loadout.ammo(Weapon::Lasergun), 150);
    }

    #[test]
    fn test_weapon_option_serde() {
        let none: Option<Weapon> = None;
        let json = serde_json::to_string(&none).unwrap();
        assert_eq!(json, "null");
        let back: Option<Weapon> = serde_json::from_str("\"Plasmagun\"").unwrap();
        assert_eq!(back, Some(Weapon::Plasmagun));
    }

    #[test]
    fn test_snapshot_serde() {
        let handle = EntityHandle::new(3, 1);
        let snap = ArenaSnapshot {
            time: SimTime { tick: 5, now_ms: 80 },
            phase: MatchPhase::Playtime,
            combatants: vec![CombatantView {
                handle,
                name: "bot-0".into(),
                team: 0,
                origin: Vec3::new(1.0, 2.0, 3.0),
                velocity: Vec3::ZERO,
                health: 100.0,
                armor: 0.0,
                weapon: Some(Weapon::Gunblade),
                frags: 0,
                deaths: 0,
                ghosting: false,
                bot: Some(BotTaskView {
                    mode: TaskMode::Aiming,
                    opponent: Some(EntityHandle::new(4, 0)),
                    ..Default::default()
                }),
            }],
            events: vec![MatchEvent::Respawned { entity: handle }],
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: ArenaSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.time.tick, 5);
        assert_eq!(back.phase, MatchPhase::Playtime);
        let view = back.combatant(handle).unwrap();
        assert_eq!(view.origin, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(view.bot.as_ref().unwrap().mode, TaskMode::Aiming);
        assert_eq!(back.events.len(), 1);
    }
}
