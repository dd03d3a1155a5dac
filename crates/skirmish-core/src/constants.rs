//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per tick (rounded down).
pub const FRAME_TIME_MS: u64 = 1000 / TICK_RATE as u64;

/// Seconds per tick.
pub const DT: f32 = FRAME_TIME_MS as f32 / 1000.0;

// --- Enemy memory ---

/// Upper bound of tracked enemy slots (reached at skill 1.0).
pub const MAX_TRACKED_ENEMIES: usize = 10;

/// Upper bound of attacker ledger entries.
pub const MAX_TRACKED_ATTACKERS: usize = 5;

/// Upper bound of target ledger entries.
pub const MAX_TRACKED_TARGETS: usize = 5;

/// Length of the per-enemy sighting history.
pub const MAX_TRACKED_POSITIONS: usize = 16;

/// An enemy not seen for this long is forgotten (ms).
pub const NOT_SEEN_TIMEOUT: u64 = 4000;

/// Attacker ledger entries decay after this long without activity (ms).
pub const ATTACKER_TIMEOUT: u64 = 3000;

/// Target ledger entries decay after this long without activity (ms).
pub const TARGET_TIMEOUT: u64 = 3000;

/// Minimal eviction score a slot must exceed to be replaced.
pub const MIN_EVICTION_SCORE: f32 = 0.001;

/// Distance difference at which the eviction distance factor saturates.
pub const EVICTION_MAX_DISTANCE_DIFF: f32 = 2500.0;

// --- Weighting ---

/// Upper clamp for enemy weights.
pub const MAX_ENEMY_WEIGHT: f32 = 5.0;

/// Damage difference that maps to one unit of weight.
pub const MAX_DAMAGE_TO_KILL: f32 = 350.0;

// --- Combat task arbitration ---

/// Distance until which the target choice distance factor grows linearly.
pub const TARGET_CHOICE_DISTANCE_BOUNDS: f32 = 3500.0;

/// A lost aim target may still be tracked by turning for this long (ms).
pub const LOST_ENEMY_TURN_WINDOW: u64 = 500;

/// Duration of a look-at turn toward a lost enemy (ms).
pub const LOOK_AT_TIMEOUT: u64 = 750;

/// Suppression fire stops after this long (ms).
pub const SPAM_TIMEOUT: u64 = 1200;

/// Delay before another fast weapon switch action is considered (ms).
pub const FAST_SWITCH_RECHECK: u64 = 500;

/// Fast weapon switch actions require the weapon to be nearly ready (ms).
pub const FAST_SWITCH_MAX_WEAPON_TIME: u32 = 64;

/// Shots of despair require the weapon to be even closer to ready (ms).
pub const DESPAIR_MAX_WEAPON_TIME: u32 = 16;

/// Refresh period of the cached weapon score random (ms).
pub const WEAPON_SCORE_RANDOM_PERIOD: u64 = 4000;

/// Refresh period of the cached decision random (ms).
pub const DECISION_RANDOM_PERIOD: u64 = 2500;

/// Weapon scores closer than this to the current weapon's score do not cause a switch.
pub const WEAPON_SWITCH_EPSILON: f32 = 0.1;

// --- Weapon & tactics advisor ---

/// Upper bound of the close range bracket.
pub const CLOSE_RANGE: f32 = 300.0;

/// Dash speed (units/s); faster motion counts as fast movement.
pub const DEFAULT_DASH_SPEED: f32 = 450.0;

/// Depth of environment probe traces.
pub const ENVIRONMENT_TRACE_DEPTH: f32 = 250.0;

/// Half extent of environment probe trace boxes.
pub const ENVIRONMENT_TRACE_BOX: f32 = 32.0;

// --- Skill thresholds ---

/// Bots below this skill use the legacy weapon table and never spam or fast-switch.
pub const SKILL_EASY: f32 = 0.33;

/// Bots below this skill may randomly forget stronger enemies.
pub const SKILL_FORGETFUL: f32 = 0.66;

// --- Arena ---

/// Bounding box half extents of a combatant.
pub const PLAYER_HALF_EXTENTS: [f32; 3] = [16.0, 16.0, 28.0];

/// Eye height above the origin.
pub const PLAYER_VIEW_HEIGHT: f32 = 22.0;

/// Starting and maximum health.
pub const PLAYER_MAX_HEALTH: f32 = 100.0;

/// Ground run speed (units/s).
pub const PLAYER_RUN_SPEED: f32 = 320.0;

/// Default delay between elimination and respawn (ms).
pub const RESPAWN_DELAY_MS: u64 = 3000;
