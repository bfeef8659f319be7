//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest wall-clock sample the fixed-timestep driver may accumulate
/// from a single frame, to avoid a runaway catch-up spiral.
pub const MAX_FRAME_SECS: f64 = 0.25;

// --- Orb ---

/// Physical radius of the orb (world units).
pub const ORB_RADIUS: f64 = 20.0;

/// Maximum (and starting) health.
pub const ORB_MAX_HEALTH: i32 = 100;

/// Invincibility window after taking damage (seconds).
pub const INVINCIBILITY_SECS: f64 = 1.5;

/// Travel speed while a dash is in progress (units per second).
pub const DASH_SPEED: f64 = 800.0;

/// Orb pulse animation rate (radians per second).
pub const ORB_PULSE_RATE: f64 = 4.0;

/// Orb trail animation rate (radians per second).
pub const ORB_TRAIL_RATE: f64 = 2.0;

// --- Base ability set ---

/// Base movement speed (units per second).
pub const BASE_SPEED: f64 = 200.0;

/// Base essence absorption range (units).
pub const BASE_ABSORPTION_RANGE: f64 = 30.0;

/// Base damage mitigation (percent).
pub const BASE_MITIGATION_PCT: f64 = 0.0;

/// Base score multiplier.
pub const BASE_SCORE_MULTIPLIER: f64 = 1.0;

/// Base magnet strength (units per second of pull; 0 = no magnet).
pub const BASE_MAGNET_STRENGTH: f64 = 0.0;

// --- Ability layer combination rules ---

/// Speed boost layer: multiplies speed.
pub const SPEED_BOOST_FACTOR: f64 = 1.5;

/// Shield layer: adds damage mitigation (percentage points).
pub const SHIELD_MITIGATION_ADD: f64 = 50.0;

/// Total damage mitigation is capped here regardless of stacking.
pub const MITIGATION_CAP_PCT: f64 = 90.0;

/// Magnet layer: adds pull strength (stacks additively).
pub const MAGNET_STRENGTH_ADD: f64 = 150.0;

/// Magnet layer: also widens absorption range by this factor.
pub const MAGNET_RANGE_FACTOR: f64 = 1.5;

/// Score multiplier layer: multiplies the running multiplier.
pub const SCORE_MULTIPLIER_FACTOR: f64 = 2.0;

/// Range boost layer: multiplies absorption range.
pub const RANGE_BOOST_FACTOR: f64 = 2.0;

/// Essences inside this radius are pulled by an active magnet (units).
pub const MAGNET_PULL_RADIUS: f64 = 150.0;

// --- Game objects ---

/// Essence particle radius (units).
pub const ESSENCE_RADIUS: f64 = 12.0;

/// Essence pulse animation rate (radians per second).
pub const ESSENCE_PULSE_RATE: f64 = 3.0;

/// Essence float animation rate (radians per second).
pub const ESSENCE_FLOAT_RATE: f64 = 2.0;

/// Buff pickup radius (units).
pub const BUFF_RADIUS: f64 = 18.0;

/// Buff spin rate (degrees per second).
pub const BUFF_SPIN_RATE_DEG: f64 = 60.0;

/// Buff pulse animation rate (radians per second).
pub const BUFF_PULSE_RATE: f64 = 4.0;

/// Buff float animation rate (radians per second).
pub const BUFF_FLOAT_RATE: f64 = 2.0;

/// Default patrol speed for patrol hazards (units per second).
pub const HAZARD_PATROL_SPEED: f64 = 100.0;

/// Default rotation speed for rotating hazards (degrees per second).
pub const HAZARD_ROTATION_SPEED_DEG: f64 = 90.0;

/// Pulse phase rate for pulsing hazards (radians per second).
pub const HAZARD_PULSE_RATE: f64 = 2.0;

/// Pulsing hazards swell to (1 + amplitude) times their base extent.
pub const HAZARD_PULSE_AMPLITUDE: f64 = 0.3;

// --- Elemental states ---

/// Fire: special ability cooldown (seconds).
pub const FIRE_COOLDOWN_SECS: f64 = 5.0;

/// Fire burst: speed factor applied for its duration.
pub const FIRE_BURST_FACTOR: f64 = 2.0;

/// Fire burst duration (seconds).
pub const FIRE_BURST_SECS: f64 = 2.0;

/// Water: special ability cooldown (seconds).
pub const WATER_COOLDOWN_SECS: f64 = 8.0;

/// Water flow: phase-through-hazards duration (seconds).
pub const WATER_PHASE_SECS: f64 = 3.0;

/// Earth: special ability cooldown (seconds).
pub const EARTH_COOLDOWN_SECS: f64 = 10.0;

/// Earth bulwark: full damage immunity duration (seconds).
pub const EARTH_SHIELD_SECS: f64 = 4.0;

/// Air: special ability cooldown (seconds).
pub const AIR_COOLDOWN_SECS: f64 = 3.0;

/// Air dash: distance covered (units).
pub const AIR_DASH_DISTANCE: f64 = 200.0;

// --- Event bus ---

/// Number of recent events retained for debugging.
pub const EVENT_HISTORY_MAX: usize = 100;
