/// Simulation, host and dock tuning constants.
///
/// These constants express intended behavior (e.g., rates, clamp limits,
/// timeouts) and keep magic numbers out of the code.

// Quality budgets (particles) for low / medium / high
pub const QUALITY_BUDGET_LOW: usize = 350;
pub const QUALITY_BUDGET_MEDIUM: usize = 650;
pub const QUALITY_BUDGET_HIGH: usize = 1100;

// Population scaling
pub const REFERENCE_RADIUS_PX: f32 = 80.0; // radius at which the full budget applies
pub const CAP_RADIUS_SCALE_MIN: f32 = 0.35;
pub const CAP_RADIUS_SCALE_MAX: f32 = 1.5;
pub const CAP_MIN: usize = 48;
pub const FLOOR_FRACTION: f32 = 0.55; // floor = cap * fraction
pub const SPAWN_BATCH_DIVISOR: usize = 40; // batch = cap / divisor
pub const SPAWN_BATCH_MIN: usize = 4;
pub const SPARKLE_BURST_FACTOR: f32 = 1.8;

// Particle spawn ranges
pub const LIFE_MIN_SEC: f32 = 2.2;
pub const LIFE_MAX_SEC: f32 = 5.5;
pub const SIZE_MIN_FRACTION: f32 = 0.008; // of radius
pub const SIZE_MAX_FRACTION: f32 = 0.022;
pub const HUE_OFFSET_SPAN_DEG: f32 = 24.0;
pub const SPAWN_RADIUS_FRACTION: f32 = 0.85;
pub const SPAWN_SPEED_FRACTION: f32 = 0.05; // of radius per second

// Flow field
pub const NOISE_SCALE_DEFAULT: f32 = 0.6;
pub const NOISE_SCALE_THINKING: f32 = 0.9;
pub const NOISE_DRIFT_X: f32 = 0.05;
pub const NOISE_DRIFT_Y: f32 = 0.03;
pub const SWIRL_DEFAULT: f32 = 0.2;
pub const SWIRL_LISTENING: f32 = 0.4;
pub const SWIRL_SPEAKING: f32 = 0.6;
pub const NOISE_ROTATION_GAIN: f32 = 0.12; // radians per unit of noise·swirl

// Integration
pub const FLOW_BASE: f32 = 0.4;
pub const FLOW_ENERGY_GAIN: f32 = 0.9;
pub const FLOW_SPEAKING_BONUS: f32 = 0.7;
pub const SPEED_JITTER_MIN: f32 = 0.85;
pub const SPEED_JITTER_MAX: f32 = 1.15;
pub const SPEED_RADIUS_FRACTION: f32 = 0.35; // of radius per second at flow 1
pub const STEER_RATE_PER_SEC: f32 = 3.0;
pub const VELOCITY_DAMPING: f32 = 0.94; // applied every tick
pub const CONTAINMENT_FRACTION: f32 = 0.98;
pub const RESTORE_STRENGTH: f32 = 4.0; // impulse per px of overshoot
pub const CULL_RADIUS_FRACTION: f32 = 1.2;
pub const SPARKLE_DECAY_PER_SEC: f32 = 0.45;
pub const SPARKLE_SIZE_BOOST: f32 = 0.6;
pub const GLOBAL_ROT_PER_SEC: f32 = 0.07;

// Colour
pub const ALPHA_SCALE: f32 = 0.9;
pub const BASE_SATURATION: f32 = 85.0;
pub const BASE_LIGHTNESS: f32 = 65.0;
pub const HUE_STEP_PER_FRAME_DEG: f32 = 0.08;
pub const TINT_PERTURB_EVERY_FRAMES: u32 = 420;
pub const SATURATION_JITTER: f32 = 7.0;
pub const LIGHTNESS_JITTER: f32 = 6.0;
pub const PALETTE_BASE_HUES: [f32; 4] = [205.0, 265.0, 165.0, 320.0];

// Controller
pub const ENERGY_BASELINE: f32 = 0.3;
pub const PULSE_ENERGY_BASE: f32 = 0.25;
pub const PULSE_ENERGY_GAIN: f32 = 0.5;
pub const PULSE_REVERT_MS: u64 = 380;
pub const DEFAULT_SPARKLE_COUNT: usize = 24;

// Host
pub const DPR_MAX: f32 = 2.0;
pub const ORB_RADIUS_FRACTION: f32 = 0.42; // of logical size
pub const FRAME_DT_MIN: f32 = 0.016;
pub const FRAME_DT_MAX: f32 = 0.033;
pub const TRAIL_FADE_ALPHA: f32 = 0.10;

// Dock autoplay
pub const AUTOPLAY_PULSE_PERIOD_SEC: f32 = 0.9;
pub const AUTOPLAY_SPARKLE_PERIOD_SEC: f32 = 1.2;
pub const AUTOPLAY_SPARKLE_COUNT: usize = 12;
pub const AUTOPLAY_FRONT_BASE: f32 = 0.28;
pub const AUTOPLAY_FRONT_SPAN: f32 = 0.14;
pub const AUTOPLAY_FRONT_RATE: f32 = 1.7;
pub const AUTOPLAY_BACK_BASE: f32 = 0.16;
pub const AUTOPLAY_BACK_SPAN: f32 = 0.08;
pub const AUTOPLAY_BACK_RATE: f32 = 1.1;
pub const AUTOPLAY_BACK_PHASE: f32 = 0.8;

// Event bus
pub const ORB_EVENT_NAME: &str = "echo:orb";
