/// DOM identifiers and presentation defaults used by the web frontend.
///
/// Simulation tuning lives in `orb_core::constants`; only browser-facing names
/// are kept here.

// Portal canvases created by the dock
pub const BACK_CANVAS_ID: &str = "echo-orb-back";
pub const FRONT_CANVAS_ID: &str = "echo-orb-front";
pub const ORB_CANVAS_CLASS: &str = "echo-orb";

// Fallback when the browser does not report a device pixel ratio
pub const FALLBACK_DPR: f64 = 1.0;

// Defaults for the exported controller methods
pub const DEFAULT_PULSE_INTENSITY: f32 = 1.0;
pub const DEFAULT_SPARKLE: u32 = 24;
