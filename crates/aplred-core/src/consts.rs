/// ITU-R BT.709 luminance coefficient for the red channel.
pub const LUMA_R: f64 = 0.2126;

/// ITU-R BT.709 luminance coefficient for the green channel.
pub const LUMA_G: f64 = 0.7152;

/// ITU-R BT.709 luminance coefficient for the blue channel.
pub const LUMA_B: f64 = 0.0722;

/// Maximum 8-bit sample value, as a float for APL normalization.
pub const SAMPLE_MAX: f64 = 255.0;

/// Per-pass multiplier applied to a zone's samples during convergence.
/// Each darkening pass removes 5% of the zone's brightness.
pub const ZONE_REDUCTION_FACTOR: f32 = 0.95;

/// Maximum number of darkening rounds per frame. Exhausting the budget is a
/// soft shortfall: the partially darkened frame is still emitted.
pub const MAX_CONVERGENCE_ROUNDS: usize = 50;

/// A zone is only darkened while its own APL exceeds this fraction of the
/// target; zones already dim are left alone to avoid flattening.
pub const BRIGHT_ZONE_GATE_FRACTION: f64 = 0.5;

/// Number of frames decoded and transformed simultaneously by the pipeline.
/// Bounds in-flight memory while still feeding all Rayon workers.
pub const FRAME_BATCH_SIZE: usize = 8;

/// Default target APL percentage for the zone strategy.
pub const DEFAULT_TARGET_APL: f64 = 25.0;

/// Default highlight threshold, as a percentage of the 8-bit range.
pub const DEFAULT_HIGHLIGHT_THRESHOLD_PCT: f32 = 90.0;

/// Default highlight compression factor (1.0 = no change, 0.0 = hard clamp).
pub const DEFAULT_HIGHLIGHT_COMPRESSION: f32 = 0.7;

/// Default border width, as a percentage of each frame dimension.
pub const DEFAULT_BORDER_PCT: f32 = 5.0;

/// Default brightness multiplier at the outermost border edge.
pub const DEFAULT_BORDER_DARKENING: f32 = 0.85;

/// Default zone edge length in pixels.
pub const DEFAULT_ZONE_SIZE: usize = 64;

/// Default number of frames between progress log lines.
pub const DEFAULT_REPORT_INTERVAL: usize = 100;
