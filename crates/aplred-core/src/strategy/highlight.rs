use crate::frame::Frame;

/// Compress channel samples above a brightness threshold.
///
/// `threshold_pct` is a percentage of the 8-bit range. Samples above the
/// threshold are remapped to `threshold + (v - threshold) * compression`,
/// so `compression = 1.0` is the identity and `compression = 0.0` clamps
/// everything above the threshold to the threshold itself. Each channel is
/// compressed independently; saturation near highlights shifts slightly,
/// which keeps the transform a pure per-sample map.
pub fn compress_highlights(frame: &Frame, threshold_pct: f32, compression: f32) -> Frame {
    let threshold = 255.0 * threshold_pct / 100.0;
    let data = frame.data.mapv(|v| {
        let v = v as f32;
        let out = if v > threshold {
            threshold + (v - threshold) * compression
        } else {
            v
        };
        out.clamp(0.0, 255.0) as u8
    });
    frame.with_data(data)
}
