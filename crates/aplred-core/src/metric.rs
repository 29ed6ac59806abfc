use ndarray::ArrayView3;

use crate::consts::{LUMA_B, LUMA_G, LUMA_R, SAMPLE_MAX};
use crate::frame::Frame;

/// Average Picture Level of a frame, as a percentage in [0, 100].
///
/// For 3-channel frames the per-pixel luminance uses BT.709 weights;
/// for single-channel frames the sample value is the luminance.
pub fn apl(frame: &Frame) -> f64 {
    apl_of(frame.data.view())
}

/// APL over an arbitrary region view. Same semantics as [`apl`]; used for
/// whole frames and for zone sub-regions alike.
pub fn apl_of<T>(view: ArrayView3<'_, T>) -> f64
where
    T: Copy + Into<f64>,
{
    let (h, w, _) = view.dim();
    let pixels = h * w;
    if pixels == 0 {
        return 0.0;
    }
    luminance_sum(view) / pixels as f64 / SAMPLE_MAX * 100.0
}

/// Weighted luminance summed over a region, in sample units (0..=255 per
/// pixel). Kept separate from [`apl_of`] so the zone convergence loop can
/// maintain a running sum instead of rescanning the frame.
pub(crate) fn luminance_sum<T>(view: ArrayView3<'_, T>) -> f64
where
    T: Copy + Into<f64>,
{
    let (h, w, c) = view.dim();
    let mut sum = 0.0f64;
    if c == 3 {
        for y in 0..h {
            for x in 0..w {
                sum += LUMA_R * view[[y, x, 0]].into()
                    + LUMA_G * view[[y, x, 1]].into()
                    + LUMA_B * view[[y, x, 2]].into();
            }
        }
    } else {
        for y in 0..h {
            for x in 0..w {
                sum += view[[y, x, 0]].into();
            }
        }
    }
    sum
}
