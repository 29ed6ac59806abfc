use ndarray::s;
use rayon::prelude::*;
use tracing::debug;

use crate::consts::{
    BRIGHT_ZONE_GATE_FRACTION, MAX_CONVERGENCE_ROUNDS, SAMPLE_MAX, ZONE_REDUCTION_FACTOR,
};
use crate::frame::Frame;
use crate::metric::{apl, apl_of, luminance_sum};

/// Half-open pixel bounds of a zone within a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneBounds {
    pub y0: usize,
    pub y1: usize,
    pub x0: usize,
    pub x1: usize,
}

/// One tile of the zone grid, scored by brightness and visual importance.
#[derive(Clone, Debug)]
pub struct Zone {
    pub bounds: ZoneBounds,
    /// APL over this zone's own pixels.
    pub apl: f64,
    /// Center-distance saliency: near 1.0 at the frame center, lower toward
    /// the periphery. Unclamped ordering key, not a probability.
    pub saliency: f64,
}

/// Tile the frame into `zone_size`-square zones, the last zone in each
/// row/column clipped to the frame edge, and score every zone. Scoring is
/// independent per zone and runs in parallel.
pub fn partition_zones(frame: &Frame, zone_size: usize) -> Vec<Zone> {
    let zone_size = zone_size.max(1);
    let (h, w, _) = frame.data.dim();

    let mut bounds = Vec::new();
    let mut y = 0;
    while y < h {
        let mut x = 0;
        while x < w {
            bounds.push(ZoneBounds {
                y0: y,
                y1: (y + zone_size).min(h),
                x0: x,
                x1: (x + zone_size).min(w),
            });
            x += zone_size;
        }
        y += zone_size;
    }

    bounds
        .par_iter()
        .map(|b| {
            let view = frame.data.slice(s![b.y0..b.y1, b.x0..b.x1, ..]);
            // Saliency uses the nominal zone center, even for clipped edge
            // zones, normalized by the frame dimensions.
            let dy = (b.y0 + zone_size / 2) as f64 - (h / 2) as f64;
            let dx = (b.x0 + zone_size / 2) as f64 - (w / 2) as f64;
            let dist = ((dy / h as f64).powi(2) + (dx / w as f64).powi(2)).sqrt();
            Zone {
                bounds: *b,
                apl: apl_of(view),
                saliency: 1.0 - dist,
            }
        })
        .collect()
}

/// Darken the brightest, least-salient zones until the frame's global APL
/// drops to `target_apl`, within a fixed round budget.
///
/// Zones are scanned in ascending saliency order (periphery first). A zone
/// is only touched while its own APL exceeds half the target; each pass
/// multiplies the zone's samples by [`ZONE_REDUCTION_FACTOR`]. The global
/// APL is tracked as a running luminance sum, updated as each zone darkens,
/// so later zones in the same round observe the edit immediately. No sample
/// ever increases.
pub fn darken_zones(frame: &Frame, target_apl: f64, zone_size: usize) -> Frame {
    if apl(frame) <= target_apl {
        return frame.clone();
    }

    let (h, w, _) = frame.data.dim();
    let pixels = (h * w) as f64;

    let mut zones = partition_zones(frame, zone_size);
    zones.sort_by(|a, b| a.saliency.total_cmp(&b.saliency));

    // f32 working copy: repeated 5% passes accumulate without re-quantizing
    // after every round.
    let mut work = frame.data.mapv(|v| v as f32);
    let mut lum_sum = luminance_sum(work.view());
    let to_apl = |sum: f64| sum / pixels / SAMPLE_MAX * 100.0;

    let mut rounds = 0usize;
    while rounds < MAX_CONVERGENCE_ROUNDS && to_apl(lum_sum) > target_apl {
        rounds += 1;
        for zone in &zones {
            if to_apl(lum_sum) <= target_apl {
                break;
            }
            let b = &zone.bounds;
            let zone_pixels = ((b.y1 - b.y0) * (b.x1 - b.x0)) as f64;
            let zone_sum = luminance_sum(work.slice(s![b.y0..b.y1, b.x0..b.x1, ..]));
            let zone_apl = zone_sum / zone_pixels / SAMPLE_MAX * 100.0;
            if zone_apl > target_apl * BRIGHT_ZONE_GATE_FRACTION {
                work.slice_mut(s![b.y0..b.y1, b.x0..b.x1, ..])
                    .mapv_inplace(|v| v * ZONE_REDUCTION_FACTOR);
                lum_sum -= zone_sum * (1.0 - ZONE_REDUCTION_FACTOR as f64);
            }
        }
    }

    let achieved = to_apl(lum_sum);
    if achieved > target_apl {
        debug!(
            rounds,
            achieved_apl = achieved,
            target_apl,
            "round budget exhausted short of target"
        );
    }

    // Truncating quantization keeps the emitted APL at or below the
    // converged estimate.
    frame.with_data(work.mapv(|v| v.clamp(0.0, SAMPLE_MAX as f32) as u8))
}
