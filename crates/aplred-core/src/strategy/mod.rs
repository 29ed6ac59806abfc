pub mod border;
pub mod highlight;
pub mod zone;

use serde::{Deserialize, Serialize};

use crate::error::{AplError, Result};
use crate::frame::Frame;

/// APL mitigation strategy together with its parameters.
///
/// Every strategy is a pure per-frame function: same-shape frame out, no
/// cross-frame state. Parameters are validated once at the configuration
/// boundary via [`Strategy::validate`]; the numeric transforms themselves
/// accept anything and clamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Compress channel samples above a brightness threshold.
    Highlight { threshold_pct: f32, compression: f32 },
    /// Darken frame borders with a vignette-like falloff.
    Border { border_pct: f32, darkening: f32 },
    /// Iteratively darken bright, low-saliency zones toward a target APL.
    Zone { target_apl: f64, zone_size: usize },
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Highlight { .. } => "highlight",
            Self::Border { .. } => "border",
            Self::Zone { .. } => "zone",
        }
    }

    /// Check every parameter against its documented domain.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Highlight {
                threshold_pct,
                compression,
            } => {
                check_range("threshold_pct", threshold_pct as f64, 0.0, 100.0)?;
                check_range("compression", compression as f64, 0.0, 1.0)?;
            }
            Self::Border {
                border_pct,
                darkening,
            } => {
                check_range("border_pct", border_pct as f64, 0.0, 100.0)?;
                check_range("darkening", darkening as f64, 0.0, 1.0)?;
            }
            Self::Zone {
                target_apl,
                zone_size,
            } => {
                check_range("target_apl", target_apl, 0.0, 100.0)?;
                if zone_size == 0 {
                    return Err(AplError::Config("zone_size must be at least 1".into()));
                }
            }
        }
        Ok(())
    }

    /// Apply this strategy to one frame, returning a new frame of identical
    /// dimensions and channel depth.
    pub fn apply(&self, frame: &Frame) -> Frame {
        match *self {
            Self::Highlight {
                threshold_pct,
                compression,
            } => highlight::compress_highlights(frame, threshold_pct, compression),
            Self::Border {
                border_pct,
                darkening,
            } => border::darken_borders(frame, border_pct, darkening),
            Self::Zone {
                target_apl,
                zone_size,
            } => zone::darken_zones(frame, target_apl, zone_size),
        }
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(AplError::Config(format!(
            "{name} must be in [{min}, {max}], got {value}"
        )));
    }
    Ok(())
}
