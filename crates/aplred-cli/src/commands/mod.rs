pub mod info;
pub mod measure;
pub mod preview;
pub mod run;

use aplred_core::strategy::Strategy;
use clap::{Args, ValueEnum};

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Highlight,
    Border,
    Zone,
}

/// Strategy selection flags shared by `run` and `preview`.
#[derive(Args)]
pub struct StrategyOpts {
    /// APL reduction strategy
    #[arg(long, value_enum, default_value = "highlight")]
    pub strategy: StrategyArg,

    /// Target APL percentage (zone strategy)
    #[arg(long, default_value = "25")]
    pub target_apl: f64,

    /// Highlight threshold as a percentage of the 8-bit range
    #[arg(long, default_value = "90")]
    pub threshold: f32,

    /// Highlight compression factor (1.0 = no change, 0.0 = hard clamp)
    #[arg(long, default_value = "0.7")]
    pub compression: f32,

    /// Border width as a percentage of each frame dimension
    #[arg(long, default_value = "5")]
    pub border_pct: f32,

    /// Brightness multiplier at the outermost border edge
    #[arg(long, default_value = "0.85")]
    pub darkening: f32,

    /// Zone edge length in pixels
    #[arg(long, default_value = "64")]
    pub zone_size: usize,
}

impl StrategyOpts {
    pub fn to_strategy(&self) -> Strategy {
        match self.strategy {
            StrategyArg::Highlight => Strategy::Highlight {
                threshold_pct: self.threshold,
                compression: self.compression,
            },
            StrategyArg::Border => Strategy::Border {
                border_pct: self.border_pct,
                darkening: self.darkening,
            },
            StrategyArg::Zone => Strategy::Zone {
                target_apl: self.target_apl,
                zone_size: self.zone_size,
            },
        }
    }
}
