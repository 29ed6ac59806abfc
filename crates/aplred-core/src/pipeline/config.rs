use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_REPORT_INTERVAL;
use crate::strategy::Strategy;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub strategy: Strategy,
    /// Emit a progress log line every this many frames (0 disables).
    #[serde(default = "default_report_interval")]
    pub report_interval: usize,
}

fn default_report_interval() -> usize {
    DEFAULT_REPORT_INTERVAL
}
