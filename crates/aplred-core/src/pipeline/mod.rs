pub mod config;
pub mod runner;
pub mod types;

pub use config::PipelineConfig;
pub use runner::{run_pipeline, run_pipeline_reported, CancelToken};
pub use types::{FrameReport, ProgressReporter, RunSummary};
