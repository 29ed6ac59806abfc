use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use aplred_core::pipeline::{
    run_pipeline_reported, CancelToken, FrameReport, PipelineConfig, ProgressReporter, RunSummary,
};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use super::StrategyOpts;
use crate::summary;

#[derive(Args)]
pub struct RunArgs {
    /// Input SER file
    pub file: PathBuf,

    /// Pipeline config file (TOML); overrides the strategy flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub strategy: StrategyOpts,

    /// Frames between progress log lines (0 disables)
    #[arg(long, default_value = "100")]
    pub report_interval: usize,

    /// Output SER file path
    #[arg(short, long, default_value = "result.ser")]
    pub output: PathBuf,
}

struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin(&self, total_frames: usize) {
        self.pb.set_length(total_frames as u64);
    }

    fn frame_done(&self, report: &FrameReport) {
        self.pb.set_position((report.frame_index + 1) as u64);
        self.pb.set_message(format!(
            "APL {:.1}% -> {:.1}%",
            report.apl_before, report.apl_after
        ));
    }

    fn finish(&self, _summary: &RunSummary) {
        self.pb.finish_and_clear();
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid pipeline config")?
    } else {
        PipelineConfig {
            input: args.file.clone(),
            output: args.output.clone(),
            strategy: args.strategy.to_strategy(),
            report_interval: args.report_interval,
        }
    };

    summary::print_run_header(&config);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:24} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = Arc::new(BarReporter { pb });

    let result = run_pipeline_reported(&config, reporter, &CancelToken::new())?;
    summary::print_run_summary(&result, &config.output);

    Ok(())
}
