use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::consts::FRAME_BATCH_SIZE;
use crate::error::Result;
use crate::io::ser::SerReader;
use crate::io::ser_writer::SerWriter;
use crate::metric::apl;

use super::config::PipelineConfig;
use super::types::{FrameReport, NoOpReporter, ProgressReporter, RunSummary};

/// Cooperative cancellation signal, checked between frames.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Run the pipeline without progress reporting or cancellation.
pub fn run_pipeline(config: &PipelineConfig) -> Result<RunSummary> {
    run_pipeline_reported(config, Arc::new(NoOpReporter), &CancelToken::new())
}

/// Run the frame pipeline: read, transform, measure, write, in input order.
///
/// Frames are handled in batches of [`FRAME_BATCH_SIZE`]: each batch is
/// transformed in parallel (order-preserving collect) and written back
/// sequentially, which bounds in-flight memory while keeping output order
/// identical to input order. Strategies are pure per-frame functions, so
/// ordering is entirely the pipeline's responsibility.
///
/// Configuration is validated before the source is opened; a cancelled run
/// finalizes the sink and returns a partial [`RunSummary`] rather than an
/// error.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
    cancel: &CancelToken,
) -> Result<RunSummary> {
    config.strategy.validate()?;

    let reader = SerReader::open(&config.input)?;
    let total = reader.frame_count();
    info!(
        total_frames = total,
        strategy = config.strategy.name(),
        "processing video"
    );

    let mut writer = SerWriter::create(&config.output, &reader.output_header())?;
    reporter.begin(total);

    let mut summary = RunSummary {
        total_frames: total,
        ..Default::default()
    };
    let mut sum_before = 0.0f64;
    let mut sum_after = 0.0f64;

    for batch_start in (0..total).step_by(FRAME_BATCH_SIZE) {
        if cancel.is_cancelled() {
            summary.cancelled = true;
            break;
        }
        let batch_end = (batch_start + FRAME_BATCH_SIZE).min(total);
        let batch = (batch_start..batch_end)
            .map(|i| reader.read_frame(i))
            .collect::<Result<Vec<_>>>()?;

        let processed: Vec<_> = batch
            .par_iter()
            .map(|frame| {
                let before = apl(frame);
                let out = config.strategy.apply(frame);
                let after = apl(&out);
                (out, before, after)
            })
            .collect();

        for (offset, (frame, before, after)) in processed.into_iter().enumerate() {
            let index = batch_start + offset;
            writer.write_frame(&frame)?;
            sum_before += before;
            sum_after += after;
            summary.frames_processed += 1;
            reporter.frame_done(&FrameReport {
                frame_index: index,
                total_frames: total,
                apl_before: before,
                apl_after: after,
            });
            if config.report_interval > 0 && (index + 1) % config.report_interval == 0 {
                info!(
                    frame = index + 1,
                    total,
                    apl_before = before,
                    apl_after = after,
                    "progress"
                );
            }
        }
    }

    if let Some(timestamps) = reader.timestamps() {
        let n = summary.frames_processed.min(timestamps.len());
        writer.write_timestamps(&timestamps[..n])?;
    }
    writer.finalize()?;

    if summary.frames_processed > 0 {
        summary.mean_apl_before = sum_before / summary.frames_processed as f64;
        summary.mean_apl_after = sum_after / summary.frames_processed as f64;
    }
    if summary.cancelled {
        warn!(
            frames = summary.frames_processed,
            total, "run cancelled before completion"
        );
    }
    reporter.finish(&summary);
    Ok(summary)
}
