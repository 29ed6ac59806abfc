/// Per-frame observability record: the before/after APL pair for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameReport {
    pub frame_index: usize,
    pub total_frames: usize,
    pub apl_before: f64,
    pub apl_after: f64,
}

/// Aggregate result of a pipeline run.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub frames_processed: usize,
    pub total_frames: usize,
    pub mean_apl_before: f64,
    pub mean_apl_after: f64,
    /// True when the run stopped early via a [`CancelToken`](super::CancelToken).
    pub cancelled: bool,
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations; reporting is
/// purely informational and never affects frame processing.
pub trait ProgressReporter: Send + Sync {
    /// The run is starting; `total_frames` frames will be processed.
    fn begin(&self, _total_frames: usize) {}

    /// One frame has been transformed and written.
    fn frame_done(&self, _report: &FrameReport) {}

    /// The run is over (completed or cancelled).
    fn finish(&self, _summary: &RunSummary) {}
}

/// No-op progress reporter, used when `run_pipeline` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
