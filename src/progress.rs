//! Progress reporting.
//!
//! Attach a [`ProgressCallback`] through
//! [`ExtractOptions::with_progress`](crate::ExtractOptions::with_progress)
//! to observe every frame as it is written.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framestamp::{ExtractOptions, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{} at t={:.6}", info.filename, info.timestamp_seconds);
//!     }
//! }
//!
//! let options = ExtractOptions::new().with_progress(Arc::new(PrintProgress));
//! framestamp::extract_frames_with_options("input.mov", "frames", &options)?;
//! # Ok::<(), framestamp::FrameStampError>(())
//! ```

use std::time::{Duration, Instant};

/// A snapshot taken right after a frame and its CSV row were written.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames written so far, including this one.
    pub frames_written: u64,
    /// Decode-order index of this frame.
    pub current_frame: u64,
    /// Estimated frame count of the stream, if the container reports one.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time since decoding started.
    pub elapsed: Duration,
    /// Name of the image just written.
    pub filename: String,
    /// Absolute timestamp recorded for this frame.
    pub timestamp_seconds: f64,
}

/// Receives progress updates during extraction.
///
/// Callbacks observe but cannot halt the run.
pub trait ProgressCallback: Send + Sync {
    /// Called once per written frame.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Default callback that discards every notification.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Builds [`ProgressInfo`] snapshots for one run.
pub(crate) struct ProgressTracker {
    started: Instant,
    total: Option<u64>,
    frames_written: u64,
}

impl ProgressTracker {
    pub(crate) fn new(total: Option<u64>) -> Self {
        Self {
            started: Instant::now(),
            total,
            frames_written: 0,
        }
    }

    /// Count a written frame and describe it.
    pub(crate) fn frame_written(
        &mut self,
        current_frame: u64,
        filename: &str,
        timestamp_seconds: f64,
    ) -> ProgressInfo {
        self.frames_written += 1;
        let percentage = self.total.filter(|&total| total > 0).map(|total| {
            // The container's count is an estimate; never report past 100%.
            ((current_frame + 1) as f32 / total as f32 * 100.0).min(100.0)
        });

        ProgressInfo {
            frames_written: self.frames_written,
            current_frame,
            total: self.total,
            percentage,
            elapsed: self.started.elapsed(),
            filename: filename.to_string(),
            timestamp_seconds,
        }
    }
}
