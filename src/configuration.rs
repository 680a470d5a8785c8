//! Extraction options.
//!
//! [`ExtractOptions`] is a builder that threads the progress callback and
//! output tuning through [`extract_frames_with_options`](crate::extract_frames_with_options).
//!
//! # Example
//!
//! ```no_run
//! use framestamp::ExtractOptions;
//!
//! let options = ExtractOptions::new()
//!     .with_jpeg_quality(90)
//!     .with_notice_interval(100);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::progress::{NoOpProgress, ProgressCallback};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// A progress notice is logged for every frame whose index is a multiple of this.
pub const DEFAULT_NOTICE_INTERVAL: u64 = 50;

/// Settings for one extraction run.
///
/// A default-constructed value writes quality-75 JPEGs and logs a notice
/// every 50th frame.
#[derive(Clone)]
pub struct ExtractOptions {
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) notice_interval: u64,
    pub(crate) jpeg_quality: u8,
}

impl Debug for ExtractOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ExtractOptions")
            .field("notice_interval", &self.notice_interval)
            .field("jpeg_quality", &self.jpeg_quality)
            .finish_non_exhaustive()
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoOpProgress),
            notice_interval: DEFAULT_NOTICE_INTERVAL,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Attach a progress callback, invoked after every written frame.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Log a progress notice for every frame whose index is a multiple of
    /// `interval`. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_notice_interval(mut self, interval: u64) -> Self {
        self.notice_interval = interval.max(1);
        self
    }

    /// Set the JPEG quality, clamped to `1..=100`.
    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn notice_interval(&self) -> u64 {
        self.notice_interval
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}
