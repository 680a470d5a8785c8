//! # framestamp
//!
//! Decode a video frame by frame, save every frame as a JPEG, and record a
//! CSV mapping each image to the absolute time it was captured.
//!
//! Absolute time is the frame's presentation timestamp rescaled by the
//! stream time base, plus an optional offset read from a
//! `video_start_time.txt` file sitting next to the video. Decoding is done
//! by FFmpeg via the [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next)
//! crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! let outcome = framestamp::extract_frames("capture/video.mov", "capture/frames")?;
//! if let Some(summary) = outcome.summary() {
//!     println!("wrote {} frames to {}", summary.frames_written, summary.csv_path.display());
//! }
//! # Ok::<(), framestamp::FrameStampError>(())
//! ```
//!
//! The output folder then holds `frame_000000.jpg`, `frame_000001.jpg`, …
//! and `frame_timestamps.csv`:
//!
//! ```text
//! filename,timestamp
//! frame_000000.jpg,1000.000000
//! frame_000001.jpg,1000.033333
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on the system.

pub mod configuration;
pub mod error;
pub mod extract;
pub mod ffmpeg;
pub mod frames;
pub mod offset;
pub mod progress;
pub mod source;
pub mod timestamps;
pub mod utilities;

pub use configuration::{DEFAULT_JPEG_QUALITY, DEFAULT_NOTICE_INTERVAL, ExtractOptions};
pub use error::FrameStampError;
pub use extract::{
    ExtractionOutcome, ExtractionSummary, extract_frames, extract_frames_with_options,
};
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use frames::{DecodedFrames, FrameRecord};
pub use offset::{OffsetOrigin, START_TIME_FILE_NAME, StartOffset, load_start_offset};
pub use progress::{ProgressCallback, ProgressInfo};
pub use source::VideoSource;
pub use timestamps::{TIMESTAMP_FILE_NAME, TimestampLog};
