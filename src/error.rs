//! Error types for the `framestamp` crate.
//!
//! [`FrameStampError`] is returned by every fallible operation. Opening
//! failures and missing video streams are normally absorbed by
//! [`extract_frames`](crate::extract_frames) and reported as an
//! [`ExtractionOutcome`](crate::ExtractionOutcome); everything else reaches
//! the caller through this type.

use std::{io::Error as IoError, path::PathBuf};

use csv::Error as CsvError;
use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framestamp` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameStampError {
    /// The video container could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The container does not hold a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A frame could not be decoded or converted to RGB.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error while reading the sidecar or writing output files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// JPEG encoding failed.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// Writing the timestamp CSV failed.
    #[error("CSV error: {0}")]
    CsvError(#[from] CsvError),
}

impl From<FfmpegError> for FrameStampError {
    fn from(error: FfmpegError) -> Self {
        FrameStampError::FfmpegError(error.to_string())
    }
}
