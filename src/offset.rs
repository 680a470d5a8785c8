//! Start-time offset sidecar.
//!
//! A recording may be accompanied by `video_start_time.txt`, placed next to
//! the video, holding the absolute time (in seconds) at which the video
//! clock reads zero. The offset is added to every frame timestamp.

use std::{fs, io::ErrorKind, path::Path};

use crate::error::FrameStampError;

/// Name of the sidecar file looked up next to the video.
pub const START_TIME_FILE_NAME: &str = "video_start_time.txt";

/// Where a [`StartOffset`] value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetOrigin {
    /// Parsed from the sidecar file.
    Sidecar,
    /// No sidecar file next to the video.
    Missing,
    /// The sidecar exists but does not hold a number.
    Unparsable,
}

/// Seconds added to every frame timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartOffset {
    /// Offset in seconds; 0.0 unless read from the sidecar.
    pub seconds: f64,
    /// How the value was obtained.
    pub origin: OffsetOrigin,
}

impl StartOffset {
    fn fallback(origin: OffsetOrigin) -> Self {
        Self {
            seconds: 0.0,
            origin,
        }
    }
}

/// Parse sidecar content: surrounding whitespace is ignored, the rest must be
/// a single floating-point number. Single underscores between digits are
/// allowed as separators (`1_712_345_678.5`).
pub fn parse_start_offset(content: &str) -> Option<f64> {
    let number = content.trim();
    if !number.contains('_') {
        return number.parse().ok();
    }

    let bytes = number.as_bytes();
    let separators_valid = bytes.iter().enumerate().all(|(position, &byte)| {
        byte != b'_'
            || (position > 0
                && bytes[position - 1].is_ascii_digit()
                && bytes.get(position + 1).is_some_and(u8::is_ascii_digit))
    });
    if !separators_valid {
        return None;
    }
    number.replace('_', "").parse().ok()
}

/// Load the start offset for `video_path` from its sibling sidecar file.
///
/// Missing or unparsable sidecars (including content that is not UTF-8) are
/// logged and fall back to 0.0.
///
/// # Errors
///
/// [`FrameStampError::IoError`] if the sidecar exists but cannot be read.
pub fn load_start_offset(video_path: &Path) -> Result<StartOffset, FrameStampError> {
    let sidecar_path = video_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(START_TIME_FILE_NAME);

    let bytes = match fs::read(&sidecar_path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            log::warn!(
                "{START_TIME_FILE_NAME} not found. Timestamps will be relative to 0."
            );
            return Ok(StartOffset::fallback(OffsetOrigin::Missing));
        }
        Err(error) => return Err(error.into()),
    };

    let parsed = std::str::from_utf8(&bytes)
        .ok()
        .and_then(parse_start_offset);

    match parsed {
        Some(seconds) => {
            log::info!("Found start time offset: {seconds}");
            Ok(StartOffset {
                seconds,
                origin: OffsetOrigin::Sidecar,
            })
        }
        None => {
            log::warn!(
                "Could not parse {} as a number of seconds",
                sidecar_path.display()
            );
            Ok(StartOffset::fallback(OffsetOrigin::Unparsable))
        }
    }
}
