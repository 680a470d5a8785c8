//! The frame extraction pipeline.
//!
//! [`extract_frames`] opens a video, reads the start-time sidecar, and writes
//! every timestamped frame as `frame_NNNNNN.jpg` next to a
//! `frame_timestamps.csv` that maps each filename to its absolute time.
//!
//! Failing to open the container, or finding no video stream in it, is not
//! an error: it is logged and reported as an [`ExtractionOutcome`]. Any
//! failure after that point (decode, image or CSV write) aborts the run and
//! is returned as `Err`.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use image::{RgbImage, codecs::jpeg::JpegEncoder};

use crate::{
    configuration::ExtractOptions,
    error::FrameStampError,
    frames::FrameRecord,
    offset::{self, StartOffset},
    progress::ProgressTracker,
    source::VideoSource,
    timestamps::{TIMESTAMP_FILE_NAME, TimestampLog},
    utilities::{format_timestamp, frame_file_name},
};

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// Every decodable frame was processed.
    Completed(ExtractionSummary),
    /// The container could not be opened; nothing but the output folder was
    /// created.
    Unreadable {
        /// The video path that failed to open.
        path: PathBuf,
        /// Why opening failed.
        reason: String,
    },
    /// The container opened but holds no video stream.
    NoVideoStream {
        /// The video path that was opened.
        path: PathBuf,
    },
}

impl ExtractionOutcome {
    /// The run summary, if extraction went ahead.
    pub fn summary(&self) -> Option<&ExtractionSummary> {
        match self {
            ExtractionOutcome::Completed(summary) => Some(summary),
            _ => None,
        }
    }

    /// Whether frames were extracted.
    pub fn is_completed(&self) -> bool {
        matches!(self, ExtractionOutcome::Completed(_))
    }
}

/// Counters and paths of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSummary {
    /// Folder holding the images and the CSV.
    pub output_folder: PathBuf,
    /// Path of `frame_timestamps.csv`.
    pub csv_path: PathBuf,
    /// Offset added to every timestamp.
    pub start_offset: StartOffset,
    /// Frames produced by the decoder.
    pub frames_decoded: u64,
    /// Images written; equals the CSV data rows.
    pub frames_written: u64,
    /// Frames dropped for lacking a presentation timestamp.
    pub frames_skipped: u64,
}

/// Extract all frames of `video_path` into `output_folder` with default
/// options.
///
/// # Example
///
/// ```no_run
/// use framestamp::ExtractionOutcome;
///
/// match framestamp::extract_frames("session/video.mov", "session/frames")? {
///     ExtractionOutcome::Completed(summary) => println!("{} frames", summary.frames_written),
///     other => eprintln!("nothing extracted: {other:?}"),
/// }
/// # Ok::<(), framestamp::FrameStampError>(())
/// ```
pub fn extract_frames<V, O>(
    video_path: V,
    output_folder: O,
) -> Result<ExtractionOutcome, FrameStampError>
where
    V: AsRef<Path>,
    O: AsRef<Path>,
{
    extract_frames_with_options(video_path, output_folder, &ExtractOptions::default())
}

/// Extract all frames of `video_path` into `output_folder`.
///
/// The output folder (and its parents) is created first. Frames are named
/// by their decode-order index; a frame without a presentation timestamp is
/// skipped but still uses up its index, so filenames may have gaps while the
/// CSV only lists files that exist.
///
/// # Errors
///
/// Any I/O, decode, JPEG or CSV failure once decoding has started. Files
/// already written stay on disk.
pub fn extract_frames_with_options<V, O>(
    video_path: V,
    output_folder: O,
    options: &ExtractOptions,
) -> Result<ExtractionOutcome, FrameStampError>
where
    V: AsRef<Path>,
    O: AsRef<Path>,
{
    let video_path = video_path.as_ref();
    let output_folder = output_folder.as_ref();

    fs::create_dir_all(output_folder)?;

    let mut source = match VideoSource::open(video_path) {
        Ok(source) => source,
        Err(FrameStampError::NoVideoStream) => {
            log::error!("No video stream found in {}", video_path.display());
            return Ok(ExtractionOutcome::NoVideoStream {
                path: video_path.to_path_buf(),
            });
        }
        Err(error) => {
            log::error!("Error opening video file: {error}");
            let reason = match error {
                FrameStampError::FileOpen { reason, .. } => reason,
                other => other.to_string(),
            };
            return Ok(ExtractionOutcome::Unreadable {
                path: video_path.to_path_buf(),
                reason,
            });
        }
    };

    let start_offset = offset::load_start_offset(video_path)?;
    let csv_path = output_folder.join(TIMESTAMP_FILE_NAME);

    log::info!("Processing: {}", video_path.display());

    let estimated_frames = source.estimated_frames();
    let counts = write_frames(
        source.frames(),
        output_folder,
        &csv_path,
        start_offset.seconds,
        estimated_frames,
        options,
    )?;

    if counts.skipped > 0 {
        log::debug!("Skipped {} frames without a presentation timestamp", counts.skipped);
    }
    log::info!("Done! Frames and CSV saved to {}", output_folder.display());

    Ok(ExtractionOutcome::Completed(ExtractionSummary {
        output_folder: output_folder.to_path_buf(),
        csv_path,
        start_offset,
        frames_decoded: counts.decoded,
        frames_written: counts.written,
        frames_skipped: counts.skipped,
    }))
}

struct FrameCounts {
    decoded: u64,
    written: u64,
    skipped: u64,
}

/// Write each timestamped record as a JPEG plus a CSV row at `csv_path`.
///
/// A record without pts is counted as skipped; its index is not reused, so
/// the filenames of later frames keep their decode position.
fn write_frames<I>(
    records: I,
    output_folder: &Path,
    csv_path: &Path,
    offset_seconds: f64,
    estimated_frames: Option<u64>,
    options: &ExtractOptions,
) -> Result<FrameCounts, FrameStampError>
where
    I: IntoIterator<Item = Result<FrameRecord, FrameStampError>>,
{
    let mut timestamp_log = TimestampLog::create(csv_path)?;
    let mut tracker = ProgressTracker::new(estimated_frames);
    let mut decoded = 0;
    let mut skipped = 0;

    for record in records {
        let record = record?;
        decoded += 1;

        let (Some(seconds), Some(image)) = (record.seconds(offset_seconds), &record.image) else {
            skipped += 1;
            continue;
        };

        let filename = frame_file_name(record.index);
        write_jpeg(&output_folder.join(&filename), image, options.jpeg_quality)?;
        timestamp_log.record(&filename, seconds)?;

        if record.index % options.notice_interval == 0 {
            log::info!("Saved {filename} at t={}", format_timestamp(seconds));
        }

        let info = tracker.frame_written(record.index, &filename, seconds);
        options.progress.on_progress(&info);
    }

    Ok(FrameCounts {
        decoded,
        written: timestamp_log.finish()?,
        skipped,
    })
}

/// Encode `image` as a JPEG file at `path`.
fn write_jpeg(path: &Path, image: &RgbImage, quality: u8) -> Result<(), FrameStampError> {
    let mut writer = BufWriter::new(File::create(path)?);
    JpegEncoder::new_with_quality(&mut writer, quality).encode_image(image)?;
    writer.flush()?;
    Ok(())
}
