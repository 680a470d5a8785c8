//! Opened video containers.
//!
//! [`VideoSource`] owns the demuxer context and a decoder for the first
//! video stream of the file. Frames are pulled from it with
//! [`VideoSource::frames`].

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{
    Rational, codec::context::Context as CodecContext, decoder::Video as VideoDecoder,
    format::context::Input, media::Type,
};

use crate::{error::FrameStampError, frames::DecodedFrames};

/// An opened container with a ready decoder for its first video stream.
///
/// "First" means stream index 0 among the video streams in container order,
/// which is not necessarily the stream FFmpeg would rank best.
///
/// # Example
///
/// ```no_run
/// use framestamp::{FrameStampError, VideoSource};
///
/// let mut source = VideoSource::open("input.mov")?;
/// for record in source.frames() {
///     let record = record?;
///     println!("{} {:?}", record.index, record.seconds(0.0));
/// }
/// # Ok::<(), FrameStampError>(())
/// ```
pub struct VideoSource {
    pub(crate) input_context: Input,
    pub(crate) decoder: VideoDecoder,
    pub(crate) stream_index: usize,
    time_base: Rational,
    width: u32,
    height: u32,
    estimated_frames: Option<u64>,
    file_path: PathBuf,
}

impl Debug for VideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSource")
            .field("stream_index", &self.stream_index)
            .field("time_base", &self.time_base)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("estimated_frames", &self.estimated_frames)
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file and prepare a decoder for its first video stream.
    ///
    /// Initializes FFmpeg (idempotent) before opening.
    ///
    /// # Errors
    ///
    /// - [`FrameStampError::FileOpen`] if the file cannot be opened, or the
    ///   stream's codec has no usable decoder.
    /// - [`FrameStampError::NoVideoStream`] if the container holds no video.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FrameStampError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        ffmpeg_next::init().map_err(|error| FrameStampError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| FrameStampError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .find(|stream| stream.parameters().medium() == Type::Video)
            .ok_or(FrameStampError::NoVideoStream)?;

        let stream_index = stream.index();
        let time_base = stream.time_base();

        let decoder_context =
            CodecContext::from_parameters(stream.parameters()).map_err(|error| {
                FrameStampError::FileOpen {
                    path: file_path.clone(),
                    reason: format!(
                        "Failed to read video codec parameters for stream {stream_index}: {error}"
                    ),
                }
            })?;
        let decoder =
            decoder_context
                .decoder()
                .video()
                .map_err(|error| FrameStampError::FileOpen {
                    path: file_path.clone(),
                    reason: format!(
                        "Failed to create video decoder for stream {stream_index}: {error}"
                    ),
                })?;

        let estimated_frames = if stream.frames() > 0 {
            Some(stream.frames() as u64)
        } else {
            let frame_rate = stream.avg_frame_rate();
            let duration_microseconds = input_context.duration();
            if frame_rate.denominator() != 0 && frame_rate.numerator() > 0 && duration_microseconds > 0
            {
                let frames_per_second =
                    frame_rate.numerator() as f64 / frame_rate.denominator() as f64;
                Some((duration_microseconds as f64 / 1_000_000.0 * frames_per_second).round() as u64)
            } else {
                None
            }
        };

        let width = decoder.width();
        let height = decoder.height();

        log::debug!(
            "Selected video stream {stream_index}: {width}x{height}, time base {}/{}, ~{estimated_frames:?} frames",
            time_base.numerator(),
            time_base.denominator(),
        );

        Ok(Self {
            input_context,
            decoder,
            stream_index,
            time_base,
            width,
            height,
            estimated_frames,
            file_path,
        })
    }

    /// Lazily decode the selected stream, one frame per `next()`.
    ///
    /// The decoder is consumed as frames are pulled; a source yields its
    /// frames once.
    pub fn frames(&mut self) -> DecodedFrames<'_> {
        DecodedFrames::new(self)
    }

    /// Seconds per pts tick of the selected stream.
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /// Container index of the selected stream.
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /// Coded width reported by the decoder.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Coded height reported by the decoder.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame count recorded by the container, or estimated from duration and
    /// average frame rate.
    pub fn estimated_frames(&self) -> Option<u64> {
        self.estimated_frames
    }

    /// Path the source was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}
