//! Lazy, pull-based iteration over decoded frames.
//!
//! [`DecodedFrames`] implements [`Iterator`] and decodes on demand: each
//! call to [`next()`](Iterator::next) reads just enough packets to produce
//! the next frame of the selected stream, in decode order. Nothing is
//! buffered beyond the frame being handed out.

use ffmpeg_next::{
    Error as FfmpegError, Packet, Rational,
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
    util::error::EAGAIN,
};
use image::RgbImage;

use crate::{error::FrameStampError, source::VideoSource, utilities};

/// One decoded frame.
#[derive(Debug, Clone)]
pub struct FrameRecord {
    /// Position in decode order, counting every decoded frame from 0.
    pub index: u64,
    /// Presentation timestamp in `time_base` ticks, if the frame has one.
    pub pts: Option<i64>,
    /// Seconds per pts tick of the source stream.
    pub time_base: Rational,
    /// Pixel content. Frames without a pts are not converted, so this is
    /// `Some` exactly when `pts` is.
    pub image: Option<RgbImage>,
}

impl FrameRecord {
    /// `pts * time_base + offset_seconds`, or `None` for a frame without pts.
    pub fn seconds(&self, offset_seconds: f64) -> Option<f64> {
        self.pts
            .map(|pts| utilities::pts_to_seconds(pts, self.time_base) + offset_seconds)
    }
}

/// Pixel-format converter for one source layout, with its own output frame.
struct RgbConverter {
    context: ScalingContext,
    output: VideoFrame,
    format: Pixel,
    width: u32,
    height: u32,
}

impl RgbConverter {
    fn new(frame: &VideoFrame) -> Result<Self, FrameStampError> {
        let format = frame.format();
        let width = frame.width();
        let height = frame.height();
        log::debug!("Building RGB converter for {format:?} {width}x{height}");

        let context = ScalingContext::get(
            format,
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )?;
        Ok(Self {
            context,
            output: VideoFrame::empty(),
            format,
            width,
            height,
        })
    }

    fn matches(&self, frame: &VideoFrame) -> bool {
        self.format == frame.format() && self.width == frame.width() && self.height == frame.height()
    }

    fn convert(&mut self, frame: &VideoFrame) -> Result<RgbImage, FrameStampError> {
        self.context.run(frame, &mut self.output)?;

        let buffer = utilities::frame_to_rgb_buffer(&self.output, self.width, self.height);
        RgbImage::from_raw(self.width, self.height, buffer).ok_or_else(|| {
            FrameStampError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })
    }
}

/// Convert `frame` to RGB24 with the converter in `slot`, replacing it when
/// the frame's format or size differs from the one it was built for.
fn convert_to_rgb(
    slot: &mut Option<RgbConverter>,
    frame: &VideoFrame,
) -> Result<RgbImage, FrameStampError> {
    let converter = match slot.take() {
        Some(converter) if converter.matches(frame) => converter,
        _ => RgbConverter::new(frame)?,
    };
    slot.insert(converter).convert(frame)
}

/// A lazy iterator over the decoded frames of a [`VideoSource`].
///
/// Borrows the source mutably for its whole lifetime. After an error the
/// iterator is fused and yields `None`.
///
/// Created via [`VideoSource::frames`].
pub struct DecodedFrames<'a> {
    source: &'a mut VideoSource,
    converter: Option<RgbConverter>,
    decoded_frame: VideoFrame,
    next_index: u64,
    eof_sent: bool,
    done: bool,
}

impl<'a> DecodedFrames<'a> {
    pub(crate) fn new(source: &'a mut VideoSource) -> Self {
        Self {
            source,
            converter: None,
            decoded_frame: VideoFrame::empty(),
            next_index: 0,
            eof_sent: false,
            done: false,
        }
    }

    fn emit_current_frame(&mut self) -> Result<FrameRecord, FrameStampError> {
        let index = self.next_index;
        self.next_index += 1;

        let pts = self.decoded_frame.pts();
        let image = match pts {
            Some(_) => Some(convert_to_rgb(&mut self.converter, &self.decoded_frame)?),
            None => None,
        };
        Ok(FrameRecord {
            index,
            pts,
            time_base: self.source.time_base(),
            image,
        })
    }

    fn fail(&mut self, error: FrameStampError) -> Option<Result<FrameRecord, FrameStampError>> {
        self.done = true;
        Some(Err(error))
    }
}

impl Iterator for DecodedFrames<'_> {
    type Item = Result<FrameRecord, FrameStampError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            // Drain whatever the decoder already holds.
            match self.source.decoder.receive_frame(&mut self.decoded_frame) {
                Ok(()) => {
                    let record = self.emit_current_frame();
                    if record.is_err() {
                        self.done = true;
                    }
                    return Some(record);
                }
                Err(FfmpegError::Eof) => {
                    self.done = true;
                    return None;
                }
                Err(FfmpegError::Other { errno }) if errno == EAGAIN => {}
                Err(error) => return self.fail(error.into()),
            }

            if self.eof_sent {
                self.done = true;
                return None;
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.source.input_context) {
                Ok(()) => {
                    if packet.stream() == self.source.stream_index {
                        if let Err(error) = self.source.decoder.send_packet(&packet) {
                            return self.fail(error.into());
                        }
                    }
                }
                Err(FfmpegError::Eof) => {
                    if let Err(error) = self.source.decoder.send_eof() {
                        return self.fail(error.into());
                    }
                    self.eof_sent = true;
                }
                Err(error) => return self.fail(error.into()),
            }
        }
    }
}
