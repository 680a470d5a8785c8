//! Fixture generation shared by the integration tests.
//!
//! Videos are synthesized with FFmpeg's built-in MPEG-4 encoder so no media
//! files need to be checked in.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ffmpeg_next::{
    Error as FfmpegError, Packet, Rational,
    codec::{Id, context::Context as CodecContext},
    format::{Flags as FormatFlags, Pixel},
    frame::Video as VideoFrame,
};

pub const WIDTH: u32 = 64;
pub const HEIGHT: u32 = 48;
pub const FPS: i32 = 30;

/// Encode `frame_count` synthetic frames into `path` (container from the
/// extension).
pub fn write_test_video(path: &Path, frame_count: usize) -> Result<(), FfmpegError> {
    ffmpeg_next::init()?;

    let mut output = ffmpeg_next::format::output(&path)?;
    let needs_global_header = output.format().flags().contains(FormatFlags::GLOBAL_HEADER);

    let codec = ffmpeg_next::encoder::find(Id::MPEG4).ok_or(FfmpegError::EncoderNotFound)?;
    let mut stream = output.add_stream(codec)?;
    let stream_index = stream.index();
    let encoder_time_base = Rational::new(1, FPS);

    let mut encoder = CodecContext::from_parameters(stream.parameters())?
        .encoder()
        .video()?;
    encoder.set_width(WIDTH);
    encoder.set_height(HEIGHT);
    encoder.set_format(Pixel::YUV420P);
    encoder.set_time_base(encoder_time_base);
    encoder.set_frame_rate(Some(Rational::new(FPS, 1)));
    if needs_global_header {
        unsafe {
            (*encoder.as_mut_ptr()).flags |= ffmpeg_next::ffi::AV_CODEC_FLAG_GLOBAL_HEADER as i32;
        }
    }

    let mut encoder = encoder.open_as(codec)?;
    stream.set_parameters(&encoder);
    stream.set_time_base(encoder_time_base);

    output.write_header()?;
    let stream_time_base = output
        .stream(stream_index)
        .ok_or(FfmpegError::StreamNotFound)?
        .time_base();

    let mut packet = Packet::empty();
    for index in 0..frame_count {
        let mut frame = VideoFrame::new(Pixel::YUV420P, WIDTH, HEIGHT);
        paint(&mut frame, index);
        frame.set_pts(Some(index as i64));
        encoder.send_frame(&frame)?;

        while encoder.receive_packet(&mut packet).is_ok() {
            packet.set_stream(stream_index);
            packet.rescale_ts(encoder_time_base, stream_time_base);
            packet.write_interleaved(&mut output)?;
        }
    }

    encoder.send_eof()?;
    while encoder.receive_packet(&mut packet).is_ok() {
        packet.set_stream(stream_index);
        packet.rescale_ts(encoder_time_base, stream_time_base);
        packet.write_interleaved(&mut output)?;
    }

    output.write_trailer()?;
    Ok(())
}

/// Moving luma gradient on neutral chroma.
fn paint(frame: &mut VideoFrame, index: usize) {
    for plane in 0..3 {
        let stride = frame.stride(plane);
        let width = frame.plane_width(plane) as usize;
        let height = frame.plane_height(plane) as usize;
        let data = frame.data_mut(plane);
        for row in 0..height {
            for column in 0..width {
                data[row * stride + column] = if plane == 0 {
                    ((row + column + index * 8) % 256) as u8
                } else {
                    128
                };
            }
        }
    }
}

/// Write a test video into `directory`, or `None` (with a note) when this
/// FFmpeg build cannot encode MPEG-4.
pub fn video_fixture(directory: &Path, name: &str, frame_count: usize) -> Option<PathBuf> {
    let path = directory.join(name);
    match write_test_video(&path, frame_count) {
        Ok(()) => Some(path),
        Err(error) => {
            eprintln!("Skipping: cannot synthesize test video ({error})");
            None
        }
    }
}

/// Write one second of 8 kHz mono silence as a PCM WAV file.
pub fn write_silent_wav(path: &Path) {
    let sample_rate: u32 = 8000;
    let data_len: u32 = sample_rate * 2;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);

    std::fs::write(path, bytes).expect("Failed to write WAV fixture");
}

/// Data rows of a timestamp CSV as `(filename, timestamp)` pairs, header
/// checked and dropped.
pub fn read_rows(csv_path: &Path) -> Vec<(String, String)> {
    let content = std::fs::read_to_string(csv_path).expect("Failed to read CSV");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("filename,timestamp"));
    lines
        .map(|line| {
            let (filename, timestamp) = line.split_once(',').expect("row has two columns");
            (filename.to_string(), timestamp.to_string())
        })
        .collect()
}

/// Names of the `.jpg` files in `directory`, sorted.
pub fn jpeg_names(directory: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(directory)
        .expect("Failed to list output folder")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".jpg"))
        .collect();
    names.sort();
    names
}
