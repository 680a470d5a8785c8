//! Internal utility functions.
//!
//! Pixel-data copying, pts → seconds conversion, and output naming shared by
//! the iterator and the extractor.

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Copy an RGB24 FFmpeg frame into a tightly-packed buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 3).
/// The padding is stripped so the result can go straight into
/// [`image::RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let expected_stride = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == expected_stride {
        data[..expected_stride * (height as usize)].to_vec()
    } else {
        let mut buffer = Vec::with_capacity(expected_stride * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + expected_stride]);
        }
        buffer
    }
}

/// Rescale a PTS value from stream time base to seconds.
///
/// `pts * numerator` is formed exactly in 128 bits before a single division.
/// While that product fits in 53 bits (every real stream), the result is the
/// nearest `f64` to the exact rational value; beyond that the product itself
/// is rounded first.
pub fn pts_to_seconds(pts: i64, time_base: Rational) -> f64 {
    let denominator = time_base.denominator();
    if denominator == 0 {
        return 0.0;
    }
    let ticks = i128::from(pts) * i128::from(time_base.numerator());
    ticks as f64 / f64::from(denominator)
}

/// Image filename for the frame at decode position `index`.
pub fn frame_file_name(index: u64) -> String {
    format!("frame_{index:06}.jpg")
}

/// Render a timestamp the way it appears in the CSV and in log notices.
///
/// Non-finite values are spelled `nan`, `inf` and `-inf`.
pub fn format_timestamp(seconds: f64) -> String {
    if seconds.is_nan() {
        return "nan".to_string();
    }
    format!("{seconds:.6}")
}
