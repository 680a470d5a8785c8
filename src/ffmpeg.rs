//! FFmpeg log level configuration.
//!
//! FFmpeg writes its own warnings to stderr, independent of the Rust-side
//! [`log`](https://crates.io/crates/log) output of this crate. Damaged
//! streams in particular can be noisy while every frame is decoded, so the
//! CLI exposes this as `--ffmpeg-log-level`.
//!
//! # Example
//!
//! ```no_run
//! use framestamp::FfmpegLogLevel;
//!
//! framestamp::set_ffmpeg_log_level(FfmpegLogLevel::Error);
//! ```

use clap::ValueEnum;
use ffmpeg_next::util::log::Level;

/// Verbosity of FFmpeg's own stderr output, most quiet first.
///
/// Parsed from `--ffmpeg-log-level`; names are the lowercase variant names,
/// with `warn` accepted for `warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FfmpegLogLevel {
    /// Print nothing.
    Quiet,
    Panic,
    Fatal,
    /// Recoverable errors, such as a damaged packet.
    Error,
    /// FFmpeg's default.
    #[value(alias = "warn")]
    Warning,
    Info,
    Verbose,
    Debug,
    Trace,
}

impl From<FfmpegLogLevel> for Level {
    fn from(level: FfmpegLogLevel) -> Self {
        match level {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Panic => Level::Panic,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Verbose => Level::Verbose,
            FfmpegLogLevel::Debug => Level::Debug,
            FfmpegLogLevel::Trace => Level::Trace,
        }
    }
}

/// Set FFmpeg's own stderr verbosity for the rest of the process.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    log::debug!("Setting FFmpeg log level to {level:?}");
    ffmpeg_next::util::log::set_level(level.into());
}
