use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use colored::Colorize;
use framestamp::{
    ExtractOptions, ExtractionOutcome, FfmpegLogLevel, ProgressCallback, ProgressInfo,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

const CLI_AFTER_HELP: &str = "Examples:\n  framestamp session/video.mov session/frames\n  framestamp clip.mp4 out --progress --jpeg-quality 90\n\nIf session/video_start_time.txt exists, its number of seconds is added to every timestamp.";

#[derive(Debug, Parser)]
#[command(
    name = "framestamp",
    version,
    about = "Extract video frames as JPEG with a CSV of absolute timestamps",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Path to the input video file.
    video_path: PathBuf,

    /// Folder for the extracted frames and frame_timestamps.csv (created if missing).
    output_folder: PathBuf,

    /// Show debug-level logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar instead of periodic notices.
    #[arg(long)]
    progress: bool,

    /// JPEG quality, 1-100.
    #[arg(long, default_value_t = framestamp::DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: u8,

    /// Verbosity of FFmpeg's own stderr output.
    #[arg(long, value_enum, ignore_case = true)]
    ffmpeg_log_level: Option<FfmpegLogLevel>,
}

fn init_logging(cli: &Cli) {
    // Under a progress bar only warnings and errors are printed.
    let default_filter = if cli.verbose {
        "debug"
    } else if cli.progress {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::no_length();
        let style = ProgressStyle::with_template(
            "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}",
        )?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(total) = info.total {
            self.bar.set_length(total.max(info.current_frame + 1));
        }
        self.bar.set_position(info.current_frame + 1);
        self.bar
            .set_message(format!("{} t={:.6}", info.filename, info.timestamp_seconds));
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Some(level) = cli.ffmpeg_log_level {
        framestamp::set_ffmpeg_log_level(level);
    }

    let mut options = ExtractOptions::new().with_jpeg_quality(cli.jpeg_quality);
    let progress = if cli.progress {
        let progress = Arc::new(TerminalProgress::new()?);
        options = options.with_progress(progress.clone());
        Some(progress)
    } else {
        None
    };

    let outcome =
        framestamp::extract_frames_with_options(&cli.video_path, &cli.output_folder, &options)?;

    if let Some(progress) = &progress {
        progress.bar.finish_with_message("done");
    }

    match outcome {
        ExtractionOutcome::Completed(summary) => {
            println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "Extracted {} frame(s) to {}",
                    summary.frames_written,
                    summary.output_folder.display()
                )
                .green()
            );
        }
        ExtractionOutcome::Unreadable { path, reason } => {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("could not open {}: {reason}", path.display()).yellow()
            );
        }
        ExtractionOutcome::NoVideoStream { path } => {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("no video stream in {}", path.display()).yellow()
            );
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
