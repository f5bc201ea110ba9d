use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidgrab")]
#[command(author, version, about = "Download videos, extract audio and find video URLs with yt-dlp")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download a video
    Download {
        /// Video URL to download
        url: String,

        #[command(flatten)]
        options: DownloadOptions,
    },

    /// Extract the audio track of a video
    Audio {
        /// Video URL
        url: String,

        #[command(flatten)]
        options: AudioOptions,
    },

    /// Print video URLs found in text, a file or stdin as a JSON array
    Urls {
        /// Text containing URLs, or a path to a file (reads stdin when omitted)
        input: Option<String>,
    },

    /// Check that yt-dlp and ffmpeg are installed
    Doctor,

    /// Show configuration
    Config,
}

#[derive(clap::Args, Clone, Debug)]
pub struct DownloadOptions {
    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Raw yt-dlp format selector (overrides --quality)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Video quality
    #[arg(short, long, value_enum)]
    pub quality: Option<VideoQuality>,

    /// Only print video info as JSON, do not download
    #[arg(long)]
    pub info_only: bool,
}

#[derive(clap::Args, Clone, Debug)]
pub struct AudioOptions {
    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Audio format
    #[arg(short, long, value_enum)]
    pub format: Option<AudioFormat>,

    /// Audio quality (VBR 0-10 or bitrate, e.g. 192)
    #[arg(short, long)]
    pub quality: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoQuality {
    /// Best single file
    Best,
    /// Up to 1080p video plus best audio
    #[value(name = "1080p")]
    P1080,
    /// Up to 720p video plus best audio
    #[value(name = "720p")]
    P720,
    /// Up to 480p video plus best audio
    #[value(name = "480p")]
    P480,
    /// Best audio only
    Audio,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    M4a,
    Opus,
    Flac,
    Wav,
}
