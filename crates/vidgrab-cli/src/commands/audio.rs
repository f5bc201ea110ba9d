use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::args::{AudioFormat as CliFormat, AudioOptions};
use vidgrab_core::{
    audio::{AudioExtractor, AudioFormat, AudioRequest},
    config::Config,
    error::DownloadError,
    runner::SystemRunner,
};

pub async fn run(url: &str, options: &AudioOptions, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let yt_dlp_path = config
        .yt_dlp_path()
        .map_err(|_| DownloadError::YtDlpNotFound)?;

    let format = match options.format {
        Some(CliFormat::Mp3) => AudioFormat::Mp3,
        Some(CliFormat::M4a) => AudioFormat::M4a,
        Some(CliFormat::Opus) => AudioFormat::Opus,
        Some(CliFormat::Flac) => AudioFormat::Flac,
        Some(CliFormat::Wav) => AudioFormat::Wav,
        None => config.audio.default_format,
    };

    let request = AudioRequest {
        url: url.to_string(),
        output_dir: options
            .output
            .clone()
            .unwrap_or_else(|| config.output.default_directory.clone()),
        format,
        quality: options
            .quality
            .clone()
            .unwrap_or_else(|| config.audio.default_quality.clone()),
    };

    AudioExtractor::new(Arc::new(SystemRunner), yt_dlp_path)
        .with_ffmpeg_location(config.paths.ffmpeg.clone())
        .extract(&request)
        .await
        .with_context(|| format!("Audio extraction failed for {}", url))
}
