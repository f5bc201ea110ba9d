use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::args::{DownloadOptions, VideoQuality as CliQuality};
use vidgrab_core::{
    config::Config,
    downloader::{DownloadRequest, VideoDownloader, VideoQuality},
    error::DownloadError,
    runner::SystemRunner,
};

pub async fn run(url: &str, options: &DownloadOptions, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let yt_dlp_path = config
        .yt_dlp_path()
        .map_err(|_| DownloadError::YtDlpNotFound)?;

    let downloader = VideoDownloader::new(Arc::new(SystemRunner), yt_dlp_path)
        .with_ffmpeg_location(config.paths.ffmpeg.clone())
        .with_info_timeout(config.info_timeout());

    if options.info_only {
        return print_info(&downloader, url).await;
    }

    // Convert CLI types to core types
    let quality = options
        .quality
        .map(|q| match q {
            CliQuality::Best => VideoQuality::Best,
            CliQuality::P1080 => VideoQuality::P1080,
            CliQuality::P720 => VideoQuality::P720,
            CliQuality::P480 => VideoQuality::P480,
            CliQuality::Audio => VideoQuality::Audio,
        })
        .or(config.video.default_quality);

    let request = DownloadRequest {
        url: url.to_string(),
        output_dir: options
            .output
            .clone()
            .unwrap_or_else(|| config.output.default_directory.clone()),
        format: options.format.clone(),
        quality,
    };

    downloader
        .download(&request)
        .await
        .with_context(|| format!("Download failed for {}", url))
}

async fn print_info(downloader: &VideoDownloader, url: &str) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Fetching video info...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = downloader.fetch_info(url).await;
    spinner.finish_and_clear();

    let info = result.with_context(|| format!("Could not extract video info for {}", url))?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
