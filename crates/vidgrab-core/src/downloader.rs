//! Video downloader using yt-dlp

use crate::error::DownloadError;
use crate::runner::CommandRunner;
use crate::scanner::is_video_url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoQuality {
    #[serde(rename = "best")]
    Best,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "audio")]
    Audio,
}

impl VideoQuality {
    /// yt-dlp `-f` selector for this quality
    pub fn format_selector(&self) -> &'static str {
        match self {
            VideoQuality::Best => "best",
            VideoQuality::P1080 => "bestvideo[height<=1080]+bestaudio/best",
            VideoQuality::P720 => "bestvideo[height<=720]+bestaudio/best",
            VideoQuality::P480 => "bestvideo[height<=480]+bestaudio/best",
            VideoQuality::Audio => "bestaudio",
        }
    }
}

impl std::fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoQuality::Best => write!(f, "best"),
            VideoQuality::P1080 => write!(f, "1080p"),
            VideoQuality::P720 => write!(f, "720p"),
            VideoQuality::P480 => write!(f, "480p"),
            VideoQuality::Audio => write!(f, "audio"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub output_dir: PathBuf,
    /// Raw yt-dlp format selector, takes precedence over `quality`
    pub format: Option<String>,
    pub quality: Option<VideoQuality>,
}

/// `<dir>/%(title)s.<ext>` as yt-dlp expects it
pub(crate) fn output_template(dir: &Path, ext: &str) -> String {
    dir.join(format!("%(title)s.{}", ext))
        .to_string_lossy()
        .into_owned()
}

/// Log a warning for URLs outside the known platforms. Never blocks the download.
pub(crate) fn warn_if_unrecognized(url: &str) {
    if !is_video_url(url) {
        warn!(
            "URL does not appear to be from a known video platform: {}",
            url
        );
        warn!("Will attempt download anyway.");
    }
}

pub struct VideoDownloader {
    runner: Arc<dyn CommandRunner>,
    yt_dlp_path: PathBuf,
    ffmpeg_location: Option<PathBuf>,
    info_timeout: Duration,
}

impl VideoDownloader {
    pub fn new(runner: Arc<dyn CommandRunner>, yt_dlp_path: PathBuf) -> Self {
        Self {
            runner,
            yt_dlp_path,
            ffmpeg_location: None,
            info_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_ffmpeg_location(mut self, ffmpeg: Option<PathBuf>) -> Self {
        self.ffmpeg_location = ffmpeg;
        self
    }

    pub fn with_info_timeout(mut self, timeout: Duration) -> Self {
        self.info_timeout = timeout;
        self
    }

    pub fn download_args(&self, req: &DownloadRequest) -> Vec<String> {
        let mut args = vec![
            req.url.clone(),
            "-o".to_string(),
            output_template(&req.output_dir, "%(ext)s"),
        ];

        if let Some(ref format) = req.format {
            args.extend(["-f".to_string(), format.clone()]);
        } else if let Some(quality) = req.quality {
            args.extend(["-f".to_string(), quality.format_selector().to_string()]);
        }

        args.extend(
            ["--no-playlist", "--write-info-json", "--write-thumbnail"].map(String::from),
        );

        if let Some(ref ffmpeg) = self.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(ffmpeg.to_string_lossy().into_owned());
        }

        args
    }

    pub fn info_args(url: &str) -> Vec<String> {
        ["--no-download", "--dump-json", "--flat-playlist", url]
            .map(String::from)
            .to_vec()
    }

    /// Download a single video into `req.output_dir`
    pub async fn download(&self, req: &DownloadRequest) -> Result<(), DownloadError> {
        warn_if_unrecognized(&req.url);

        info!("Downloading video from: {}", req.url);
        info!("Output directory: {}", req.output_dir.display());

        let args = self.download_args(req);
        let code = self
            .runner
            .status(&self.yt_dlp_path, &args)
            .await
            .map_err(|e| DownloadError::from_spawn(e, 0))?;

        match code {
            Some(0) => Ok(()),
            other => Err(DownloadError::YtDlpFailed(other)),
        }
    }

    /// Fetch video metadata without downloading. Returns the first JSON object yt-dlp prints.
    pub async fn fetch_info(&self, url: &str) -> Result<serde_json::Value, DownloadError> {
        warn_if_unrecognized(url);

        let output = self
            .runner
            .output(&self.yt_dlp_path, &Self::info_args(url), Some(self.info_timeout))
            .await
            .map_err(|e| DownloadError::from_spawn(e, self.info_timeout.as_secs()))?;

        if !output.success() {
            debug!("yt-dlp stderr: {}", output.stderr);
            return Err(DownloadError::YtDlpFailed(output.code));
        }

        let first_line = output
            .stdout
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .ok_or_else(|| DownloadError::NoInfo(url.to_string()))?;

        let info: serde_json::Value = serde_json::from_str(first_line)
            .map_err(|e| DownloadError::InfoParse(e.to_string()))?;

        if let Some(title) = info.get("title").and_then(|t| t.as_str()) {
            debug!("Fetched info: {}", title);
        }

        Ok(info)
    }
}
