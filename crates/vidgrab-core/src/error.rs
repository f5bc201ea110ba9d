//! Error types for vidgrab-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("yt-dlp not found. Install with: pip install yt-dlp")]
    YtDlpNotFound,

    #[error("yt-dlp failed: {}", describe_exit(.0))]
    YtDlpFailed(Option<i32>),

    #[error("yt-dlp timed out after {0} seconds")]
    Timeout(u64),

    #[error("No video info returned for: {0}")]
    NoInfo(String),

    #[error("Failed to parse video info: {0}")]
    InfoParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl DownloadError {
    /// Classify a spawn/wait failure from the command runner.
    pub(crate) fn from_spawn(err: std::io::Error, timeout_secs: u64) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => DownloadError::YtDlpNotFound,
            std::io::ErrorKind::TimedOut => DownloadError::Timeout(timeout_secs),
            _ => DownloadError::Io(err),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
