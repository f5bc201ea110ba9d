//! Configuration management for vidgrab

use crate::audio::AudioFormat;
use crate::downloader::VideoQuality;
use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub output: OutputConfig,
    pub video: VideoConfig,
    pub audio: AudioConfig,
    pub info: InfoConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path to yt-dlp binary (auto-detected if not set)
    pub yt_dlp: Option<PathBuf>,
    /// Path to FFmpeg binary, passed to yt-dlp as --ffmpeg-location when set
    pub ffmpeg: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output directory
    pub default_directory: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Quality used when neither --format nor --quality is given
    pub default_quality: Option<VideoQuality>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    pub default_format: AudioFormat,
    /// Passed through to yt-dlp --audio-quality
    pub default_quality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoConfig {
    /// Timeout for --info-only metadata lookups
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            output: OutputConfig {
                default_directory: PathBuf::from("."),
            },
            video: VideoConfig::default(),
            audio: AudioConfig {
                default_format: AudioFormat::Mp3,
                default_quality: "192".to_string(),
            },
            info: InfoConfig { timeout_secs: 30 },
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Load from default config directory
        if let Some(default_config) = Self::default_config_file() {
            if default_config.exists() {
                figment = figment.merge(Toml::file(&default_config));
            }
        }

        // Load from specified config file
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ConfigError::LoadError(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }

        // Nested keys use a double underscore: VIDGRAB_PATHS__YT_DLP
        figment = figment.merge(Env::prefixed("VIDGRAB_").split("__"));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("vidgrab/config.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.info.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "info.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.audio.default_quality.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "audio.default_quality must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Get yt-dlp path, auto-detecting if not configured
    pub fn yt_dlp_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.paths.yt_dlp {
            Ok(path.clone())
        } else {
            which::which("yt-dlp")
                .map_err(|_| ConfigError::InvalidValue("yt-dlp not found in PATH".to_string()))
        }
    }

    pub fn info_timeout(&self) -> Duration {
        Duration::from_secs(self.info.timeout_secs)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.default_directory, PathBuf::from("."));
        assert_eq!(config.audio.default_format, AudioFormat::Mp3);
        assert_eq!(config.audio.default_quality, "192");
        assert_eq!(config.info_timeout(), Duration::from_secs(30));
        assert!(config.video.default_quality.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[paths]
yt_dlp = "/opt/bin/yt-dlp"

[video]
default_quality = "720p"

[audio]
default_format = "flac"

[info]
timeout_secs = 5
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.paths.yt_dlp, Some(PathBuf::from("/opt/bin/yt-dlp")));
        assert_eq!(config.video.default_quality, Some(VideoQuality::P720));
        assert_eq!(config.audio.default_format, AudioFormat::Flac);
        assert_eq!(config.audio.default_quality, "192");
        assert_eq!(config.info.timeout_secs, 5);
        assert_eq!(config.yt_dlp_path().unwrap(), PathBuf::from("/opt/bin/yt-dlp"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[info]\ntimeout_secs = 0").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::load(Some(Path::new("/nonexistent/vidgrab.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn test_to_toml() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("[audio]"));
        assert!(rendered.contains("default_format = \"mp3\""));
        assert!(rendered.contains("timeout_secs = 30"));
    }
}
