//! Audio extraction via yt-dlp post-processing (FFmpeg does the conversion)

use crate::downloader::{output_template, warn_if_unrecognized};
use crate::error::DownloadError;
use crate::runner::CommandRunner;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Source selector: prefer m4a so mp3/m4a conversions start from AAC
const AUDIO_SOURCE_FORMAT: &str = "bestaudio[ext=m4a]/bestaudio";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    M4a,
    Opus,
    Flac,
    Wav,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
            AudioFormat::Opus => "opus",
            AudioFormat::Flac => "flac",
            AudioFormat::Wav => "wav",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone)]
pub struct AudioRequest {
    pub url: String,
    pub output_dir: PathBuf,
    pub format: AudioFormat,
    /// yt-dlp --audio-quality value: a VBR level (0-10) or a bitrate such as `192`
    pub quality: String,
}

pub struct AudioExtractor {
    runner: Arc<dyn CommandRunner>,
    yt_dlp_path: PathBuf,
    ffmpeg_location: Option<PathBuf>,
}

impl AudioExtractor {
    pub fn new(runner: Arc<dyn CommandRunner>, yt_dlp_path: PathBuf) -> Self {
        Self {
            runner,
            yt_dlp_path,
            ffmpeg_location: None,
        }
    }

    pub fn with_ffmpeg_location(mut self, ffmpeg: Option<PathBuf>) -> Self {
        self.ffmpeg_location = ffmpeg;
        self
    }

    pub fn audio_args(&self, req: &AudioRequest) -> Vec<String> {
        let ext = req.format.extension();

        let mut args = vec![
            req.url.clone(),
            "-o".to_string(),
            output_template(&req.output_dir, ext),
            "-f".to_string(),
            AUDIO_SOURCE_FORMAT.to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            ext.to_string(),
            "--audio-quality".to_string(),
            req.quality.clone(),
            "--write-info-json".to_string(),
            "--write-thumbnail".to_string(),
        ];

        if let Some(ref ffmpeg) = self.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(ffmpeg.to_string_lossy().into_owned());
        }

        args
    }

    /// Download the best audio stream and convert it to `req.format`
    pub async fn extract(&self, req: &AudioRequest) -> Result<(), DownloadError> {
        warn_if_unrecognized(&req.url);

        info!("Extracting audio from: {}", req.url);
        info!("Output format: {}", req.format);
        info!("Output directory: {}", req.output_dir.display());

        let code = self
            .runner
            .status(&self.yt_dlp_path, &self.audio_args(req))
            .await
            .map_err(|e| DownloadError::from_spawn(e, 0))?;

        match code {
            Some(0) => Ok(()),
            other => Err(DownloadError::YtDlpFailed(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::RecordingRunner;

    fn request(format: AudioFormat) -> AudioRequest {
        AudioRequest {
            url: "https://youtu.be/xyz".to_string(),
            output_dir: PathBuf::from("music"),
            format,
            quality: "192".to_string(),
        }
    }

    #[test]
    fn test_audio_args() {
        let extractor = AudioExtractor::new(
            Arc::new(RecordingRunner::default()),
            PathBuf::from("yt-dlp"),
        );
        assert_eq!(
            extractor.audio_args(&request(AudioFormat::Flac)),
            vec![
                "https://youtu.be/xyz",
                "-o",
                "music/%(title)s.flac",
                "-f",
                "bestaudio[ext=m4a]/bestaudio",
                "--extract-audio",
                "--audio-format",
                "flac",
                "--audio-quality",
                "192",
                "--write-info-json",
                "--write-thumbnail",
            ]
        );
    }

    #[test]
    fn test_audio_args_ffmpeg_location() {
        let extractor = AudioExtractor::new(
            Arc::new(RecordingRunner::default()),
            PathBuf::from("yt-dlp"),
        )
        .with_ffmpeg_location(Some(PathBuf::from("/usr/local/bin/ffmpeg")));
        let args = extractor.audio_args(&request(AudioFormat::Mp3));
        assert_eq!(
            &args[args.len() - 2..],
            ["--ffmpeg-location", "/usr/local/bin/ffmpeg"]
        );
    }

    #[test]
    fn test_format_names() {
        assert_eq!(AudioFormat::default(), AudioFormat::Mp3);
        assert_eq!(AudioFormat::M4a.to_string(), "m4a");
        assert_eq!(AudioFormat::Opus.extension(), "opus");
        assert_eq!(AudioFormat::Wav.extension(), "wav");
    }

    #[tokio::test]
    async fn test_extract_success_and_failure() {
        let runner = Arc::new(RecordingRunner::replying(0, ""));
        let extractor = AudioExtractor::new(runner.clone(), PathBuf::from("/bin/yt-dlp"));
        extractor.extract(&request(AudioFormat::Opus)).await.unwrap();
        assert_eq!(runner.calls()[0].0, PathBuf::from("/bin/yt-dlp"));

        let failing = AudioExtractor::new(
            Arc::new(RecordingRunner::replying(1, "")),
            PathBuf::from("yt-dlp"),
        );
        let err = failing.extract(&request(AudioFormat::Opus)).await.unwrap_err();
        assert!(matches!(err, DownloadError::YtDlpFailed(Some(1))));
    }
}
