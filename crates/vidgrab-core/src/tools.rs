//! External tool detection for `vidgrab doctor`

use crate::runner::CommandRunner;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// Binary ran and reported a version
    Found { path: PathBuf, version: String },
    /// Binary exists but the version probe failed
    Broken { path: PathBuf },
    Missing,
}

impl ToolStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, ToolStatus::Found { .. })
    }
}

/// Install hint shown for a missing tool
pub fn install_hint(name: &str) -> Option<&'static str> {
    match name {
        "yt-dlp" => Some("Install with: pip install yt-dlp"),
        "ffmpeg" => Some(
            "Install with: brew install ffmpeg (macOS) or apt install ffmpeg (Linux)",
        ),
        _ => None,
    }
}

/// Resolve `name` (or the configured override) and probe it with `version_arg`.
pub async fn check_tool(
    runner: &dyn CommandRunner,
    name: &str,
    configured: Option<&Path>,
    version_arg: &str,
) -> ToolStatus {
    let path = match configured {
        Some(p) => p.to_path_buf(),
        None => match which::which(name) {
            Ok(p) => p,
            Err(_) => return ToolStatus::Missing,
        },
    };

    match runner
        .output(&path, &[version_arg.to_string()], Some(VERSION_TIMEOUT))
        .await
    {
        Ok(out) if out.success() => {
            let version = out.stdout.lines().next().unwrap_or("").trim().to_string();
            ToolStatus::Found { path, version }
        }
        Ok(out) => {
            debug!("{} {} exited with {:?}", name, version_arg, out.code);
            ToolStatus::Broken { path }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => ToolStatus::Missing,
        Err(e) => {
            debug!("{} {} failed: {}", name, version_arg, e);
            ToolStatus::Broken { path }
        }
    }
}
