//! vidgrab-core: URL scanning and yt-dlp orchestration for vidgrab

pub mod audio;
pub mod config;
pub mod downloader;
pub mod error;
pub mod runner;
pub mod scanner;
pub mod tools;

pub use config::Config;
pub use scanner::{is_video_url, scan};
