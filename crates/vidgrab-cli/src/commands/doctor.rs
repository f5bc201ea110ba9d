use anyhow::{bail, Result};
use std::path::Path;

use vidgrab_core::{
    config::Config,
    runner::SystemRunner,
    scanner::{is_video_url, scan},
    tools::{check_tool, install_hint, ToolStatus},
};

const SCAN_SAMPLES: &[(&str, usize)] = &[
    ("Check out https://youtube.com/watch?v=test", 1),
    ("Multiple: https://youtu.be/abc and https://vimeo.com/123", 2),
    ("No video links here", 0),
];

const CLASSIFY_SAMPLES: &[(&str, bool)] = &[
    ("https://youtube.com/watch?v=abc", true),
    ("https://youtu.be/xyz", true),
    ("https://twitter.com/user/status/123", true),
    ("https://example.com/video.mp4", false),
    ("https://google.com", false),
];

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let runner = SystemRunner;

    println!("vidgrab dependency check\n");

    let yt_dlp = check_tool(&runner, "yt-dlp", config.paths.yt_dlp.as_deref(), "--version").await;
    report("yt-dlp", &yt_dlp);

    let ffmpeg = check_tool(&runner, "ffmpeg", config.paths.ffmpeg.as_deref(), "-version").await;
    report("ffmpeg", &ffmpeg);

    println!("\nURL scanner self-check:");
    let mut scanner_ok = true;
    for (text, expected) in SCAN_SAMPLES {
        let found = scan(text).len();
        let ok = found == *expected;
        scanner_ok &= ok;
        println!(
            "  {} found {} URL(s) in: '{}'",
            if ok { "OK  " } else { "FAIL" },
            found,
            text
        );
    }
    for (url, expected) in CLASSIFY_SAMPLES {
        let ok = is_video_url(url) == *expected;
        scanner_ok &= ok;
        println!(
            "  {} {} is {}",
            if ok { "OK  " } else { "FAIL" },
            url,
            if *expected { "video" } else { "non-video" }
        );
    }

    println!();
    if !(yt_dlp.is_ok() && ffmpeg.is_ok()) {
        bail!("Some dependencies are missing. See above for installation instructions.");
    }
    if !scanner_ok {
        bail!("URL scanner self-check failed");
    }
    println!("All dependencies OK!");

    Ok(())
}

fn report(name: &str, status: &ToolStatus) {
    match status {
        ToolStatus::Found { path, version } => {
            println!("{:<8} OK ({}) at {}", format!("{}:", name), version, path.display());
        }
        ToolStatus::Broken { path } => {
            println!("{:<8} FOUND at {} but failed to get version", format!("{}:", name), path.display());
        }
        ToolStatus::Missing => {
            println!("{:<8} NOT FOUND", format!("{}:", name));
            if let Some(hint) = install_hint(name) {
                println!("         {}", hint);
            }
        }
    }
}
