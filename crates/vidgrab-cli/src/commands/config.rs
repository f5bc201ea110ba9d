use anyhow::Result;
use std::path::Path;
use vidgrab_core::config::Config;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("vidgrab configuration\n");
    print!("{}", config.to_toml()?);

    if config.paths.yt_dlp.is_none() {
        println!("# paths.yt_dlp: auto-detect from PATH");
    }
    if config.paths.ffmpeg.is_none() {
        println!("# paths.ffmpeg: left to yt-dlp");
    }

    // Show config file locations
    println!("\nConfig sources (later entries override earlier ones):");
    println!("  1. Built-in defaults");
    if let Some(default_file) = Config::default_config_file() {
        println!("  2. {}", default_file.display());
    }
    if let Some(p) = config_path {
        println!("  3. {} (specified)", p.display());
    }
    println!("  4. Environment variables (VIDGRAB_*, nested keys joined with __)");

    Ok(())
}
