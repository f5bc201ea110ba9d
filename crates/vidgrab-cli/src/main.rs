mod args;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let filter = match cli.verbose {
        0 => "vidgrab=info,vidgrab_core=info",
        1 => "vidgrab=debug,vidgrab_core=debug",
        2 => "vidgrab=trace,vidgrab_core=trace",
        _ => "trace",
    };

    // stdout carries JSON output, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Download { url, options } => commands::download::run(&url, &options, config).await,
        Commands::Audio { url, options } => commands::audio::run(&url, &options, config).await,
        Commands::Urls { input } => commands::urls::run(input.as_deref()).await,
        Commands::Doctor => commands::doctor::run(config).await,
        Commands::Config => commands::config::run(config).await,
    }
}
