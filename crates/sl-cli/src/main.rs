use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sl_cli::commands::report::{self, Outcome};
use sl_cli::{Cli, Config, OutputFormat};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if cli.strict {
        config.strict = true;
    }
    if cli.json {
        config.format = OutputFormat::Json;
    }
    tracing::debug!(?config, "loaded configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut rejected = false;

    for path in &cli.files {
        if report::run(&mut out, path, &config)? == Outcome::Rejected {
            rejected = true;
        }
    }
    out.flush()?;

    Ok(if rejected {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
