//! APRS Monitor - terminal console for an APRS radio backend
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::path::PathBuf;

use clap::Parser;

use aprs_monitor::resolve_settings;
use aprsmon_app::config::{default_config_path, init_config_file};
use aprsmon_core::prelude::*;

/// APRS Monitor - live status, messages and configuration for an APRS backend
#[derive(Parser, Debug)]
#[command(name = "aprsmon")]
#[command(about = "Terminal monitoring console for an APRS radio backend", long_about = None)]
struct Args {
    /// Backend base URL (overrides the settings file)
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Settings file (default: <config_dir>/aprs-monitor/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run in headless mode (NDJSON output, no TUI)
    #[arg(long)]
    headless: bool,

    /// Write a default settings file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    aprsmon_core::logging::init()?;

    let config_path = args.config.or_else(default_config_path);

    if args.init_config {
        let Some(path) = config_path else {
            eprintln!("❌ Could not determine a settings directory; pass --config <PATH>");
            std::process::exit(1);
        };
        if init_config_file(&path)? {
            eprintln!("✅ Wrote default settings to {}", path.display());
        } else {
            eprintln!("Settings file already exists: {}", path.display());
        }
        return Ok(());
    }

    let settings = resolve_settings(config_path.as_deref(), args.url);
    info!("Backend URL: {}", settings.backend.url);

    let result = if args.headless {
        aprs_monitor::run_headless(settings).await
    } else {
        aprs_monitor::run(settings).await
    };

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
        eprintln!(
            "aprsmon exited with an error; details in {}.*",
            aprsmon_core::logging::log_file_path().display()
        );
    }

    info!("APRS monitor exiting");
    result
}
