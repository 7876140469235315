// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Casa - Smart-Home Dashboard Simulator
//!
//! Mock sensors, simulated lights and air conditioners, and an automatic mode
//! driven by temperature and hover occupancy on a floor plan.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use casa_sim::{build_info, Config, NAME, VERSION};

/// Casa - Smart-Home Dashboard Simulator
#[derive(Parser, Debug)]
#[command(name = "casa-sim")]
#[command(author = "Casa Project")]
#[command(version = VERSION)]
#[command(about = "Simulated smart-home dashboard with manual and automatic modes")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run in headless mode (no GUI)
    #[arg(long)]
    headless: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Seed the sensor generator for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Headless only: stop after this many seconds instead of waiting for Ctrl+C
    #[arg(long)]
    duration: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Read-only: an explicit --config, else the per-user file if one exists
    let (mut config, config_source) = Config::resolve(args.config.as_deref())?;

    // Initialize logging
    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🏠 {} v{} - Smart-Home Dashboard Simulator", NAME, VERSION);
    info!("Build: {}", build_info());
    match &config_source {
        Some(path) => info!("Configuration loaded from {:?}", path),
        None => info!("Using default configuration"),
    }

    // Override with command line args
    if let Some(seed) = args.seed {
        config.sensors.seed = Some(seed);
    }

    if args.headless {
        info!("Starting in headless mode...");
        let snapshot = casa_sim::run_headless(config, args.duration.map(Duration::from_secs))?;
        info!("Final state:\n{}", snapshot.to_json()?);
    } else {
        #[cfg(feature = "gui")]
        {
            info!("Starting dashboard...");
            casa_sim::ui::run_gui(config)?;
        }

        #[cfg(not(feature = "gui"))]
        {
            anyhow::bail!("GUI feature not enabled. Build with --features gui or use --headless");
        }
    }

    info!("{} shutdown complete", NAME);
    Ok(())
}
