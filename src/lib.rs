// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Casa - Smart-Home Dashboard Simulator
//!
//! Mock temperature, humidity and motion sensors drive simulated lights and
//! air conditioners in four rooms. In automatic mode the AC follows the
//! temperature and the lights follow simulated occupancy (hovering a room on
//! the floor plan).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌─────────────────────┐   ┌─────────────────┐
//! │ Sensor Generator │   │ Automatic Control   │   │  User (GUI /    │
//! │   every 2 s      │   │   tick every 0.5 s  │   │  hover, clicks) │
//! └────────┬─────────┘   └──────────┬──────────┘   └────────┬────────┘
//!          │ post                   │ post                  │ dispatch
//!          ▼                        ▼                       ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │           Engine (single writer, UI thread or headless task)    │
//! │   InteractionHandler · AutomaticController · StateStore         │
//! └────────────────────────────────┬────────────────────────────────┘
//!                                  │ notifications
//!                                  ▼
//!                      ┌───────────────────────┐
//!                      │ Presenter (GUI / log) │
//!                      └───────────────────────┘
//! ```

pub mod automation;
pub mod config;
pub mod core;
pub mod error;
pub mod home;
pub mod interaction;
pub mod runtime;
pub mod sensors;

#[cfg(feature = "gui")]
pub mod ui;

use serde::Serialize;

// Re-exports for convenience
pub use automation::AutomaticController;
pub use config::Config;
pub use self::core::{Command, CommandSender, Engine, Notification, Presenter, Scheduler, StateStore, Topic};
pub use error::{HomeError, HomeResult};
pub use home::{ActuatorId, Device, HomeSnapshot, OperationMode, Room, SensorField, SensorReading};
pub use interaction::{InteractionHandler, Outcome, UserAction};
pub use runtime::{run_headless, HomeRuntime};
pub use sensors::SensorGenerator;

/// Casa version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Casa name
pub const NAME: &str = "Casa";

/// Build info
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION.to_string(),
        target: std::env::consts::ARCH.to_string(),
        os: std::env::consts::OS.to_string(),
        features: enabled_features(),
    }
}

/// Build information
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    /// Version string
    pub version: String,
    /// Target architecture
    pub target: String,
    /// Operating system
    pub os: String,
    /// Enabled features
    pub features: Vec<String>,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{} {}-{}", self.version, self.os, self.target)?;
        if !self.features.is_empty() {
            write!(f, " [{}]", self.features.join(", "))?;
        }
        Ok(())
    }
}

fn enabled_features() -> Vec<String> {
    [("gui", cfg!(feature = "gui"))]
        .into_iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| name.to_string())
        .collect()
}
