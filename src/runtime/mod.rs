// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Runtime wiring - background tasks, headless loop and shutdown

mod log_presenter;

pub use log_presenter::LogPresenter;

use std::time::Duration;

use anyhow::Result;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::automation;
use crate::config::Config;
use crate::core::{Engine, Scheduler};
use crate::home::HomeSnapshot;
use crate::sensors::SensorGenerator;

/// Extra wait on top of the longest task period when joining at shutdown
const SHUTDOWN_MARGIN: Duration = Duration::from_millis(250);

/// Tokio runtime plus the two periodic producers
pub struct HomeRuntime {
    config: Config,
    runtime: tokio::runtime::Runtime,
    scheduler: Scheduler,
}

impl HomeRuntime {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("casa-worker")
            .enable_all()
            .build()?;
        let scheduler = Scheduler::new(runtime.handle().clone());

        Ok(Self {
            config,
            runtime,
            scheduler,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Start the sensor generator and the automatic-control tick for `engine`
    pub fn start(&self, engine: &Engine) {
        SensorGenerator::new(&self.config.sensors).spawn(&self.scheduler, engine.sender(), &self.config.sensors);
        automation::schedule(&self.scheduler, engine.sender(), self.config.automation.period());
        info!("Background tasks started: {:?}", self.scheduler.task_names());
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Stop the periodic tasks and tear the runtime down; joining is best-effort
    pub fn shutdown(self) {
        let grace = self.scheduler.longest_period().unwrap_or_default() + SHUTDOWN_MARGIN;
        let clean = self.runtime.block_on(self.scheduler.shutdown(grace));
        info!("Background tasks stopped ({} clean)", clean);
        self.runtime.shutdown_timeout(SHUTDOWN_MARGIN);
    }
}

/// Run without a window until Ctrl+C or `duration` elapses.
/// Returns the final state.
pub fn run_headless(config: Config, duration: Option<Duration>) -> Result<HomeSnapshot> {
    let runtime = HomeRuntime::new(config)?;
    let mut engine = Engine::new(runtime.config());
    engine.store_mut().attach(LogPresenter::default());
    runtime.start(&engine);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    runtime.block_on(async {
        let signal = async move {
            match duration {
                Some(duration) => {
                    tokio::select! {
                        _ = tokio::time::sleep(duration) => info!("Run duration of {:?} elapsed", duration),
                        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
                    }
                }
                None => {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        warn!("Cannot listen for Ctrl+C ({}); stopping", e);
                    } else {
                        info!("Shutdown signal received");
                    }
                }
            }
            let _ = shutdown_tx.send(());
        };

        tokio::join!(engine.run(shutdown_rx), signal);
    });

    let snapshot = engine.store().snapshot();
    runtime.shutdown();
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::home::OperationMode;

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.sensors.period_ms = 20;
        config.sensors.seed = Some(3);
        config.automation.period_ms = 10;
        config
    }

    #[test]
    fn test_headless_run_produces_readings() {
        let snapshot = run_headless(fast_config(), Some(Duration::from_millis(120))).unwrap();

        assert_eq!(snapshot.mode, OperationMode::Manual);
        assert!(snapshot.sensors.updated_at.is_some());
        assert!((18.0..=35.0).contains(&snapshot.sensors.temperature));
        assert!(snapshot.actuators.iter().all(|a| !a.on));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.sensors.temperature_min = 40.0;
        assert!(HomeRuntime::new(config).is_err());
    }

    #[test]
    fn test_runtime_start_and_shutdown() {
        let runtime = HomeRuntime::new(fast_config()).unwrap();
        let mut engine = Engine::new(runtime.config());
        runtime.start(&engine);
        assert_eq!(runtime.scheduler().task_names().len(), 2);

        std::thread::sleep(Duration::from_millis(60));
        runtime.shutdown();

        assert!(engine.pump() > 0);
        assert!(engine.store().sensors().updated_at.is_some());
    }
}
