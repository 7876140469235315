// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Single-writer engine - every state mutation funnels through here

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, trace};

use super::store::StateStore;
use crate::automation::AutomaticController;
use crate::config::Config;
use crate::error::{HomeError, HomeResult};
use crate::interaction::{InteractionHandler, Outcome, UserAction};

/// State mutation posted to the engine's thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Fresh generator output
    SensorSample {
        temperature: f64,
        humidity: f64,
        at: DateTime<Utc>,
    },
    /// Automatic controller tick
    EvaluateAutomation,
    User(UserAction),
}

/// Cloneable, non-blocking handle for posting commands from any thread
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<Command>,
}

impl CommandSender {
    pub fn post(&self, command: Command) -> HomeResult<()> {
        self.tx.send(command).map_err(|_| HomeError::Shutdown)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owns the state store and applies commands one at a time
pub struct Engine {
    store: StateStore,
    controller: AutomaticController,
    interaction: InteractionHandler,
    tx: mpsc::UnboundedSender<Command>,
    rx: mpsc::UnboundedReceiver<Command>,
    applied: u64,
}

impl Engine {
    pub fn new(config: &Config) -> Self {
        Self::with_controller(AutomaticController::from_config(&config.automation))
    }

    pub fn with_controller(controller: AutomaticController) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            store: StateStore::new(),
            controller,
            interaction: InteractionHandler::new(controller),
            tx,
            rx,
            applied: 0,
        }
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender { tx: self.tx.clone() }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Mutable access for registering observers
    pub fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    pub fn controller(&self) -> &AutomaticController {
        &self.controller
    }

    /// Number of commands applied so far
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Apply a user action immediately; for callers already on the engine's thread
    pub fn dispatch(&mut self, action: UserAction) -> Outcome {
        self.applied += 1;
        self.interaction.handle(&mut self.store, action)
    }

    pub fn apply(&mut self, command: Command) {
        trace!("apply {:?}", command);

        match command {
            Command::SensorSample { temperature, humidity, at } => {
                self.store.set_temperature(temperature);
                self.store.set_humidity(humidity);
                self.store.mark_refreshed(at);
                debug!("sensors: {:.1}°C, {:.1}%", temperature, humidity);
            }
            Command::EvaluateAutomation => {
                self.controller.apply(&mut self.store);
            }
            Command::User(action) => {
                self.interaction.handle(&mut self.store, action);
            }
        }

        self.applied += 1;
    }

    /// Apply everything queued so far without waiting. Returns the number applied.
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        while let Ok(command) = self.rx.try_recv() {
            self.apply(command);
            count += 1;
        }
        count
    }

    /// Apply commands as they arrive until shutdown is signalled
    pub async fn run(&mut self, mut shutdown: broadcast::Receiver<()>) {
        info!("Engine running");

        loop {
            tokio::select! {
                Some(command) = self.rx.recv() => {
                    self.apply(command);
                }
                _ = shutdown.recv() => {
                    info!("Engine shutting down...");
                    break;
                }
            }
        }

        let leftover = self.pump();
        debug!("Engine stopped after {} commands ({} drained at shutdown)", self.applied, leftover);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::home::{ActuatorId, OperationMode, Room};
    use std::time::Duration;

    #[test]
    fn test_pump_applies_in_post_order() {
        let mut engine = Engine::new(&Config::default());
        let sender = engine.sender();

        sender
            .post(Command::User(UserAction::ToggleActuator { actuator: ActuatorId::KitchenLight, on: true }))
            .unwrap();
        sender
            .post(Command::User(UserAction::ToggleActuator { actuator: ActuatorId::KitchenLight, on: false }))
            .unwrap();
        sender
            .post(Command::User(UserAction::ToggleActuator { actuator: ActuatorId::KitchenLight, on: true }))
            .unwrap();

        assert!(!engine.store().actuator(ActuatorId::KitchenLight));
        assert_eq!(engine.pump(), 3);
        assert!(engine.store().actuator(ActuatorId::KitchenLight));
        assert_eq!(engine.pump(), 0);
    }

    #[test]
    fn test_sensor_sample_then_automation() {
        let mut engine = Engine::new(&Config::default());
        engine.dispatch(UserAction::SetMode(OperationMode::Automatic));
        let at = Utc::now();

        engine.apply(Command::SensorSample { temperature: 30.0, humidity: 45.2, at });
        engine.apply(Command::EvaluateAutomation);

        let sensors = engine.store().sensors();
        assert_eq!(sensors.temperature, 30.0);
        assert_eq!(sensors.humidity, 45.2);
        assert_eq!(sensors.updated_at, Some(at));
        assert!(engine.store().actuator(ActuatorId::LivingRoomAc));
        assert!(!engine.store().actuator(ActuatorId::BedroomAc));
    }

    #[test]
    fn test_automation_reads_latest_temperature() {
        let mut engine = Engine::new(&Config::default());
        let sender = engine.sender();
        engine.dispatch(UserAction::SetMode(OperationMode::Automatic));
        engine.dispatch(UserAction::RoomHoverEnter(Room::Bedroom));

        sender
            .post(Command::SensorSample { temperature: 31.0, humidity: 50.0, at: Utc::now() })
            .unwrap();
        sender
            .post(Command::SensorSample { temperature: 19.0, humidity: 50.0, at: Utc::now() })
            .unwrap();
        sender.post(Command::EvaluateAutomation).unwrap();
        engine.pump();

        assert!(!engine.store().actuator(ActuatorId::LivingRoomAc));
        assert!(!engine.store().actuator(ActuatorId::BedroomAc));
    }

    #[tokio::test]
    async fn test_run_until_shutdown() {
        let mut engine = Engine::new(&Config::default());
        let sender = engine.sender();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let handle = tokio::spawn(async move {
            engine.run(shutdown_rx).await;
            engine
        });

        sender.post(Command::User(UserAction::MotionIndicatorEnter)).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown_tx.send(()).unwrap();

        let engine = handle.await.unwrap();
        assert!(engine.store().motion());
        assert_eq!(engine.applied(), 1);
    }

    #[test]
    fn test_sender_reports_shutdown() {
        let engine = Engine::new(&Config::default());
        let sender = engine.sender();
        drop(engine);

        assert!(sender.is_closed());
        assert!(matches!(sender.post(Command::EvaluateAutomation), Err(HomeError::Shutdown)));
    }
}
