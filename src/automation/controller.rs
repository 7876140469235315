// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Temperature-driven air conditioning

use std::time::Duration;

use tracing::debug;

use crate::config::AutomationConfig;
use crate::core::{Command, CommandSender, Scheduler, StateStore};
use crate::home::{ActuatorId, OperationMode};

/// Strict threshold in degrees Celsius above which AC runs
pub const DEFAULT_AC_THRESHOLD: f64 = 28.0;

/// AC decision for the two rooms that have one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcPlan {
    pub living_room: bool,
    pub bedroom: bool,
}

/// Derives AC state from the latest temperature while the house is in automatic mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutomaticController {
    threshold: f64,
}

impl AutomaticController {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &AutomationConfig) -> Self {
        Self::new(config.ac_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_hot(&self, temperature: f64) -> bool {
        temperature > self.threshold
    }

    /// Bedroom AC additionally requires the bedroom light, used as a presence proxy
    pub fn plan(&self, temperature: f64, bedroom_light: bool) -> AcPlan {
        let hot = self.is_hot(temperature);
        AcPlan {
            living_room: hot,
            bedroom: hot && bedroom_light,
        }
    }

    /// Overwrite both AC actuators in automatic mode; manual mode is left untouched.
    pub fn apply(&self, store: &mut StateStore) -> Option<AcPlan> {
        if store.mode() != OperationMode::Automatic {
            return None;
        }

        let plan = self.plan(store.temperature(), store.actuator(ActuatorId::BedroomLight));
        store.set_actuator(ActuatorId::LivingRoomAc, plan.living_room);
        store.set_actuator(ActuatorId::BedroomAc, plan.bedroom);

        debug!(
            "automation at {:.1}°C: living room AC {}, bedroom AC {}",
            store.temperature(),
            plan.living_room,
            plan.bedroom
        );
        Some(plan)
    }
}

impl Default for AutomaticController {
    fn default() -> Self {
        Self::new(DEFAULT_AC_THRESHOLD)
    }
}

/// Register the evaluation tick. Evaluation itself happens on the engine so it
/// always reads the latest stored temperature.
pub fn schedule(scheduler: &Scheduler, sender: CommandSender, period: Duration) {
    scheduler.spawn_periodic("automatic-control", period, sender, || {
        Some(Command::EvaluateAutomation)
    });
}
