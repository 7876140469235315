// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Presenter that renders state changes as log lines

use chrono::{DateTime, Local, Utc};
use tracing::{debug, info, trace};

use crate::core::Presenter;
use crate::home::{ActuatorId, ActuatorStates, Device, OperationMode, Room, SensorField};

/// Logs at `info` only when a value actually changes; repeated writes go to `trace`.
#[derive(Debug, Default)]
pub struct LogPresenter {
    actuators: ActuatorStates,
    motion: bool,
}

impl Presenter for LogPresenter {
    fn on_sensor_changed(&mut self, field: SensorField, value: f64) {
        debug!("{}: {:.1}{}", field, value, field.unit());
    }

    fn on_sensors_refreshed(&mut self, at: DateTime<Utc>) {
        trace!("sensors refreshed at {}", at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"));
    }

    fn on_actuator_changed(&mut self, room: Room, device: Device, on: bool) {
        let Ok(id) = ActuatorId::try_from((room, device)) else {
            return;
        };

        if self.actuators.get(id) != on {
            self.actuators.set(id, on);
            info!("{} {}", id, if on { "ON" } else { "OFF" });
        } else {
            trace!("{} still {}", id, if on { "ON" } else { "OFF" });
        }
    }

    fn on_mode_changed(&mut self, mode: OperationMode) {
        info!("Mode: {}", mode);
    }

    fn on_motion_changed(&mut self, motion: bool) {
        if self.motion != motion {
            self.motion = motion;
            info!("Motion: {}", if motion { "detected" } else { "none" });
        }
    }
}
