// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! State store - the single owner of sensor, actuator and mode values

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use super::contract_violation;
use super::event_bus::{Event, EventBus, Notification, Presenter, SubscriptionId, Topic};
use crate::home::{
    ActuatorId, ActuatorStates, Device, HomeSnapshot, OperationMode, Room, SensorField, SensorReading,
};

/// Every setter publishes exactly one notification for the element it wrote,
/// whether or not the value changed.
pub struct StateStore {
    sensors: SensorReading,
    actuators: ActuatorStates,
    mode: OperationMode,
    bus: EventBus,
}

impl StateStore {
    pub fn new() -> Self {
        Self::with_bus(EventBus::default())
    }

    pub fn with_bus(bus: EventBus) -> Self {
        Self {
            sensors: SensorReading::default(),
            actuators: ActuatorStates::default(),
            mode: OperationMode::default(),
            bus,
        }
    }

    // Reads

    pub fn temperature(&self) -> f64 {
        self.sensors.temperature
    }

    pub fn humidity(&self) -> f64 {
        self.sensors.humidity
    }

    pub fn motion(&self) -> bool {
        self.sensors.motion
    }

    pub fn sensors(&self) -> SensorReading {
        self.sensors
    }

    pub fn actuator(&self, id: ActuatorId) -> bool {
        self.actuators.get(id)
    }

    pub fn actuators(&self) -> ActuatorStates {
        self.actuators
    }

    pub fn mode(&self) -> OperationMode {
        self.mode
    }

    pub fn snapshot(&self) -> HomeSnapshot {
        HomeSnapshot::new(self.mode, self.sensors, &self.actuators)
    }

    // Observers

    pub fn subscribe<F>(&mut self, topic: Topic, callback: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + Send + 'static,
    {
        self.bus.subscribe(topic, callback)
    }

    pub fn attach<P>(&mut self, presenter: P) -> SubscriptionId
    where
        P: Presenter + 'static,
    {
        self.bus.attach(presenter)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn subscribe_stream(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe_stream()
    }

    // Writes

    pub fn set_temperature(&mut self, value: f64) {
        self.set_sensor(SensorField::Temperature, value);
    }

    pub fn set_humidity(&mut self, value: f64) {
        self.set_sensor(SensorField::Humidity, value);
    }

    pub fn set_sensor(&mut self, field: SensorField, value: f64) {
        match field {
            SensorField::Temperature => self.sensors.temperature = value,
            SensorField::Humidity => self.sensors.humidity = value,
        }
        self.bus.publish(Notification::SensorChanged { field, value });
    }

    pub fn mark_refreshed(&mut self, at: DateTime<Utc>) {
        self.sensors.updated_at = Some(at);
        self.bus.publish(Notification::SensorsRefreshed { at });
    }

    pub fn set_motion(&mut self, motion: bool) {
        self.sensors.motion = motion;
        self.bus.publish(Notification::MotionChanged(motion));
    }

    pub fn set_actuator(&mut self, actuator: ActuatorId, on: bool) {
        self.actuators.set(actuator, on);
        self.bus.publish(Notification::ActuatorChanged { actuator, on });
    }

    /// Write by room and device. Kitchen/bathroom AC is a caller bug:
    /// panics in debug builds, ignored in release. Returns whether anything was written.
    pub fn set_actuator_pair(&mut self, room: Room, device: Device, on: bool) -> bool {
        match ActuatorId::try_from((room, device)) {
            Ok(id) => {
                self.set_actuator(id, on);
                true
            }
            Err(err) => {
                contract_violation(&err);
                false
            }
        }
    }

    pub fn reset_actuators(&mut self) {
        for id in ActuatorId::ALL {
            self.set_actuator(id, false);
        }
    }

    pub fn set_mode(&mut self, mode: OperationMode) {
        self.mode = mode;
        self.bus.publish(Notification::ModeChanged(mode));
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recording_store() -> (StateStore, Arc<Mutex<Vec<Notification>>>) {
        let mut store = StateStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for topic in [Topic::Sensor, Topic::Actuator, Topic::Mode, Topic::Motion] {
            let sink = seen.clone();
            store.subscribe(topic, move |n| sink.lock().push(n.clone()));
        }
        (store, seen)
    }

    #[test]
    fn test_initial_state() {
        let store = StateStore::new();
        assert_eq!(store.mode(), OperationMode::Manual);
        assert_eq!(store.temperature(), 25.0);
        assert_eq!(store.humidity(), 50.0);
        assert!(!store.motion());
        assert!(store.actuators().all_off());
        assert!(store.sensors().updated_at.is_none());
    }

    #[test]
    fn test_every_write_notifies_once() {
        let (mut store, seen) = recording_store();

        store.set_temperature(30.0);
        store.set_temperature(30.0);
        store.set_actuator(ActuatorId::KitchenLight, true);
        store.set_motion(true);
        store.set_mode(OperationMode::Automatic);

        let seen = seen.lock();
        assert_eq!(seen.len(), 5);
        assert_eq!(seen[0], seen[1]);
        assert_eq!(seen[2], Notification::ActuatorChanged { actuator: ActuatorId::KitchenLight, on: true });
        assert_eq!(seen[4], Notification::ModeChanged(OperationMode::Automatic));
    }

    #[test]
    fn test_reset_turns_everything_off() {
        let (mut store, seen) = recording_store();
        for id in ActuatorId::ALL {
            store.set_actuator(id, true);
        }
        seen.lock().clear();

        store.reset_actuators();

        assert!(store.actuators().all_off());
        assert_eq!(seen.lock().len(), ActuatorId::ALL.len());
    }

    #[test]
    fn test_set_pair_writes_valid_actuator() {
        let mut store = StateStore::new();
        assert!(store.set_actuator_pair(Room::Bedroom, Device::Ac, true));
        assert!(store.actuator(ActuatorId::BedroomAc));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "contract violation")]
    fn test_kitchen_ac_is_fatal_in_debug() {
        let mut store = StateStore::new();
        store.set_actuator_pair(Room::Kitchen, Device::Ac, true);
    }

    #[test]
    fn test_refresh_timestamp() {
        let (mut store, seen) = recording_store();
        let at = Utc::now();
        store.mark_refreshed(at);
        assert_eq!(store.sensors().updated_at, Some(at));
        assert_eq!(seen.lock()[0].topic(), Topic::Sensor);
    }
}
