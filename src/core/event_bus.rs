// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Change notifications from the state store to the presentation layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use crate::home::{ActuatorId, Device, OperationMode, Room, SensorField};

/// Subscription topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Sensor,
    Actuator,
    Mode,
    Motion,
}

/// A single state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notification {
    SensorChanged { field: SensorField, value: f64 },
    SensorsRefreshed { at: DateTime<Utc> },
    ActuatorChanged { actuator: ActuatorId, on: bool },
    ModeChanged(OperationMode),
    MotionChanged(bool),
}

impl Notification {
    pub fn topic(&self) -> Topic {
        match self {
            Notification::SensorChanged { .. } | Notification::SensorsRefreshed { .. } => Topic::Sensor,
            Notification::ActuatorChanged { .. } => Topic::Actuator,
            Notification::ModeChanged(_) => Topic::Mode,
            Notification::MotionChanged(_) => Topic::Motion,
        }
    }
}

/// Sequenced notification as delivered to stream subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub notification: Notification,
}

/// Rendering side of the store.
///
/// Implementors redraw whatever shows the affected element.
pub trait Presenter: Send {
    fn on_sensor_changed(&mut self, field: SensorField, value: f64);

    fn on_sensors_refreshed(&mut self, _at: DateTime<Utc>) {}

    fn on_actuator_changed(&mut self, room: Room, device: Device, on: bool);

    fn on_mode_changed(&mut self, mode: OperationMode);

    fn on_motion_changed(&mut self, motion: bool);
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn on_sensor_changed(&mut self, field: SensorField, value: f64) {
        (**self).on_sensor_changed(field, value)
    }

    fn on_sensors_refreshed(&mut self, at: DateTime<Utc>) {
        (**self).on_sensors_refreshed(at)
    }

    fn on_actuator_changed(&mut self, room: Room, device: Device, on: bool) {
        (**self).on_actuator_changed(room, device, on)
    }

    fn on_mode_changed(&mut self, mode: OperationMode) {
        (**self).on_mode_changed(mode)
    }

    fn on_motion_changed(&mut self, motion: bool) {
        (**self).on_motion_changed(motion)
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Notification) + Send + 'static>;

struct Subscription {
    id: SubscriptionId,
    /// `None` receives every topic
    topic: Option<Topic>,
    callback: Callback,
}

/// Observer registry owned by the state store
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    event_tx: broadcast::Sender<Event>,
    next_subscription: u64,
    event_counter: u64,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity);

        Self {
            subscriptions: Vec::new(),
            event_tx,
            next_subscription: 0,
            event_counter: 0,
        }
    }

    /// Register a callback for one topic
    pub fn subscribe<F>(&mut self, topic: Topic, callback: F) -> SubscriptionId
    where
        F: FnMut(&Notification) + Send + 'static,
    {
        self.insert(Some(topic), Box::new(callback))
    }

    /// Route every topic to a presenter
    pub fn attach<P>(&mut self, mut presenter: P) -> SubscriptionId
    where
        P: Presenter + 'static,
    {
        self.insert(
            None,
            Box::new(move |notification: &Notification| match *notification {
                Notification::SensorChanged { field, value } => presenter.on_sensor_changed(field, value),
                Notification::SensorsRefreshed { at } => presenter.on_sensors_refreshed(at),
                Notification::ActuatorChanged { actuator, on } => {
                    presenter.on_actuator_changed(actuator.room(), actuator.device(), on)
                }
                Notification::ModeChanged(mode) => presenter.on_mode_changed(mode),
                Notification::MotionChanged(motion) => presenter.on_motion_changed(motion),
            }),
        )
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        before != self.subscriptions.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Receiver for async observers; lagging receivers lose the oldest events
    pub fn subscribe_stream(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Deliver to callbacks in registration order, then to stream receivers
    pub fn publish(&mut self, notification: Notification) {
        trace!("notify {:?}", notification);

        let topic = notification.topic();
        for subscription in self.subscriptions.iter_mut() {
            if subscription.topic.map_or(true, |t| t == topic) {
                (subscription.callback)(&notification);
            }
        }

        let id = self.event_counter;
        self.event_counter += 1;
        let _ = self.event_tx.send(Event {
            id,
            timestamp: Utc::now(),
            notification,
        });
    }

    fn insert(&mut self, topic: Option<Topic>, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push(Subscription { id, topic, callback });
        id
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Presenter for Recorder {
        fn on_sensor_changed(&mut self, field: SensorField, value: f64) {
            self.calls.lock().push(format!("sensor {} {}", field, value));
        }

        fn on_actuator_changed(&mut self, room: Room, device: Device, on: bool) {
            self.calls.lock().push(format!("actuator {} {} {}", room, device, on));
        }

        fn on_mode_changed(&mut self, mode: OperationMode) {
            self.calls.lock().push(format!("mode {}", mode));
        }

        fn on_motion_changed(&mut self, motion: bool) {
            self.calls.lock().push(format!("motion {}", motion));
        }
    }

    #[test]
    fn test_topic_filtering() {
        let mut bus = EventBus::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe(Topic::Motion, move |n| sink.lock().push(n.clone()));

        bus.publish(Notification::ModeChanged(OperationMode::Automatic));
        bus.publish(Notification::MotionChanged(true));

        assert_eq!(*seen.lock(), vec![Notification::MotionChanged(true)]);
    }

    #[test]
    fn test_presenter_receives_every_topic() {
        let mut bus = EventBus::default();
        let recorder = Recorder::default();
        let calls = recorder.calls.clone();
        bus.attach(recorder);

        bus.publish(Notification::SensorChanged { field: SensorField::Humidity, value: 41.5 });
        bus.publish(Notification::ActuatorChanged { actuator: ActuatorId::BedroomAc, on: true });
        bus.publish(Notification::ModeChanged(OperationMode::Manual));
        bus.publish(Notification::MotionChanged(false));
        bus.publish(Notification::SensorsRefreshed { at: Utc::now() });

        assert_eq!(
            *calls.lock(),
            vec![
                "sensor Humidity 41.5".to_string(),
                "actuator Bedroom AC true".to_string(),
                "mode Manual".to_string(),
                "motion false".to_string(),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::default();
        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        let id = bus.subscribe(Topic::Mode, move |_| *sink.lock() += 1);

        bus.publish(Notification::ModeChanged(OperationMode::Automatic));
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(Notification::ModeChanged(OperationMode::Manual));

        assert_eq!(*count.lock(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_stream_events_are_sequenced() {
        let mut bus = EventBus::default();
        let mut rx = bus.subscribe_stream();

        bus.publish(Notification::MotionChanged(true));
        bus.publish(Notification::MotionChanged(false));

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert_eq!(first.id + 1, second.id);
        assert_eq!(second.notification, Notification::MotionChanged(false));
    }
}
