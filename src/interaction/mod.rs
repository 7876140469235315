// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! User interaction - checkbox toggles, reset, mode switch and hover occupancy
//!
//! Mode gates every actuator write coming from the user:
//!
//! | action                 | Manual                | Automatic                                  |
//! |------------------------|-----------------------|--------------------------------------------|
//! | toggle / reset         | applied               | refused                                    |
//! | room hover enter       | motion on             | motion on, room light on, room AC if hot   |
//! | room hover leave       | motion off            | motion off, room light and AC off          |
//! | motion indicator hover | motion on/off         | motion + living room and bedroom lights    |
//!
//! Leaving automatic mode switches every actuator off.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::automation::AutomaticController;
use crate::core::StateStore;
use crate::home::{ActuatorId, OperationMode, Room};

/// Input coming from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UserAction {
    ToggleActuator { actuator: ActuatorId, on: bool },
    ResetActuators,
    SetMode(OperationMode),
    RoomHoverEnter(Room),
    RoomHoverLeave(Room),
    MotionIndicatorEnter,
    MotionIndicatorLeave,
}

/// What happened to a [`UserAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Re-selecting the current mode
    Unchanged,
    /// Direct controls are disabled in automatic mode
    Refused,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied => f.write_str("applied"),
            Outcome::Unchanged => f.write_str("unchanged"),
            Outcome::Refused => f.write_str("refused"),
        }
    }
}

/// Whether checkboxes and the reset button accept input
pub fn controls_enabled(mode: OperationMode) -> bool {
    mode == OperationMode::Manual
}

pub struct InteractionHandler {
    controller: AutomaticController,
}

impl InteractionHandler {
    pub fn new(controller: AutomaticController) -> Self {
        Self { controller }
    }

    pub fn handle(&self, store: &mut StateStore, action: UserAction) -> Outcome {
        let outcome = match action {
            UserAction::ToggleActuator { actuator, on } => {
                if !controls_enabled(store.mode()) {
                    Outcome::Refused
                } else {
                    store.set_actuator(actuator, on);
                    Outcome::Applied
                }
            }
            UserAction::ResetActuators => {
                if !controls_enabled(store.mode()) {
                    Outcome::Refused
                } else {
                    store.reset_actuators();
                    Outcome::Applied
                }
            }
            UserAction::SetMode(mode) => self.switch_mode(store, mode),
            UserAction::RoomHoverEnter(room) => {
                self.room_entered(store, room);
                Outcome::Applied
            }
            UserAction::RoomHoverLeave(room) => {
                self.room_left(store, room);
                Outcome::Applied
            }
            UserAction::MotionIndicatorEnter => {
                self.indicator_hovered(store, true);
                Outcome::Applied
            }
            UserAction::MotionIndicatorLeave => {
                self.indicator_hovered(store, false);
                Outcome::Applied
            }
        };

        debug!("{:?} {}", action, outcome);
        outcome
    }

    fn switch_mode(&self, store: &mut StateStore, mode: OperationMode) -> Outcome {
        let previous = store.mode();
        if previous == mode {
            return Outcome::Unchanged;
        }

        if mode == OperationMode::Manual {
            store.reset_actuators();
        }
        store.set_mode(mode);

        info!("Operation mode: {} -> {}", previous, mode);
        Outcome::Applied
    }

    fn room_entered(&self, store: &mut StateStore, room: Room) {
        if store.mode() == OperationMode::Automatic {
            store.set_actuator(ActuatorId::light(room), true);
            if self.controller.is_hot(store.temperature()) {
                if let Some(ac) = ActuatorId::ac(room) {
                    store.set_actuator(ac, true);
                }
            }
        }
        store.set_motion(true);
    }

    fn room_left(&self, store: &mut StateStore, room: Room) {
        if store.mode() == OperationMode::Automatic {
            store.set_actuator(ActuatorId::light(room), false);
            if let Some(ac) = ActuatorId::ac(room) {
                store.set_actuator(ac, false);
            }
        }
        store.set_motion(false);
    }

    fn indicator_hovered(&self, store: &mut StateStore, present: bool) {
        store.set_motion(present);
        if store.mode() == OperationMode::Automatic {
            store.set_actuator(ActuatorId::LivingRoomLight, present);
            store.set_actuator(ActuatorId::BedroomLight, present);
        }
    }
}

impl Default for InteractionHandler {
    fn default() -> Self {
        Self::new(AutomaticController::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(mode: OperationMode) -> StateStore {
        let mut store = StateStore::new();
        store.set_mode(mode);
        store
    }

    #[test]
    fn test_manual_toggle_then_reset() {
        let handler = InteractionHandler::default();
        let mut store = store_in(OperationMode::Manual);

        let toggled = handler.handle(
            &mut store,
            UserAction::ToggleActuator { actuator: ActuatorId::LivingRoomLight, on: true },
        );
        assert_eq!(toggled, Outcome::Applied);
        assert!(store.actuator(ActuatorId::LivingRoomLight));

        assert_eq!(handler.handle(&mut store, UserAction::ResetActuators), Outcome::Applied);
        assert!(store.actuators().all_off());
    }

    #[test]
    fn test_toggle_refused_in_automatic() {
        let handler = InteractionHandler::default();
        let mut store = store_in(OperationMode::Automatic);
        let before = store.snapshot();

        for id in ActuatorId::ALL {
            let outcome = handler.handle(&mut store, UserAction::ToggleActuator { actuator: id, on: true });
            assert_eq!(outcome, Outcome::Refused);
        }
        assert_eq!(handler.handle(&mut store, UserAction::ResetActuators), Outcome::Refused);

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_leaving_automatic_resets_everything() {
        let handler = InteractionHandler::default();
        let mut store = store_in(OperationMode::Automatic);
        store.set_temperature(31.0);
        for room in Room::ALL {
            handler.handle(&mut store, UserAction::RoomHoverEnter(room));
        }
        assert!(!store.actuators().all_off());

        let outcome = handler.handle(&mut store, UserAction::SetMode(OperationMode::Manual));

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(store.mode(), OperationMode::Manual);
        assert!(store.actuators().all_off());
    }

    #[test]
    fn test_entering_automatic_keeps_actuators() {
        let handler = InteractionHandler::default();
        let mut store = store_in(OperationMode::Manual);
        handler.handle(
            &mut store,
            UserAction::ToggleActuator { actuator: ActuatorId::BathroomLight, on: true },
        );

        handler.handle(&mut store, UserAction::SetMode(OperationMode::Automatic));

        assert!(store.actuator(ActuatorId::BathroomLight));
        assert_eq!(
            handler.handle(&mut store, UserAction::SetMode(OperationMode::Automatic)),
            Outcome::Unchanged
        );
    }

    #[test]
    fn test_kitchen_hover_in_automatic() {
        let handler = InteractionHandler::default();
        let mut store = store_in(OperationMode::Automatic);
        store.set_temperature(33.0);

        handler.handle(&mut store, UserAction::RoomHoverEnter(Room::Kitchen));
        assert!(store.actuator(ActuatorId::KitchenLight));
        assert!(store.motion());
        assert!(!store.actuator(ActuatorId::LivingRoomAc));
        assert!(!store.actuator(ActuatorId::BedroomAc));

        handler.handle(&mut store, UserAction::RoomHoverLeave(Room::Kitchen));
        assert!(!store.actuator(ActuatorId::KitchenLight));
        assert!(!store.motion());
    }

    #[test]
    fn test_room_hover_turns_on_ac_only_when_hot() {
        let handler = InteractionHandler::default();
        let mut store = store_in(OperationMode::Automatic);

        store.set_temperature(28.0);
        handler.handle(&mut store, UserAction::RoomHoverEnter(Room::LivingRoom));
        assert!(store.actuator(ActuatorId::LivingRoomLight));
        assert!(!store.actuator(ActuatorId::LivingRoomAc));

        store.set_temperature(29.5);
        handler.handle(&mut store, UserAction::RoomHoverEnter(Room::LivingRoom));
        assert!(store.actuator(ActuatorId::LivingRoomAc));

        handler.handle(&mut store, UserAction::RoomHoverLeave(Room::LivingRoom));
        assert!(!store.actuator(ActuatorId::LivingRoomLight));
        assert!(!store.actuator(ActuatorId::LivingRoomAc));
    }

    #[test]
    fn test_manual_hover_only_moves_motion() {
        let handler = InteractionHandler::default();
        let mut store = store_in(OperationMode::Manual);
        store.set_temperature(34.0);

        handler.handle(&mut store, UserAction::RoomHoverEnter(Room::Bedroom));
        assert!(store.motion());
        assert!(store.actuators().all_off());

        handler.handle(&mut store, UserAction::MotionIndicatorEnter);
        assert!(store.motion());
        assert!(store.actuators().all_off());

        handler.handle(&mut store, UserAction::MotionIndicatorLeave);
        assert!(!store.motion());
    }

    #[test]
    fn test_motion_indicator_drives_two_lights() {
        let handler = InteractionHandler::default();
        let mut store = store_in(OperationMode::Automatic);

        handler.handle(&mut store, UserAction::MotionIndicatorEnter);
        assert!(store.motion());
        assert!(store.actuator(ActuatorId::LivingRoomLight));
        assert!(store.actuator(ActuatorId::BedroomLight));
        assert!(!store.actuator(ActuatorId::KitchenLight));

        // Last event wins across the two occupancy triggers
        handler.handle(&mut store, UserAction::RoomHoverLeave(Room::Bedroom));
        assert!(!store.actuator(ActuatorId::BedroomLight));
        assert!(store.actuator(ActuatorId::LivingRoomLight));
        assert!(!store.motion());
    }

    #[test]
    fn test_controls_enabled_by_mode() {
        assert!(controls_enabled(OperationMode::Manual));
        assert!(!controls_enabled(OperationMode::Automatic));
    }
}
