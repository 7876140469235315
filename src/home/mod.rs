// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Home vocabulary - rooms, devices, actuators, sensors and modes

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HomeError;

/// A fixed zone of the simulated house
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Room {
    LivingRoom,
    Kitchen,
    Bedroom,
    Bathroom,
}

impl Room {
    pub const ALL: [Room; 4] = [Room::LivingRoom, Room::Kitchen, Room::Bedroom, Room::Bathroom];

    /// Only the living room and the bedroom carry an air conditioner
    pub fn has_ac(self) -> bool {
        matches!(self, Room::LivingRoom | Room::Bedroom)
    }

    pub fn label(self) -> &'static str {
        match self {
            Room::LivingRoom => "Living Room",
            Room::Kitchen => "Kitchen",
            Room::Bedroom => "Bedroom",
            Room::Bathroom => "Bathroom",
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of controllable device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    Light,
    Ac,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Light => f.write_str("Light"),
            Device::Ac => f.write_str("AC"),
        }
    }
}

/// One of the room/device pairs that actually exists.
///
/// Kitchen and bathroom have no AC, so those pairs have no variant at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActuatorId {
    LivingRoomLight,
    KitchenLight,
    BedroomLight,
    BathroomLight,
    LivingRoomAc,
    BedroomAc,
}

impl ActuatorId {
    pub const ALL: [ActuatorId; 6] = [
        ActuatorId::LivingRoomLight,
        ActuatorId::KitchenLight,
        ActuatorId::BedroomLight,
        ActuatorId::BathroomLight,
        ActuatorId::LivingRoomAc,
        ActuatorId::BedroomAc,
    ];

    pub fn room(self) -> Room {
        match self {
            ActuatorId::LivingRoomLight | ActuatorId::LivingRoomAc => Room::LivingRoom,
            ActuatorId::KitchenLight => Room::Kitchen,
            ActuatorId::BedroomLight | ActuatorId::BedroomAc => Room::Bedroom,
            ActuatorId::BathroomLight => Room::Bathroom,
        }
    }

    pub fn device(self) -> Device {
        match self {
            ActuatorId::LivingRoomAc | ActuatorId::BedroomAc => Device::Ac,
            _ => Device::Light,
        }
    }

    /// Every room has a light
    pub fn light(room: Room) -> ActuatorId {
        match room {
            Room::LivingRoom => ActuatorId::LivingRoomLight,
            Room::Kitchen => ActuatorId::KitchenLight,
            Room::Bedroom => ActuatorId::BedroomLight,
            Room::Bathroom => ActuatorId::BathroomLight,
        }
    }

    pub fn ac(room: Room) -> Option<ActuatorId> {
        match room {
            Room::LivingRoom => Some(ActuatorId::LivingRoomAc),
            Room::Bedroom => Some(ActuatorId::BedroomAc),
            Room::Kitchen | Room::Bathroom => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<(Room, Device)> for ActuatorId {
    type Error = HomeError;

    fn try_from((room, device): (Room, Device)) -> Result<Self, Self::Error> {
        match device {
            Device::Light => Ok(ActuatorId::light(room)),
            Device::Ac => ActuatorId::ac(room).ok_or(HomeError::NoSuchActuator { room, device }),
        }
    }
}

impl fmt::Display for ActuatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.room(), self.device())
    }
}

/// Process-wide operation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OperationMode {
    #[default]
    Manual,
    Automatic,
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationMode::Manual => f.write_str("Manual"),
            OperationMode::Automatic => f.write_str("Automatic"),
        }
    }
}

impl FromStr for OperationMode {
    type Err = HomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(OperationMode::Manual),
            "automatic" | "auto" => Ok(OperationMode::Automatic),
            other => Err(HomeError::Config(format!("unknown operation mode '{}'", other))),
        }
    }
}

/// Numeric sensor channels written by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorField {
    Temperature,
    Humidity,
}

impl SensorField {
    pub fn unit(self) -> &'static str {
        match self {
            SensorField::Temperature => "°C",
            SensorField::Humidity => "%",
        }
    }
}

impl fmt::Display for SensorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorField::Temperature => f.write_str("Temperature"),
            SensorField::Humidity => f.write_str("Humidity"),
        }
    }
}

/// Current sensor values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, percent
    pub humidity: f64,
    pub motion: bool,
    /// When the generator last wrote temperature and humidity
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for SensorReading {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            humidity: 50.0,
            motion: false,
            updated_at: None,
        }
    }
}

impl SensorReading {
    pub fn get(&self, field: SensorField) -> f64 {
        match field {
            SensorField::Temperature => self.temperature,
            SensorField::Humidity => self.humidity,
        }
    }
}

/// On/off bank for every valid actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActuatorStates {
    on: [bool; 6],
}

impl ActuatorStates {
    pub fn get(&self, id: ActuatorId) -> bool {
        self.on[id.index()]
    }

    pub fn set(&mut self, id: ActuatorId, on: bool) {
        self.on[id.index()] = on;
    }

    pub fn all_off(&self) -> bool {
        self.on.iter().all(|on| !on)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActuatorId, bool)> + '_ {
        ActuatorId::ALL.iter().map(move |&id| (id, self.get(id)))
    }
}

/// Full copy of the home state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeSnapshot {
    pub mode: OperationMode,
    pub sensors: SensorReading,
    pub actuators: Vec<ActuatorSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorSnapshot {
    pub room: Room,
    pub device: Device,
    pub on: bool,
}

impl HomeSnapshot {
    pub fn new(mode: OperationMode, sensors: SensorReading, actuators: &ActuatorStates) -> Self {
        Self {
            mode,
            sensors,
            actuators: actuators
                .iter()
                .map(|(id, on)| ActuatorSnapshot {
                    room: id.room(),
                    device: id.device(),
                    on,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
