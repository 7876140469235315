// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Library error type

use thiserror::Error;

use crate::home::{Device, Room};

#[derive(Debug, Error)]
pub enum HomeError {
    /// Room/device pair that does not exist in the house (kitchen or bathroom AC)
    #[error("{room} has no {device}")]
    NoSuchActuator { room: Room, device: Device },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The engine owning the state store is gone
    #[error("state store is shut down")]
    Shutdown,
}

pub type HomeResult<T> = std::result::Result<T, HomeError>;
