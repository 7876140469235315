// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Sensor module - mock readings

mod generator;

pub use generator::{round_one_decimal, SensorGenerator, SensorSample};
