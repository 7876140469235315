// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Automatic mode - periodic AC control

mod controller;

pub use controller::{schedule, AcPlan, AutomaticController, DEFAULT_AC_THRESHOLD};
