// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Core module - state store, notification bus, single-writer engine and scheduler

mod engine;
mod event_bus;
mod scheduler;
mod store;

pub use engine::{Command, CommandSender, Engine};
pub use event_bus::{Event, EventBus, Notification, Presenter, SubscriptionId, Topic};
pub use scheduler::Scheduler;
pub use store::StateStore;

use tracing::error;

use crate::error::HomeError;

/// Caller broke an API contract: fatal in debug builds, logged and ignored in release
pub(crate) fn contract_violation(err: &HomeError) {
    if cfg!(debug_assertions) {
        panic!("contract violation: {}", err);
    }
    error!("contract violation ignored: {}", err);
}
