// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! UI module - egui dashboard

mod app;
mod floor_plan;
mod panels;
mod plots;
mod theme;
mod widgets;

pub use app::*;
pub use floor_plan::*;
pub use panels::*;
pub use plots::*;
pub use theme::*;
pub use widgets::*;

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use eframe::egui;
use parking_lot::Mutex;

use crate::config::Config;
use crate::core::{Engine, Presenter, StateStore};
use crate::home::{ActuatorId, ActuatorStates, Device, OperationMode, Room, SensorField, SensorReading};
use crate::runtime::HomeRuntime;

/// What the widgets draw; kept current by [`GuiPresenter`]
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub mode: OperationMode,
    pub sensors: SensorReading,
    pub actuators: ActuatorStates,
    pub temperature_history: VecDeque<f64>,
    pub humidity_history: VecDeque<f64>,
    history_len: usize,
}

impl ViewModel {
    pub fn from_store(store: &StateStore, history_len: usize) -> Self {
        Self {
            mode: store.mode(),
            sensors: store.sensors(),
            actuators: store.actuators(),
            temperature_history: VecDeque::with_capacity(history_len),
            humidity_history: VecDeque::with_capacity(history_len),
            history_len,
        }
    }

    pub fn apply_sensor(&mut self, field: SensorField, value: f64) {
        let history = match field {
            SensorField::Temperature => {
                self.sensors.temperature = value;
                &mut self.temperature_history
            }
            SensorField::Humidity => {
                self.sensors.humidity = value;
                &mut self.humidity_history
            }
        };

        history.push_back(value);
        while history.len() > self.history_len {
            history.pop_front();
        }
    }
}

/// Bridges store notifications into the shared [`ViewModel`] and schedules a repaint
pub struct GuiPresenter {
    view: Arc<Mutex<ViewModel>>,
    ctx: egui::Context,
}

impl GuiPresenter {
    pub fn new(view: Arc<Mutex<ViewModel>>, ctx: egui::Context) -> Self {
        Self { view, ctx }
    }
}

impl Presenter for GuiPresenter {
    fn on_sensor_changed(&mut self, field: SensorField, value: f64) {
        self.view.lock().apply_sensor(field, value);
        self.ctx.request_repaint();
    }

    fn on_sensors_refreshed(&mut self, at: DateTime<Utc>) {
        self.view.lock().sensors.updated_at = Some(at);
        self.ctx.request_repaint();
    }

    fn on_actuator_changed(&mut self, room: Room, device: Device, on: bool) {
        if let Ok(id) = ActuatorId::try_from((room, device)) {
            self.view.lock().actuators.set(id, on);
            self.ctx.request_repaint();
        }
    }

    fn on_mode_changed(&mut self, mode: OperationMode) {
        self.view.lock().mode = mode;
        self.ctx.request_repaint();
    }

    fn on_motion_changed(&mut self, motion: bool) {
        self.view.lock().sensors.motion = motion;
        self.ctx.request_repaint();
    }
}

/// Launch GUI application. Closing the window stops the background tasks.
pub fn run_gui(config: Config) -> Result<()> {
    let runtime = HomeRuntime::new(config.clone())?;
    let engine = Engine::new(runtime.config());
    runtime.start(&engine);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.gui.width as f32, config.gui.height as f32])
            .with_title("Casa - Smart Home Simulator")
            .with_icon(load_icon()),
        ..Default::default()
    };

    let gui = config.gui.clone();
    let result = eframe::run_native(
        "Casa",
        options,
        Box::new(move |cc| {
            apply_theme(&cc.egui_ctx, gui.theme);
            Box::new(CasaApp::new(cc, engine, gui))
        }),
    );

    runtime.shutdown();
    result.map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
}

fn load_icon() -> egui::IconData {
    // Warm yellow square, same as a lit bulb on the floor plan
    egui::IconData {
        rgba: vec![255u8, 193, 7, 255].repeat(32 * 32),
        width: 32,
        height: 32,
    }
}
