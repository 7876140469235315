// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! UI panels

use chrono::Local;
use eframe::egui;

use super::plots::history_plot;
use super::theme::{AC_ON, HUMIDITY_LINE, LIGHT_ON, TEMPERATURE_LINE};
use super::widgets::*;
use super::ViewModel;
use crate::home::{ActuatorId, Device, OperationMode, SensorField};
use crate::interaction::{controls_enabled, UserAction};

/// Sensor readings plus the motion indicator
pub struct SensorPanel {
    show_icons: bool,
    motion_hovered: bool,
}

impl SensorPanel {
    pub fn new(show_icons: bool) -> Self {
        Self {
            show_icons,
            motion_hovered: false,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, view: &ViewModel, actions: &mut Vec<UserAction>) {
        ui.heading("Sensors");
        ui.separator();

        for field in [SensorField::Temperature, SensorField::Humidity] {
            ui.horizontal(|ui| {
                icon_label(ui, self.show_icons, sensor_glyph(field), &format!("{}:", field));
                ui.strong(format!("{:.1} {}", view.sensors.get(field), field.unit()));
            });
        }

        // Hovering the motion row is a coarse occupancy trigger of its own
        let motion = ui
            .horizontal(|ui| {
                icon_label(ui, self.show_icons, MOTION_GLYPH, "Motion:");
                ui.strong(if view.sensors.motion { "Detected" } else { "None" });
            })
            .response
            .interact(egui::Sense::hover());
        let hovered = motion.hovered();
        if hovered != self.motion_hovered {
            self.motion_hovered = hovered;
            actions.push(if hovered {
                UserAction::MotionIndicatorEnter
            } else {
                UserAction::MotionIndicatorLeave
            });
        }

        let updated = view
            .sensors
            .updated_at
            .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "N/A".to_string());
        ui.small(format!("Last updated: {}", updated));

        ui.separator();
        ui.label("Temperature history");
        history_plot(ui, "temperature_history", &view.temperature_history, TEMPERATURE_LINE, (18.0, 35.0), 90.0);
        ui.label("Humidity history");
        history_plot(ui, "humidity_history", &view.humidity_history, HUMIDITY_LINE, (30.0, 70.0), 90.0);
    }
}

/// Per-room light and AC checkboxes with a reset button
pub struct ActuatorPanel {
    show_icons: bool,
}

impl ActuatorPanel {
    pub fn new(show_icons: bool) -> Self {
        Self { show_icons }
    }

    pub fn show(&self, ui: &mut egui::Ui, view: &ViewModel, actions: &mut Vec<UserAction>) {
        ui.heading("Actuators");
        ui.separator();

        let enabled = controls_enabled(view.mode);
        for id in ActuatorId::ALL {
            ui.horizontal(|ui| {
                let mut on = view.actuators.get(id);
                let label = if self.show_icons {
                    format!("{} {}", device_glyph(id.device()), id)
                } else {
                    id.to_string()
                };

                if ui.add_enabled(enabled, egui::Checkbox::new(&mut on, label)).changed() {
                    actions.push(UserAction::ToggleActuator { actuator: id, on });
                }

                let color = match id.device() {
                    Device::Light => LIGHT_ON,
                    Device::Ac => AC_ON,
                };
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    status_indicator(ui, view.actuators.get(id), color, "");
                });
            });
        }

        ui.add_space(6.0);
        if ui.add_enabled(enabled, egui::Button::new("Reset actuators")).clicked() {
            actions.push(UserAction::ResetActuators);
        }
        if !enabled {
            ui.small("Direct control is disabled in automatic mode");
        }
    }
}

/// Manual / automatic selector
pub struct ModePanel;

impl ModePanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&self, ui: &mut egui::Ui, view: &ViewModel, actions: &mut Vec<UserAction>) {
        ui.heading("Operation Mode");
        ui.separator();

        let mut mode = view.mode;
        ui.horizontal(|ui| {
            ui.radio_value(&mut mode, OperationMode::Manual, "Manual");
            ui.radio_value(&mut mode, OperationMode::Automatic, "Automatic");
        });
        if mode != view.mode {
            actions.push(UserAction::SetMode(mode));
        }
    }
}

impl Default for ModePanel {
    fn default() -> Self {
        Self::new()
    }
}
