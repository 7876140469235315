// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Custom UI widgets

use eframe::egui;

use crate::home::{Device, SensorField};

/// Glyph shown next to a label when icons are enabled
pub fn sensor_glyph(field: SensorField) -> &'static str {
    match field {
        SensorField::Temperature => "🌡",
        SensorField::Humidity => "💧",
    }
}

pub fn device_glyph(device: Device) -> &'static str {
    match device {
        Device::Light => "💡",
        Device::Ac => "❄",
    }
}

pub const MOTION_GLYPH: &str = "🏃";

/// Label with an optional leading glyph; text-only when icons are off
pub fn icon_label(ui: &mut egui::Ui, show_icons: bool, glyph: &str, text: &str) -> egui::Response {
    if show_icons {
        ui.label(format!("{} {}", glyph, text))
    } else {
        ui.label(text)
    }
}

/// Colored dot with a label
pub fn status_indicator(ui: &mut egui::Ui, active: bool, active_color: egui::Color32, label: &str) {
    ui.horizontal(|ui| {
        let color = if active {
            active_color
        } else {
            egui::Color32::GRAY
        };
        ui.colored_label(color, "●");
        ui.label(label);
    });
}
