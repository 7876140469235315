// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Theme configuration

use eframe::egui;
use egui::Color32;

use crate::config::Theme;
use crate::home::Room;

pub const LIGHT_ON: Color32 = Color32::from_rgb(255, 193, 7);
pub const AC_ON: Color32 = Color32::from_rgb(13, 202, 240);
pub const DEVICE_OFF: Color32 = Color32::from_rgb(108, 117, 125);
pub const WALL: Color32 = Color32::from_rgb(102, 102, 102);
pub const WINDOW: Color32 = Color32::from_rgb(13, 110, 253);
pub const TEMPERATURE_LINE: Color32 = Color32::from_rgb(220, 53, 69);
pub const HUMIDITY_LINE: Color32 = Color32::from_rgb(13, 110, 253);

pub fn room_fill(room: Room) -> Color32 {
    match room {
        Room::LivingRoom => Color32::from_rgb(209, 231, 221),
        Room::Kitchen => Color32::from_rgb(255, 243, 205),
        Room::Bedroom => Color32::from_rgb(207, 226, 255),
        Room::Bathroom => Color32::from_rgb(248, 215, 218),
    }
}

/// Text color drawn on top of [`room_fill`]
pub fn room_ink(room: Room) -> Color32 {
    match room {
        Room::LivingRoom => Color32::from_rgb(15, 81, 50),
        Room::Kitchen => Color32::from_rgb(102, 77, 3),
        Room::Bedroom => Color32::from_rgb(8, 66, 152),
        Room::Bathroom => Color32::from_rgb(132, 32, 41),
    }
}

/// Apply theme to egui context
pub fn apply_theme(ctx: &egui::Context, theme: Theme) {
    match theme {
        Theme::Dark => apply_dark_theme(ctx),
        Theme::Light => apply_light_theme(ctx),
        Theme::System => {
            // No reliable system query here; the floor plan palette reads best on light
            apply_light_theme(ctx);
        }
    }
}

fn apply_dark_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::dark();
    style.visuals.panel_fill = Color32::from_rgb(24, 26, 30);
    style.visuals.window_fill = Color32::from_rgb(32, 34, 40);
    style.visuals.selection.bg_fill = Color32::from_rgb(50, 100, 150);

    apply_shared(&mut style);
    ctx.set_style(style);
}

fn apply_light_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = Color32::from_rgb(248, 249, 250);
    style.visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(240, 240, 245);
    style.visuals.widgets.inactive.bg_fill = Color32::from_rgb(230, 230, 235);
    style.visuals.selection.bg_fill = Color32::from_rgb(13, 110, 253);

    apply_shared(&mut style);
    ctx.set_style(style);
}

fn apply_shared(style: &mut egui::Style) {
    style.visuals.window_rounding = egui::Rounding::same(6.0);
    style.visuals.widgets.inactive.rounding = egui::Rounding::same(4.0);
    style.visuals.widgets.hovered.rounding = egui::Rounding::same(4.0);
    style.visuals.widgets.active.rounding = egui::Rounding::same(4.0);

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
}
