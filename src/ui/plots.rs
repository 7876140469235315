// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Plot utilities

use std::collections::VecDeque;

use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

/// Sensor history as a line over sample index, y axis pinned to the sensor range
pub fn history_plot(
    ui: &mut egui::Ui,
    id: &str,
    data: &VecDeque<f64>,
    color: egui::Color32,
    y_range: (f64, f64),
    height: f32,
) {
    let plot = Plot::new(id)
        .height(height)
        .show_axes(true)
        .show_grid(true)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_x(false)
        .include_y(y_range.0)
        .include_y(y_range.1);

    plot.show(ui, |plot_ui| {
        let points: PlotPoints = data
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect();

        plot_ui.line(Line::new(points).color(color).width(1.5));
    });
}
