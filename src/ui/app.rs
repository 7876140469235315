// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Main application window

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use parking_lot::Mutex;
use tracing::debug;

use super::floor_plan::FloorPlan;
use super::panels::*;
use super::{GuiPresenter, ViewModel};
use crate::config::GuiConfig;
use crate::core::Engine;
use crate::interaction::{Outcome, UserAction};

/// Background producers post every 0.5-2 s; this keeps the window responsive between them
const IDLE_REPAINT: Duration = Duration::from_millis(100);

/// Main dashboard; the UI thread is the engine's single writer
pub struct CasaApp {
    engine: Engine,
    view: Arc<Mutex<ViewModel>>,

    // Panels
    sensor_panel: SensorPanel,
    actuator_panel: ActuatorPanel,
    mode_panel: ModePanel,
    floor_plan: FloorPlan,

    show_about: bool,
}

impl CasaApp {
    pub fn new(cc: &eframe::CreationContext<'_>, mut engine: Engine, gui: GuiConfig) -> Self {
        let view = Arc::new(Mutex::new(ViewModel::from_store(engine.store(), gui.history_len)));
        engine
            .store_mut()
            .attach(GuiPresenter::new(view.clone(), cc.egui_ctx.clone()));

        Self {
            engine,
            view,
            sensor_panel: SensorPanel::new(gui.show_icons),
            actuator_panel: ActuatorPanel::new(gui.show_icons),
            mode_panel: ModePanel::new(),
            floor_plan: FloorPlan::new(),
            show_about: false,
        }
    }

    fn dispatch_all(&mut self, actions: Vec<UserAction>) {
        for action in actions {
            if self.engine.dispatch(action) == Outcome::Refused {
                debug!("Ignored {:?} while controls are disabled", action);
            }
        }
    }
}

impl eframe::App for CasaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply whatever the background tasks posted since the last frame
        self.engine.pump();

        let view = self.view.lock().clone();
        let mut actions = Vec::new();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Mode: {}", view.mode));
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{:.1} °C", view.sensors.temperature));
                ui.separator();
                ui.label(format!("{:.1} %", view.sensors.humidity));
                ui.separator();
                let lit = view.actuators.iter().filter(|(_, on)| *on).count();
                ui.label(format!("Devices on: {}", lit));
                ui.separator();
                ui.label(format!("Commands: {}", self.engine.applied()));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(chrono::Local::now().format("%H:%M:%S").to_string());
                });
            });
        });

        // Left panel - controls
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.group(|ui| self.sensor_panel.show(ui, &view, &mut actions));
                    ui.add_space(8.0);
                    ui.group(|ui| self.actuator_panel.show(ui, &view, &mut actions));
                    ui.add_space(8.0);
                    ui.group(|ui| self.mode_panel.show(ui, &view, &mut actions));
                });
            });

        // Central panel - floor plan
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("House Layout");
            ui.separator();
            self.floor_plan.show(ui, &view, &mut actions);
        });

        // About window
        if self.show_about {
            egui::Window::new("About Casa")
                .open(&mut self.show_about)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("🏠 Casa");
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.small(crate::build_info().to_string());
                        ui.label("Smart-Home Dashboard Simulator");
                        ui.separator();
                        ui.label("Hover a room in automatic mode to simulate presence");
                    });
                });
        }

        self.dispatch_all(actions);
        ctx.request_repaint_after(IDLE_REPAINT);
    }
}
