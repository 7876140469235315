// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Floor plan drawing and hover occupancy

use eframe::egui;

use egui::Color32;

use super::theme::{room_fill, room_ink, AC_ON, DEVICE_OFF, LIGHT_ON, WALL, WINDOW};
use super::ViewModel;
use crate::home::{ActuatorId, Room};
use crate::interaction::UserAction;

/// Logical drawing size; scaled to the available space
pub const PLAN_WIDTH: f32 = 400.0;
pub const PLAN_HEIGHT: f32 = 500.0;

/// Room outline in plan coordinates: [x0, y0, x1, y1]
pub fn room_bounds(room: Room) -> [f32; 4] {
    match room {
        Room::LivingRoom => [30.0, 30.0, 200.0, 250.0],
        Room::Kitchen => [210.0, 30.0, 370.0, 150.0],
        Room::Bedroom => [210.0, 160.0, 370.0, 320.0],
        Room::Bathroom => [30.0, 260.0, 200.0, 480.0],
    }
}

/// Where the light bulb (and the AC unit below it) sit inside each room
fn indicator_anchor(room: Room) -> (f32, f32) {
    match room {
        Room::LivingRoom => (80.0, 60.0),
        Room::Kitchen => (270.0, 60.0),
        Room::Bedroom => (290.0, 200.0),
        Room::Bathroom => (100.0, 300.0),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureKind {
    Door,
    Window,
    Furniture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rect,
    Oval,
}

/// Static scenery drawn on the plan; never part of hit testing
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub kind: FixtureKind,
    pub shape: Shape,
    pub bounds: [f32; 4],
    pub fill: Color32,
    pub outline: Color32,
    pub label: Option<&'static str>,
}

impl Fixture {
    const fn new(kind: FixtureKind, shape: Shape, bounds: [f32; 4], fill: Color32, outline: Color32) -> Self {
        Self { kind, shape, bounds, fill, outline, label: None }
    }

    const fn labeled(self, label: &'static str) -> Self {
        Self { label: Some(label), ..self }
    }
}

pub const FIXTURES: &[Fixture] = &[
    // Door between living room and bathroom
    Fixture::new(FixtureKind::Door, Shape::Rect, [113.0, 250.0, 117.0, 260.0], WALL, WALL),
    Fixture::new(FixtureKind::Window, Shape::Rect, [70.0, 18.0, 140.0, 25.0], WINDOW, WINDOW),
    Fixture::new(FixtureKind::Window, Shape::Rect, [250.0, 18.0, 320.0, 25.0], WINDOW, WINDOW),
    Fixture::new(FixtureKind::Window, Shape::Rect, [350.0, 180.0, 357.0, 230.0], WINDOW, WINDOW),
    Fixture::new(
        FixtureKind::Furniture,
        Shape::Rect,
        [40.0, 80.0, 170.0, 130.0],
        Color32::from_rgb(108, 117, 125),
        Color32::from_rgb(73, 80, 87),
    )
    .labeled("Sofa"),
    Fixture::new(
        FixtureKind::Furniture,
        Shape::Oval,
        [80.0, 160.0, 150.0, 210.0],
        Color32::from_rgb(173, 181, 189),
        Color32::from_rgb(108, 117, 125),
    ),
    Fixture::new(
        FixtureKind::Furniture,
        Shape::Rect,
        [230.0, 50.0, 290.0, 120.0],
        Color32::from_rgb(52, 58, 64),
        Color32::from_rgb(33, 37, 41),
    )
    .labeled("Stove"),
    Fixture::new(
        FixtureKind::Furniture,
        Shape::Rect,
        [230.0, 180.0, 350.0, 300.0],
        Color32::from_rgb(13, 110, 253),
        Color32::from_rgb(8, 66, 152),
    )
    .labeled("Bed"),
    Fixture::new(
        FixtureKind::Furniture,
        Shape::Oval,
        [50.0, 300.0, 120.0, 370.0],
        Color32::from_rgb(111, 66, 193),
        Color32::from_rgb(75, 34, 155),
    )
    .labeled("Sink"),
];

/// Room under a point given in plan coordinates; walls between rooms belong to none
pub fn room_at(x: f32, y: f32) -> Option<Room> {
    Room::ALL.into_iter().find(|&room| {
        let [x0, y0, x1, y1] = room_bounds(room);
        x >= x0 && x <= x1 && y >= y0 && y <= y1
    })
}

/// Leave/enter actions for a change of hovered room, leave first
pub fn hover_transitions(previous: Option<Room>, current: Option<Room>) -> Vec<UserAction> {
    if previous == current {
        return Vec::new();
    }

    let mut actions = Vec::with_capacity(2);
    if let Some(room) = previous {
        actions.push(UserAction::RoomHoverLeave(room));
    }
    if let Some(room) = current {
        actions.push(UserAction::RoomHoverEnter(room));
    }
    actions
}

/// Floor plan panel; remembers which room the pointer is over
#[derive(Debug, Default)]
pub struct FloorPlan {
    hovered: Option<Room>,
}

impl FloorPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<Room> {
        self.hovered
    }

    pub fn show(&mut self, ui: &mut egui::Ui, view: &ViewModel, actions: &mut Vec<UserAction>) {
        let available = ui.available_size();
        let scale = (available.x / PLAN_WIDTH).min(available.y / PLAN_HEIGHT).max(0.1);
        let (response, painter) = ui.allocate_painter(
            egui::vec2(PLAN_WIDTH * scale, PLAN_HEIGHT * scale),
            egui::Sense::hover(),
        );
        let origin = response.rect.min;
        let to_screen = |x: f32, y: f32| origin + egui::vec2(x * scale, y * scale);

        painter.rect_filled(response.rect, 0.0, egui::Color32::from_rgb(240, 240, 240));

        for room in Room::ALL {
            let [x0, y0, x1, y1] = room_bounds(room);
            let rect = egui::Rect::from_min_max(to_screen(x0, y0), to_screen(x1, y1));
            let stroke_width = if self.hovered == Some(room) { 3.0 } else { 2.0 };
            painter.rect(rect, 0.0, room_fill(room), egui::Stroke::new(stroke_width, WALL));
        }

        for fixture in FIXTURES {
            let [x0, y0, x1, y1] = fixture.bounds;
            let rect = egui::Rect::from_min_max(to_screen(x0, y0), to_screen(x1, y1));
            let stroke = egui::Stroke::new(if fixture.kind == FixtureKind::Furniture { 2.0 } else { 0.0 }, fixture.outline);
            match fixture.shape {
                Shape::Rect => {
                    painter.rect(rect, 0.0, fixture.fill, stroke);
                }
                // Inscribed circle; no ellipse shape in this egui
                Shape::Oval => {
                    painter.circle(rect.center(), rect.width().min(rect.height()) / 2.0, fixture.fill, stroke);
                }
            }
            if let Some(label) = fixture.label {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    label,
                    egui::FontId::proportional(10.0 * scale.max(0.6)),
                    Color32::WHITE,
                );
            }
        }

        for room in Room::ALL {
            let [x0, y0, x1, y1] = room_bounds(room);
            // Near the bottom wall so furniture labels stay readable
            painter.text(
                to_screen((x0 + x1) / 2.0, y1 - 14.0),
                egui::Align2::CENTER_CENTER,
                room.label(),
                egui::FontId::proportional(14.0 * scale.max(0.6)),
                room_ink(room),
            );

            let (ax, ay) = indicator_anchor(room);
            let light = if view.actuators.get(ActuatorId::light(room)) { LIGHT_ON } else { DEVICE_OFF };
            painter.circle_filled(to_screen(ax, ay), 10.0 * scale, light);

            // Kitchen and bathroom have no AC unit to draw
            if let Some(ac) = ActuatorId::ac(room) {
                let fill = if view.actuators.get(ac) { AC_ON } else { DEVICE_OFF };
                let unit = egui::Rect::from_min_max(to_screen(ax - 10.0, ay + 15.0), to_screen(ax + 10.0, ay + 35.0));
                painter.rect_filled(unit, 2.0, fill);
            }
        }

        let current = response.hover_pos().and_then(|pos| {
            let local = (pos - origin) / scale;
            room_at(local.x, local.y)
        });
        actions.extend(hover_transitions(self.hovered, current));
        self.hovered = current;
    }
}
