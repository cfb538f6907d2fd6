//! Immediate-mode drawing contract shared by every entity.
//!
//! Entities draw in local coordinates: the caller sets a [`Transform`] that
//! places the local origin at the entity position, rotated to its heading.
//! Angles for arcs follow the usual 2D-graphics convention: degrees, zero at
//! three o'clock, positive counter-clockwise on screen.

use crate::vector::Vector2;

// ── Palette ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Grey,
    Green,
    Yellow,
    Red,
    Orange,
}

// ── Transform ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vector2,
    pub rotation: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vector2::ZERO,
        rotation: 0.0,
    };

    pub fn new(translation: Vector2, rotation: f64) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Local point → world point.
    pub fn apply(&self, local: Vector2) -> Vector2 {
        local.rotated(self.rotation) + self.translation
    }
}

// ── Surface ──────────────────────────────────────────────────────────────────

pub trait Surface {
    fn set_transform(&mut self, transform: Transform);
    fn set_color(&mut self, color: Color);
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn draw_oval(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_oval(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn draw_arc(&mut self, x: f64, y: f64, width: f64, height: f64, start_deg: f64, extent_deg: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

// ── Recording surface ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Transform(Transform),
    Color(Color),
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Oval { x: f64, y: f64, width: f64, height: f64, filled: bool },
    Arc { x: f64, y: f64, width: f64, height: f64, start_deg: f64, extent_deg: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
}

/// A surface that only remembers what it was asked to draw.
#[derive(Clone, Debug, Default)]
pub struct CommandLog {
    commands: Vec<DrawCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Colours in the order they were set.
    pub fn colors(&self) -> Vec<Color> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Color(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for CommandLog {
    fn set_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::Transform(transform));
    }

    fn set_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::Color(color));
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2 });
    }

    fn draw_oval(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Oval { x, y, width, height, filled: false });
    }

    fn fill_oval(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Oval { x, y, width, height, filled: true });
    }

    fn draw_arc(&mut self, x: f64, y: f64, width: f64, height: f64, start_deg: f64, extent_deg: f64) {
        self.commands.push(DrawCommand::Arc {
            x,
            y,
            width,
            height,
            start_deg,
            extent_deg,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Rect { x, y, width, height });
    }
}
