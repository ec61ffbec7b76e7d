//! Drawing surface abstraction
//!
//! The simulation never rasterizes anything itself: every entity, animation
//! and HUD element emits 2D vector primitives into a [`Surface`]. [`Frame`]
//! is a surface that records the primitives of one tick so a backend (or a
//! test) can consume them afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Named palette colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
    Yellow,
    Green,
    Red,
}

/// Rendering backend consumed by the simulation
pub trait Surface {
    /// Erase everything drawn so far
    fn clear(&mut self);
    /// Single line segment
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    /// Closed polygon outline (last point joins the first)
    fn draw_line_loop(&mut self, points: &[Vec2], color: Color);
    /// Axis-aligned rectangle between two corners
    fn draw_rect(&mut self, min: Vec2, max: Vec2, fill: Color, outline: Color);
    /// Text centered on `position`
    fn draw_text(&mut self, position: Vec2, text: &str, font_size: f32, color: Color);
}

/// A recorded drawing primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    LineLoop {
        points: Vec<Vec2>,
        color: Color,
    },
    Rect {
        min: Vec2,
        max: Vec2,
        fill: Color,
        outline: Color,
    },
    Text {
        position: Vec2,
        text: String,
        font_size: f32,
        color: Color,
    },
}

/// Surface that records one frame of draw commands
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text strings drawn this frame, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Number of polygon outlines drawn with `color`
    pub fn line_loops(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::LineLoop { color: c, .. } if *c == color))
            .count()
    }
}

impl Surface for Frame {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }

    fn draw_line_loop(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 2 {
            return;
        }
        self.commands.push(DrawCommand::LineLoop {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_rect(&mut self, min: Vec2, max: Vec2, fill: Color, outline: Color) {
        self.commands.push(DrawCommand::Rect { min, max, fill, outline });
    }

    fn draw_text(&mut self, position: Vec2, text: &str, font_size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            font_size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_records_and_clears() {
        let mut frame = Frame::new();
        frame.draw_text(Vec2::ZERO, "SCORE: 001", 10.0, Color::Green);
        frame.draw_line_loop(&[Vec2::ZERO, Vec2::X, Vec2::Y], Color::White);
        frame.draw_line_loop(&[Vec2::ZERO], Color::White);
        assert_eq!(frame.commands.len(), 2);
        assert!(frame.contains_text("SCORE"));
        assert_eq!(frame.line_loops(Color::White), 1);

        frame.clear();
        assert!(frame.is_empty());
    }
}
