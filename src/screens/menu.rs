//! Vertical button menus shared by the non-game screens

use glam::Vec2;

use crate::consts::{BACKGROUND, TEXT_COLOR};
use crate::input::Action;
use crate::renderer::Surface;

/// A labelled rectangle; the active one is drawn with inverted colors
#[derive(Debug, Clone)]
pub struct Button {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub label: &'static str,
}

impl Button {
    pub fn draw(&self, active: bool, surface: &mut dyn Surface) {
        let half = Vec2::new((self.width / 2.0).floor(), self.height / 2.0);
        let (fill, text) = if active {
            (TEXT_COLOR, BACKGROUND)
        } else {
            (BACKGROUND, TEXT_COLOR)
        };
        surface.draw_rect(self.center - half, self.center + half, fill, TEXT_COLOR);
        surface.draw_text(self.center, self.label, (self.height / 2.0).floor(), text);
    }
}

/// Buttons stacked top to bottom with a wrapping cursor
#[derive(Debug, Clone)]
pub struct Menu {
    buttons: Vec<Button>,
    active: usize,
}

impl Menu {
    /// Lay out `labels` in a column starting at `first`, `spacing` apart
    pub fn column(labels: &[&'static str], first: Vec2, width: f32, height: f32, spacing: f32) -> Self {
        let buttons = labels
            .iter()
            .enumerate()
            .map(|(i, &label)| Button {
                center: first + Vec2::new(0.0, spacing * i as f32),
                width,
                height,
                label,
            })
            .collect();
        Self { buttons, active: 0 }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_label(&self) -> Option<&'static str> {
        self.buttons.get(self.active).map(|b| b.label)
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn next(&mut self) {
        if !self.buttons.is_empty() {
            self.active = (self.active + 1) % self.buttons.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.buttons.is_empty() {
            self.active = (self.active + self.buttons.len() - 1) % self.buttons.len();
        }
    }

    /// Move the cursor for navigation actions; returns true if consumed
    pub fn navigate(&mut self, action: Action) -> bool {
        match action {
            Action::NavigateDown => self.next(),
            Action::NavigateUp => self.previous(),
            _ => return false,
        }
        true
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for (index, button) in self.buttons.iter().enumerate() {
            button.draw(index == self.active, surface);
        }
    }
}
