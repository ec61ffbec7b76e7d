//! End of run: name entry and what to do next

use glam::Vec2;

use super::Transition;
use super::menu::Menu;
use crate::consts::TEXT_COLOR;
use crate::highscores::ScoreEntry;
use crate::input::{Action, InputEvent};
use crate::renderer::Surface;
use crate::settings::GameConfig;

const LABELS: [&str; 3] = ["SUBMIT SCORE", "RESTART", "MAIN MENU"];
const EMPTY_SLOT: char = '_';

#[derive(Debug, Clone)]
pub struct EndScreen {
    score: u32,
    slots: Vec<char>,
    /// Next slot to fill
    cursor: usize,
    menu: Menu,
    width: f32,
    height: f32,
}

impl EndScreen {
    pub fn new(config: &GameConfig, score: u32) -> Self {
        let height = (config.height / 16.0).floor();
        let spacing = (height * 1.5).floor();
        let first = Vec2::new((config.width / 2.0).floor(), (config.height / 3.0).floor() * 2.0);
        Self {
            score,
            slots: vec![EMPTY_SLOT; config.name_length],
            cursor: 0,
            menu: Menu::column(&LABELS, first, (config.width / 3.0).floor(), height, spacing),
            width: config.width,
            height: config.height,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Name as currently shown, unfilled slots included
    pub fn name(&self) -> String {
        self.slots.iter().collect()
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Option<Transition> {
        let action = match event {
            InputEvent::Char(c) => {
                self.type_char(c);
                return None;
            }
            InputEvent::Press(action) => action,
            InputEvent::Release(_) => return None,
        };
        if self.menu.navigate(action) {
            return None;
        }
        match action {
            Action::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.slots[self.cursor] = EMPTY_SLOT;
                }
                None
            }
            Action::Confirm => Some(match self.menu.active() {
                0 => Transition::ShowHighScores {
                    submit: Some(ScoreEntry::new(self.name(), self.score)),
                },
                1 => Transition::NewGame,
                _ => Transition::MainMenu,
            }),
            Action::Quit => Some(Transition::Quit),
            _ => None,
        }
    }

    fn type_char(&mut self, c: char) {
        if c.is_ascii_alphanumeric() && self.cursor < self.slots.len() {
            self.slots[self.cursor] = c.to_ascii_uppercase();
            self.cursor += 1;
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let (w, h) = (self.width, self.height);
        surface.clear();
        surface.draw_text(
            Vec2::new(w / 2.0, (h / 5.0).floor()),
            &format!("SCORE: {}", self.score),
            (w / 20.0).floor(),
            TEXT_COLOR,
        );
        surface.draw_text(
            Vec2::new(w / 2.0, (h / 3.0).floor()),
            "ENTER YOUR NAME:",
            (w / 30.0).floor(),
            TEXT_COLOR,
        );
        let middle = (self.slots.len() as f32 - 1.0) / 2.0;
        for (i, letter) in self.slots.iter().enumerate() {
            let x = w / 2.0 + (i as f32 - middle) * (w / 8.0).floor();
            surface.draw_text(Vec2::new(x, h / 2.0), &letter.to_string(), (w / 16.0).floor(), TEXT_COLOR);
        }
        self.menu.draw(surface);
    }
}
