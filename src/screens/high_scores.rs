//! Leaderboard screen
//!
//! Persists a pending entry (if any) on construction, then shows the top
//! rows. A failing store shows an empty board.

use glam::Vec2;

use super::Transition;
use super::menu::Menu;
use crate::consts::TEXT_COLOR;
use crate::highscores::{ScoreEntry, ScoreStore};
use crate::input::{Action, InputEvent};
use crate::renderer::Surface;
use crate::settings::GameConfig;

#[derive(Debug, Clone)]
pub struct HighScoresScreen {
    entries: Vec<ScoreEntry>,
    menu: Menu,
    width: f32,
    height: f32,
}

impl HighScoresScreen {
    pub fn new(config: &GameConfig, store: &mut dyn ScoreStore, submit: Option<ScoreEntry>) -> Self {
        if let Some(entry) = submit {
            if let Err(e) = store.append(&entry.name, entry.score) {
                log::warn!("Failed to save score for {}: {}", entry.name, e);
            }
        }
        let entries = store.top_entries(config.high_score_rows).unwrap_or_else(|e| {
            log::warn!("Failed to read high scores: {}", e);
            Vec::new()
        });

        let button = Vec2::new((config.width / 2.0).floor(), (config.height / 7.0).floor() * 6.0);
        Self {
            entries,
            menu: Menu::column(
                &["MAIN MENU"],
                button,
                (config.width / 3.0).floor(),
                (config.height / 10.0).floor(),
                0.0,
            ),
            width: config.width,
            height: config.height,
        }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Option<Transition> {
        match event {
            InputEvent::Press(Action::Confirm) => Some(Transition::MainMenu),
            _ => None,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let (w, h) = (self.width, self.height);
        surface.clear();
        surface.draw_text(
            Vec2::new(w / 2.0, (h / 6.0).floor()),
            "HIGHSCORES",
            (w / 16.0).floor(),
            TEXT_COLOR,
        );
        self.menu.draw(surface);

        let spacing = (h / 12.0).floor();
        for (i, entry) in self.entries.iter().enumerate() {
            surface.draw_text(
                Vec2::new(w / 2.0, (h / 3.0).floor() + spacing * i as f32),
                &format!("{}\t{}", entry.name, entry.score),
                (spacing / 2.0).floor(),
                TEXT_COLOR,
            );
        }
    }
}
