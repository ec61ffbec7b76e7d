//! Title screen with the main menu

use glam::Vec2;

use super::Transition;
use super::menu::Menu;
use crate::consts::{TEXT_COLOR, TITLE};
use crate::input::{Action, InputEvent};
use crate::renderer::Surface;
use crate::settings::GameConfig;

const LABELS: [&str; 3] = ["NEW GAME", "HIGHSCORES", "QUIT"];

#[derive(Debug, Clone)]
pub struct StartScreen {
    menu: Menu,
    title_position: Vec2,
    title_size: f32,
}

impl StartScreen {
    pub fn new(config: &GameConfig) -> Self {
        let width = (config.width / 3.0).floor();
        let height = (config.height / 10.0).floor();
        let spacing = (height * 1.5).floor();
        Self {
            menu: Menu::column(
                &LABELS,
                Vec2::new((config.width / 2.0).floor(), (config.height / 2.0).floor()),
                width,
                height,
                spacing,
            ),
            title_position: Vec2::new((config.width / 2.0).floor(), (config.height / 4.0).floor()),
            title_size: (config.width / 12.0).floor(),
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Option<Transition> {
        let InputEvent::Press(action) = event else {
            return None;
        };
        if self.menu.navigate(action) {
            return None;
        }
        match action {
            Action::Confirm => Some(match self.menu.active() {
                0 => Transition::NewGame,
                1 => Transition::ShowHighScores { submit: None },
                _ => Transition::Quit,
            }),
            Action::Quit => Some(Transition::Quit),
            _ => None,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();
        surface.draw_text(self.title_position, &TITLE.to_uppercase(), self.title_size, TEXT_COLOR);
        self.menu.draw(surface);
    }
}
