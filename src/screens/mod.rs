//! Screen state machine
//!
//! Exactly one [`Screen`] is active. Screens never build their successors;
//! they return a [`Transition`] and the [`App`] driver swaps the active
//! screen, so there is only ever one tick source.

pub mod end;
pub mod game;
pub mod high_scores;
pub mod menu;
pub mod start;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::highscores::{ScoreEntry, ScoreStore};
use crate::input::InputEvent;
use crate::renderer::Surface;
use crate::settings::GameConfig;

pub use end::EndScreen;
pub use game::GameScreen;
pub use high_scores::HighScoresScreen;
pub use menu::{Button, Menu};
pub use start::StartScreen;

/// Handoff requested by the active screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    NewGame,
    MainMenu,
    /// Optionally persist a finished run first
    ShowHighScores { submit: Option<ScoreEntry> },
    EndOfRun { score: u32 },
    Quit,
}

/// The active screen
#[derive(Debug, Clone)]
pub enum Screen {
    Start(StartScreen),
    Game(Box<GameScreen>),
    HighScores(HighScoresScreen),
    End(EndScreen),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Start(_) => "start",
            Screen::Game(_) => "game",
            Screen::HighScores(_) => "highscores",
            Screen::End(_) => "end",
        }
    }

    fn handle_event(&mut self, event: InputEvent) -> Option<Transition> {
        match self {
            Screen::Start(screen) => screen.handle_event(event),
            Screen::Game(screen) => screen.handle_event(event),
            Screen::HighScores(screen) => screen.handle_event(event),
            Screen::End(screen) => screen.handle_event(event),
        }
    }

    /// Menus redraw every tick; the game stops asking while paused
    fn wants_tick(&self) -> bool {
        match self {
            Screen::Game(screen) => screen.wants_tick(),
            Screen::Start(_) | Screen::HighScores(_) | Screen::End(_) => true,
        }
    }

    fn tick(&mut self, surface: &mut dyn Surface) -> Option<Transition> {
        match self {
            Screen::Start(screen) => screen.draw(surface),
            Screen::Game(screen) => return screen.tick(surface),
            Screen::HighScores(screen) => screen.draw(surface),
            Screen::End(screen) => screen.draw(surface),
        }
        None
    }
}

/// Top-level driver owning the active screen and the score store
pub struct App {
    config: GameConfig,
    store: Box<dyn ScoreStore>,
    screen: Screen,
    /// Source of per-game seeds
    seeds: Pcg32,
    running: bool,
}

impl App {
    pub fn new(config: GameConfig, store: Box<dyn ScoreStore>, seed: u64) -> Self {
        let screen = Screen::Start(StartScreen::new(&config));
        Self {
            config,
            store,
            screen,
            seeds: Pcg32::seed_from_u64(seed),
            running: true,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the driver should schedule another tick
    pub fn wants_tick(&self) -> bool {
        self.running && self.screen.wants_tick()
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        if !self.running {
            return;
        }
        if let Some(transition) = self.screen.handle_event(event) {
            self.apply(transition);
        }
    }

    pub fn tick(&mut self, surface: &mut dyn Surface) {
        if !self.running {
            return;
        }
        if let Some(transition) = self.screen.tick(surface) {
            self.apply(transition);
        }
    }

    fn apply(&mut self, transition: Transition) {
        let next = match transition {
            Transition::NewGame => {
                let seed = self.seeds.random::<u64>();
                Screen::Game(Box::new(GameScreen::new(self.config.clone(), seed)))
            }
            Transition::MainMenu => Screen::Start(StartScreen::new(&self.config)),
            Transition::ShowHighScores { submit } => {
                Screen::HighScores(HighScoresScreen::new(&self.config, self.store.as_mut(), submit))
            }
            Transition::EndOfRun { score } => Screen::End(EndScreen::new(&self.config, score)),
            Transition::Quit => {
                log::info!("Quit requested from {} screen", self.screen.name());
                self.running = false;
                return;
            }
        };
        log::info!("Screen transition: {} -> {}", self.screen.name(), next.name());
        self.screen = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use crate::input::Action;
    use crate::renderer::Frame;

    fn app(config: GameConfig) -> App {
        App::new(config, Box::new(MemoryScoreStore::new()), 2024)
    }

    fn press(app: &mut App, action: Action) {
        app.handle_event(InputEvent::Press(action));
    }

    #[test]
    fn test_start_menu_routes() {
        let mut app = app(GameConfig::default());
        assert_eq!(app.screen().name(), "start");

        press(&mut app, Action::NavigateDown);
        press(&mut app, Action::Confirm);
        assert_eq!(app.screen().name(), "highscores");

        press(&mut app, Action::Confirm);
        assert_eq!(app.screen().name(), "start");

        press(&mut app, Action::NavigateUp);
        press(&mut app, Action::Confirm);
        assert!(!app.is_running());
        assert!(!app.wants_tick());
    }

    #[test]
    fn test_new_game_waits_while_paused() {
        let mut app = app(GameConfig::default());
        press(&mut app, Action::Confirm);
        assert_eq!(app.screen().name(), "game");

        let mut frame = Frame::new();
        assert!(app.wants_tick());
        app.tick(&mut frame);
        assert!(!app.wants_tick());

        // Quit is not available mid-game
        press(&mut app, Action::Quit);
        assert!(app.is_running());

        press(&mut app, Action::Pause);
        assert!(app.wants_tick());
    }

    #[test]
    fn test_full_run_reaches_leaderboard() {
        let config = GameConfig {
            start_lives: -1,
            ..GameConfig::default()
        };
        let mut app = app(config);
        press(&mut app, Action::Confirm);
        press(&mut app, Action::Pause);

        let mut frame = Frame::new();
        for _ in 0..2000 {
            if app.screen().name() != "game" {
                break;
            }
            app.tick(&mut frame);
        }
        assert_eq!(app.screen().name(), "end");

        for c in "abc".chars() {
            app.handle_event(InputEvent::Char(c));
        }
        press(&mut app, Action::Confirm);
        let Screen::HighScores(screen) = app.screen() else {
            panic!("expected high scores screen");
        };
        assert_eq!(screen.entries(), &[ScoreEntry::new("ABC", 0)]);

        app.tick(&mut frame);
        assert!(frame.contains_text("ABC"));
    }

    #[test]
    fn test_end_screen_quits_and_restarts() {
        let config = GameConfig {
            start_lives: -1,
            ..GameConfig::default()
        };
        let mut app = app(config);
        app.apply(Transition::EndOfRun { score: 9 });
        press(&mut app, Action::NavigateDown);
        press(&mut app, Action::Confirm);
        assert_eq!(app.screen().name(), "game");

        app.apply(Transition::EndOfRun { score: 9 });
        press(&mut app, Action::Quit);
        assert!(!app.is_running());
    }
}
