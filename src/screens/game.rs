//! The running game
//!
//! Turns press/release events into held intents and drives the session one
//! tick at a time. Pausing stops tick requests; the screen still asks for a
//! single frame after every pause toggle so the overlay appears.

use std::time::Instant;

use super::Transition;
use crate::input::{Action, InputEvent};
use crate::renderer::Surface;
use crate::settings::GameConfig;
use crate::sim::{self, GameSession, TickInput, TickOutcome};

/// Wall-clock frame rate for the debug overlay
#[derive(Debug, Clone, Default)]
pub struct FpsMeter {
    last: Option<Instant>,
    fps: f32,
}

impl FpsMeter {
    /// Record a frame at `now` and return the current rate
    pub fn sample(&mut self, now: Instant) -> f32 {
        if let Some(last) = self.last {
            let dt = now.duration_since(last).as_secs_f32();
            self.fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
        }
        self.last = Some(now);
        self.fps
    }
}

#[derive(Debug, Clone)]
pub struct GameScreen {
    session: GameSession,
    intents: TickInput,
    redraw_pending: bool,
    fps: FpsMeter,
}

impl GameScreen {
    /// Fresh session, paused, with one frame queued so wave 1 is visible
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut session = GameSession::new(config, seed);
        session.paused = true;
        log::info!("New game (seed {})", seed);
        Self {
            session,
            intents: TickInput::default(),
            redraw_pending: true,
            fps: FpsMeter::default(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn intents(&self) -> TickInput {
        self.intents
    }

    pub fn wants_tick(&self) -> bool {
        !self.session.game_over && (!self.session.paused || self.redraw_pending)
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Option<Transition> {
        let (action, held) = match event {
            InputEvent::Press(action) => (action, true),
            InputEvent::Release(action) => (action, false),
            InputEvent::Char(_) => return None,
        };
        match action {
            Action::Accelerate => self.intents.accelerate = held,
            Action::TurnLeft => self.intents.turn_left = held,
            Action::TurnRight => self.intents.turn_right = held,
            Action::Fire => self.intents.fire = held,
            Action::Pause if held => {
                let paused = self.session.toggle_pause();
                self.redraw_pending = true;
                log::debug!("Game {}", if paused { "paused" } else { "resumed" });
            }
            Action::ToggleDebug if held => {
                self.session.toggle_debug();
            }
            _ => {}
        }
        None
    }

    /// Advance one tick; hands off to the end screen once the run is over
    pub fn tick(&mut self, surface: &mut dyn Surface) -> Option<Transition> {
        self.redraw_pending = false;
        self.session.fps = self.fps.sample(Instant::now());
        match sim::tick(&mut self.session, &self.intents, surface) {
            TickOutcome::GameOver => Some(Transition::EndOfRun {
                score: self.session.score,
            }),
            TickOutcome::Continue | TickOutcome::Paused | TickOutcome::Finished => None,
        }
    }
}
