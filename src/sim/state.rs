//! Game session state
//!
//! One session per run: the ship, the entity collections, the wave
//! controller and the lives/score bookkeeping. The session owns every
//! entity outright; collections drop objects as soon as they turn disposable.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::animation::Animation;
use super::entity::SpaceObject;
use super::wave::WaveController;
use crate::settings::GameConfig;

/// Complete state of a running game
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Player ship (exactly one per session)
    pub ship: SpaceObject,
    pub asteroids: Vec<SpaceObject>,
    pub projectiles: Vec<SpaceObject>,
    pub pickups: Vec<SpaceObject>,
    /// Visual effects (not gameplay-affecting)
    pub animations: Vec<Animation>,
    pub waves: WaveController,
    pub score: u32,
    /// Going below zero starts the destruction sequence
    pub lives: i32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paused: bool,
    pub debug: bool,
    /// Terminal flag, set once the destruction animations have drained
    pub game_over: bool,
    /// Frame rate measured by the driver, shown in the debug overlay
    pub fps: f32,
}

impl GameSession {
    /// Create a new session with the ship parked at the arena center.
    ///
    /// The first wave spawns on the first tick.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let ship = SpaceObject::ship(config.arena_center(), &config);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            ship,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            animations: Vec::new(),
            waves: WaveController::new(config.start_round),
            score: 0,
            lives: config.start_lives,
            time_ticks: 0,
            paused: false,
            debug: false,
            game_over: false,
            fps: 0.0,
            config,
        }
    }

    pub fn round(&self) -> u32 {
        self.waves.round
    }

    /// Flip pause; a finished game stays as it is. Returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.game_over {
            self.paused = !self.paused;
        }
        self.paused
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }

    /// Live gameplay objects plus animations, for the debug overlay
    pub fn object_count(&self) -> usize {
        1 + self.asteroids.len() + self.projectiles.len() + self.pickups.len() + self.animations.len()
    }
}
