//! Game configuration
//!
//! Built once at startup and handed to every screen and session by value.
//! Loadable from a JSON file; missing keys keep their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub width: f32,
    pub height: f32,
    /// Delay between ticks (milliseconds)
    pub tick_interval_ms: u64,

    // === Ship ===
    pub ship_size: f32,
    /// Ticks between shots
    pub reload_ticks: i32,
    /// Degrees/tick
    pub turn_rate: f32,
    /// Pixels/tick²
    pub acceleration: f32,
    /// Immunity window after a hit (ticks)
    pub invincibility_ticks: i32,
    pub projectile_speed: f32,

    // === Asteroids and waves ===
    pub asteroid_size: f32,
    pub asteroid_speed: f32,
    /// Minimum distance between a freshly spawned asteroid and the ship
    pub safe_spawn_distance: f32,
    pub start_round: u32,
    pub start_lives: i32,

    // === Pick-ups ===
    /// 1-in-N chance per quarter asteroid kill (0 = never, 1 = always)
    pub pickup_drop_one_in: u32,
    pub pickup_lifespan_ticks: u32,
    pub pickup_size: f32,

    // === HUD ===
    pub font_size: f32,
    /// Letter slots on the name entry screen
    pub name_length: usize,
    /// Rows shown on the high score screen
    pub high_score_rows: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            tick_interval_ms: TICK_INTERVAL_MS,

            ship_size: SHIP_SIZE,
            reload_ticks: RELOAD_TICKS,
            turn_rate: TURN_RATE,
            acceleration: ACCELERATION,
            invincibility_ticks: INVINCIBILITY_TICKS,
            projectile_speed: PROJECTILE_SPEED,

            asteroid_size: ASTEROID_SIZE,
            asteroid_speed: ASTEROID_SPEED,
            safe_spawn_distance: SAFE_SPAWN_DISTANCE,
            start_round: START_ROUND,
            start_lives: START_LIVES,

            pickup_drop_one_in: PICKUP_DROP_ONE_IN,
            pickup_lifespan_ticks: PICKUP_LIFESPAN_TICKS,
            pickup_size: PICKUP_SIZE,

            font_size: FONT_SIZE,
            name_length: NAME_LENGTH,
            high_score_rows: HIGH_SCORE_ROWS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("ship_size", self.ship_size),
            ("asteroid_size", self.asteroid_size),
            ("pickup_size", self.pickup_size),
            ("font_size", self.font_size),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::InvalidConfig("tick_interval_ms must be non-zero".into()));
        }
        if self.name_length == 0 {
            return Err(Error::InvalidConfig("name_length must be non-zero".into()));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Center of the arena
    pub fn arena_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}
