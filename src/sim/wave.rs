//! Wave controller
//!
//! Waits until the arena is clear of asteroids, projectiles and animations,
//! then bumps the round counter and spawns `round` whole asteroids away from
//! the ship.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::entity::{AsteroidSize, SpaceObject};
use crate::consts::{ROUND_TEXT_TICKS, TEXT_COLOR};
use crate::settings::GameConfig;

/// Give up resampling after this many rejected spawn points
const MAX_SPAWN_ATTEMPTS: u32 = 10_000;

/// Wave controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Waiting for the arena to clear
    Idle,
    /// Clear detected, next step spawns a wave
    Spawning,
}

/// Round counter and spawn state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveController {
    pub round: u32,
    pub phase: WavePhase,
}

impl WaveController {
    pub fn new(start_round: u32) -> Self {
        Self {
            round: start_round,
            phase: WavePhase::Idle,
        }
    }

    /// Run one step. Returns the new round number if a wave was spawned.
    pub fn step<R: Rng>(
        &mut self,
        ship_center: Vec2,
        asteroids: &mut Vec<SpaceObject>,
        projectiles_empty: bool,
        animations: &mut Vec<Animation>,
        config: &GameConfig,
        rng: &mut R,
    ) -> Option<u32> {
        if self.phase == WavePhase::Idle && asteroids.is_empty() && animations.is_empty() && projectiles_empty {
            self.phase = WavePhase::Spawning;
        }
        if self.phase != WavePhase::Spawning {
            return None;
        }

        self.round += 1;
        for _ in 0..self.round {
            let pos = safe_spawn_position(ship_center, config.safe_spawn_distance, config, rng);
            asteroids.push(SpaceObject::asteroid(
                pos,
                config.asteroid_size,
                AsteroidSize::Whole,
                config.asteroid_speed,
                rng,
            ));
        }
        animations.push(Animation::text(
            Vec2::new(config.width / 2.0, config.height / 3.0),
            format!("ROUND {}", self.round),
            ROUND_TEXT_TICKS,
            config.font_size * 2.0,
            TEXT_COLOR,
        ));
        self.phase = WavePhase::Idle;
        log::info!("Round {}: spawned {} asteroids", self.round, self.round);
        Some(self.round)
    }
}

/// Uniform random arena point at least `min_distance` from `ship_center`.
///
/// Rejects and resamples; if the exclusion zone swallows (nearly) the whole
/// arena, falls back to the farthest candidate seen.
pub fn safe_spawn_position<R: Rng>(ship_center: Vec2, min_distance: f32, config: &GameConfig, rng: &mut R) -> Vec2 {
    let mut best = Vec2::ZERO;
    let mut best_distance = f32::MIN;
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = Vec2::new(
            rng.random_range(0.0..config.width),
            rng.random_range(0.0..config.height),
        );
        let distance = ship_center.distance(candidate);
        if distance >= min_distance {
            return candidate;
        }
        if distance > best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    log::warn!(
        "No spawn point {} px from the ship after {} attempts, using {:?}",
        min_distance,
        MAX_SPAWN_ATTEMPTS,
        best
    );
    best
}
