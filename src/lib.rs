//! Asteroid Field - a wrap-around arena arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, physics, collisions, waves, session tick)
//! - `screens`: Screen state machine (start, game, end, high scores)
//! - `renderer`: Drawing surface abstraction consumed by the simulation
//! - `input`: Named input actions
//! - `highscores`: Append-only score store
//! - `settings`: Immutable game configuration

pub mod error;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod screens;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use highscores::{FileScoreStore, MemoryScoreStore, ScoreEntry, ScoreStore};
pub use settings::GameConfig;

use glam::Vec2;

/// Default game configuration constants
pub mod consts {
    use crate::renderer::Color;

    pub const TITLE: &str = "Asteroids";

    /// Arena dimensions (pixels)
    pub const WIDTH: f32 = 480.0;
    pub const HEIGHT: f32 = 320.0;

    /// Fixed tick interval (milliseconds)
    pub const TICK_INTERVAL_MS: u64 = 10;
    /// Ticks between shots
    pub const RELOAD_TICKS: i32 = 20;
    /// Pixels/tick added on top of the ship's velocity
    pub const PROJECTILE_SPEED: f32 = 4.0;
    pub const SHIP_SIZE: f32 = 15.0;
    pub const ASTEROID_SIZE: f32 = 40.0;
    /// Pixels/tick for a whole asteroid
    pub const ASTEROID_SPEED: f32 = 0.4;
    pub const START_LIVES: i32 = 3;
    pub const START_ROUND: u32 = 0;
    /// Degrees/tick
    pub const TURN_RATE: f32 = 4.0;
    /// Pixels/tick²
    pub const ACCELERATION: f32 = 0.05;
    /// 1-in-N chance of a pick-up per quarter asteroid kill
    pub const PICKUP_DROP_ONE_IN: u32 = 15;

    pub const INVINCIBILITY_TICKS: i32 = 60;
    pub const PICKUP_LIFESPAN_TICKS: u32 = 350;
    pub const PICKUP_SIZE: f32 = 10.0;
    pub const PICKUP_SPIN: f32 = 5.0;
    pub const SAFE_SPAWN_DISTANCE: f32 = 100.0;

    /// HUD
    pub const FONT_SIZE: f32 = 10.0;
    pub const NAME_LENGTH: usize = 3;
    pub const HIGH_SCORE_ROWS: usize = 5;

    /// Animation durations (ticks)
    pub const ASTEROID_EXPLOSION_TICKS: u32 = 50;
    pub const SHIP_EXPLOSION_TICKS: u32 = 30;
    pub const SHIP_DEBRIS_TICKS: u32 = 280;
    pub const GAME_OVER_TEXT_TICKS: u32 = 280;
    pub const ROUND_TEXT_TICKS: u32 = 80;
    pub const PICKUP_TEXT_TICKS: u32 = 40;
    pub const SPARK_COUNT: usize = 40;

    /// Colors
    pub const BACKGROUND: Color = Color::Black;
    pub const DRAW_COLOR: Color = Color::White;
    pub const PLAYER_COLOR: Color = Color::Yellow;
    pub const TEXT_COLOR: Color = Color::Green;
    pub const PICKUP_COLOR: Color = Color::Red;

    pub const INSTRUCTIONS: &str = "press <P> to START/PAUSE/UNPAUSE\n\
        press <W> or <UP> to ACCELERATE\n\
        press <A> or <LEFT> to TURN LEFT\n\
        press <D> or <RIGHT> to TURN RIGHT\n\
        press <SPACE> to SHOOT";
}

/// Rotate `point` around `pivot` by `degrees`.
///
/// Positive angles turn counter-clockwise on screen (y axis pointing down),
/// so a ship heading of +90 faces left.
#[inline]
pub fn rotate_about(point: Vec2, degrees: f32, pivot: Vec2) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = point - pivot;
    Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos) + pivot
}

/// Wrap a coordinate into `[0, extent)`
#[inline]
pub fn wrap_coord(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Wrap a position into the toroidal arena `[0, width) × [0, height)`
#[inline]
pub fn wrap_into_arena(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_coord(pos.x, width), wrap_coord(pos.y, height))
}

/// Point halfway between `a` and `b`
#[inline]
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn test_rotate_quarter_turn_faces_left() {
        let up = Vec2::new(0.0, -1.0);
        assert!(approx(rotate_about(up, 90.0, Vec2::ZERO), Vec2::new(-1.0, 0.0)));
        assert!(approx(rotate_about(up, -90.0, Vec2::ZERO), Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_rotate_about_pivot_keeps_distance() {
        let pivot = Vec2::new(100.0, 50.0);
        let p = Vec2::new(110.0, 50.0);
        let r = rotate_about(p, 37.0, pivot);
        assert!((r.distance(pivot) - 10.0).abs() < 1e-4);
        assert!(approx(rotate_about(p, 360.0, pivot), p));
    }

    #[test]
    fn test_vector_arithmetic() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(1.0, 1.0);
        assert_eq!(a + b, Vec2::new(4.0, 5.0));
        assert_eq!(a - b, Vec2::new(2.0, 3.0));
        assert_eq!(a.length(), 5.0);
        assert_eq!(Vec2::ZERO.distance(a), 5.0);
        assert_eq!(midpoint(a, b), Vec2::new(2.0, 2.5));
    }

    #[test]
    fn test_wrap_edges() {
        assert_eq!(wrap_coord(480.0, 480.0), 0.0);
        assert_eq!(wrap_coord(-1.0, 480.0), 479.0);
        assert_eq!(wrap_coord(-1e-9, 480.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_wrap_stays_in_arena(x in -1.0e5f32..1.0e5, y in -1.0e5f32..1.0e5) {
            let p = wrap_into_arena(Vec2::new(x, y), consts::WIDTH, consts::HEIGHT);
            prop_assert!(p.x >= 0.0 && p.x < consts::WIDTH);
            prop_assert!(p.y >= 0.0 && p.y < consts::HEIGHT);
        }
    }
}
