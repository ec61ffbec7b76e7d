//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only, passed explicitly
//! - Stable iteration order (collection order)
//! - Drawing goes through the `Surface` trait, nothing else

pub mod animation;
pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;
pub mod wave;

pub use animation::Animation;
pub use collision::{asteroid_collides_with, average_radius, pickup_touches};
pub use entity::{AsteroidSize, ObjectKind, SpaceObject};
pub use state::GameSession;
pub use tick::{TickInput, TickOutcome, tick};
pub use wave::{WaveController, WavePhase, safe_spawn_position};
