//! Space objects: ship, projectiles, asteroids and pick-ups
//!
//! Every object shares the same geometry (center, heading, velocity, local
//! polygon, world-space border points) and differs only in its [`ObjectKind`]
//! payload. Update, draw and the disposal predicate dispatch on the kind.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{DRAW_COLOR, PICKUP_COLOR, PICKUP_SPIN, PLAYER_COLOR};
use crate::renderer::{Color, Surface};
use crate::settings::GameConfig;
use crate::{rotate_about, wrap_into_arena};

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidSize {
    Whole,
    Half,
    Quarter,
}

impl AsteroidSize {
    /// Speed multiplier relative to the configured asteroid speed
    pub fn speed_factor(&self) -> f32 {
        match self {
            AsteroidSize::Whole => 1.0,
            AsteroidSize::Half => 2.0,
            AsteroidSize::Quarter => 3.0,
        }
    }

    /// Size class and size ratio of the fragments this class splits into
    pub fn fragment(&self) -> Option<(AsteroidSize, f32)> {
        match self {
            AsteroidSize::Whole => Some((AsteroidSize::Half, 0.75)),
            AsteroidSize::Half => Some((AsteroidSize::Quarter, 0.6)),
            AsteroidSize::Quarter => None,
        }
    }
}

/// Player ship payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Counts down every tick; firing requires it to be negative
    pub reload_timer: i32,
    pub invincible: bool,
    pub invincible_timer: i32,
    /// Ticks spent invincible, drives the blink cadence
    pub blink_timer: u32,
    /// Set by `accelerate`, cleared after the exhaust is drawn
    pub accelerating: bool,
    pub destroyed: bool,
    pub acceleration: Vec2,
    exhaust_shape: Vec<Vec2>,
    pub exhaust_points: Vec<Vec2>,
}

impl Ship {
    fn advance_timers(&mut self) {
        self.reload_timer = (self.reload_timer - 1).max(-1);
        if self.invincible {
            self.invincible_timer -= 1;
            self.blink_timer += 1;
        }
        if self.invincible_timer < 1 {
            self.invincible = false;
            self.blink_timer = 0;
        }
    }

    /// Whether the hull is drawn this tick while blinking
    pub fn blink_visible(&self) -> bool {
        (self.blink_timer / 2) % 4 == 0
    }
}

/// Asteroid payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub size_class: AsteroidSize,
    /// Degrees/tick
    pub spin: f32,
    /// Mean distance from center to each shape vertex
    pub radius: f32,
    pub destroyed: bool,
}

/// Extra-life pick-up payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickUp {
    pub spin: f32,
    pub remaining_ticks: u32,
}

/// Per-variant state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectKind {
    Ship(Ship),
    Projectile,
    Asteroid(Asteroid),
    PickUp(PickUp),
}

/// A polygonal object moving through the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceObject {
    pub center: Vec2,
    /// Degrees, accumulates additively
    pub heading: f32,
    /// Pixels/tick
    pub velocity: Vec2,
    pub size: f32,
    /// Local-space polygon
    pub shape: Vec<Vec2>,
    /// `shape` placed at `center` and rotated by `heading`
    pub border_points: Vec<Vec2>,
    /// Sticky: once set the owning collection drops the object
    pub disposable: bool,
    pub color: Color,
    pub kind: ObjectKind,
}

impl SpaceObject {
    fn new(center: Vec2, heading: f32, size: f32, shape: Vec<Vec2>, color: Color, kind: ObjectKind) -> Self {
        let mut object = Self {
            center,
            heading,
            velocity: Vec2::ZERO,
            size,
            shape,
            border_points: Vec::new(),
            disposable: false,
            color,
            kind,
        };
        object.refresh_border_points();
        object
    }

    /// The player ship, a triangle pointing up with an exhaust plume behind it
    pub fn ship(center: Vec2, config: &GameConfig) -> Self {
        let size = config.ship_size;
        let half = (size / 2.0).floor();
        let shape = vec![
            Vec2::new(0.0, -size),
            Vec2::new(-half, half),
            Vec2::new(half, half),
        ];
        let exhaust_shape = vec![
            Vec2::new(-(half - 2.0), half + 3.0),
            Vec2::new(0.0, half + 9.0),
            Vec2::new(half - 2.0, half + 3.0),
        ];
        let ship = Ship {
            reload_timer: config.reload_ticks,
            invincible: false,
            invincible_timer: 0,
            blink_timer: 0,
            accelerating: false,
            destroyed: false,
            acceleration: Vec2::ZERO,
            exhaust_shape,
            exhaust_points: Vec::new(),
        };
        Self::new(center, 0.0, size, shape, PLAYER_COLOR, ObjectKind::Ship(ship))
    }

    /// A projectile leaving `center` along `heading`, inheriting `muzzle_velocity`
    pub fn projectile(center: Vec2, heading: f32, muzzle_velocity: Vec2, size: f32, speed: f32) -> Self {
        let shape = vec![Vec2::new(0.0, -size / 2.0), Vec2::new(0.0, size / 2.0)];
        let mut projectile = Self::new(center, heading, size, shape, DRAW_COLOR, ObjectKind::Projectile);
        projectile.velocity = rotate_about(Vec2::new(0.0, -speed), heading, Vec2::ZERO) + muzzle_velocity;
        projectile
    }

    /// An asteroid with a jittered octagonal outline, random drift and spin
    pub fn asteroid<R: Rng>(center: Vec2, size: f32, size_class: AsteroidSize, speed: f32, rng: &mut R) -> Self {
        let half = (size / 2.0).floor();
        let third = (size / 3.0).floor();
        let jitter = (size / 4.0).floor() as i32;
        let mut j = || rng.random_range(-jitter..=jitter) as f32;
        let shape = vec![
            Vec2::new(0.0, -half + j()),
            Vec2::new(third + j(), -third + j()),
            Vec2::new(half + j(), 0.0),
            Vec2::new(third + j(), third + j()),
            Vec2::new(0.0, half + j()),
            Vec2::new(-third + j(), third + j()),
            Vec2::new(-half + j(), 0.0),
            Vec2::new(-third + j(), -third + j()),
        ];
        let radius = super::collision::average_radius(&shape);
        let asteroid = Asteroid {
            size_class,
            spin: rng.random_range(-3..=3) as f32,
            radius,
            destroyed: false,
        };
        let mut object = Self::new(center, 0.0, size, shape, DRAW_COLOR, ObjectKind::Asteroid(asteroid));
        let drift = rng.random_range(-180..=180) as f32;
        object.velocity = rotate_about(
            Vec2::new(0.0, speed * size_class.speed_factor()),
            drift,
            Vec2::ZERO,
        );
        object
    }

    /// A spinning diamond that grants an extra life
    pub fn pickup(center: Vec2, size: f32, lifespan_ticks: u32) -> Self {
        let half = (size / 2.0).floor();
        let shape = vec![
            Vec2::new(0.0, -half),
            Vec2::new(half, 0.0),
            Vec2::new(0.0, half),
            Vec2::new(-half, 0.0),
        ];
        let pickup = PickUp {
            spin: PICKUP_SPIN,
            remaining_ticks: lifespan_ticks,
        };
        Self::new(center, 0.0, size, shape, PICKUP_COLOR, ObjectKind::PickUp(pickup))
    }

    pub fn as_ship(&self) -> Option<&Ship> {
        match &self.kind {
            ObjectKind::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_asteroid(&self) -> Option<&Asteroid> {
        match &self.kind {
            ObjectKind::Asteroid(asteroid) => Some(asteroid),
            _ => None,
        }
    }

    pub fn as_pickup(&self) -> Option<&PickUp> {
        match &self.kind {
            ObjectKind::PickUp(pickup) => Some(pickup),
            _ => None,
        }
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, ObjectKind::Projectile)
    }

    /// Recompute world-space outline (and the ship's exhaust)
    pub fn refresh_border_points(&mut self) {
        let center = self.center;
        let heading = self.heading;
        let place = |p: &Vec2| rotate_about(center + *p, heading, center);
        self.border_points = self.shape.iter().map(place).collect();
        if let ObjectKind::Ship(ship) = &mut self.kind {
            ship.exhaust_points = ship.exhaust_shape.iter().map(place).collect();
        }
    }

    /// Advance one tick: spin, integrate, wrap (or leave bounds), refresh
    /// the outline and re-evaluate disposal.
    pub fn update(&mut self, width: f32, height: f32) {
        match &mut self.kind {
            ObjectKind::Ship(ship) => ship.advance_timers(),
            ObjectKind::Asteroid(asteroid) => self.heading += asteroid.spin,
            ObjectKind::PickUp(pickup) => {
                self.heading += pickup.spin;
                pickup.remaining_ticks = pickup.remaining_ticks.saturating_sub(1);
            }
            ObjectKind::Projectile => {}
        }

        self.center += self.velocity;
        if !self.is_projectile() {
            self.center = wrap_into_arena(self.center, width, height);
        }
        self.refresh_border_points();
        self.disposable = self.disposable || self.is_expired(width, height);
    }

    /// Type-specific disposal predicate
    fn is_expired(&self, width: f32, height: f32) -> bool {
        match &self.kind {
            ObjectKind::Ship(_) => false,
            ObjectKind::Projectile => {
                let Vec2 { x, y } = self.center;
                x >= width || x <= 0.0 || y >= height || y <= 0.0
            }
            ObjectKind::Asteroid(asteroid) => asteroid.destroyed,
            ObjectKind::PickUp(pickup) => pickup.remaining_ticks == 0,
        }
    }

    /// Emit the outline as a closed loop
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        if let ObjectKind::Ship(ship) = &mut self.kind {
            if ship.destroyed {
                return;
            }
            if ship.accelerating {
                let plume = &ship.exhaust_points;
                surface.draw_line(plume[0], plume[1], 2.0, DRAW_COLOR);
                surface.draw_line(plume[1], plume[2], 2.0, DRAW_COLOR);
                ship.accelerating = false;
            }
            if ship.invincible && !ship.blink_visible() {
                return;
            }
        }
        surface.draw_line_loop(&self.border_points, self.color);
    }

    /// Add `degrees` to the heading
    pub fn rotate(&mut self, degrees: f32) {
        self.heading += degrees;
    }

    /// Thrust along the current heading (ship only)
    pub fn accelerate(&mut self, magnitude: f32) {
        if let ObjectKind::Ship(ship) = &mut self.kind {
            ship.acceleration = rotate_about(Vec2::new(0.0, -magnitude), self.heading, Vec2::ZERO);
            self.velocity += ship.acceleration;
            ship.accelerating = true;
        }
    }

    pub fn can_fire(&self) -> bool {
        self.as_ship()
            .is_some_and(|ship| !ship.destroyed && ship.reload_timer < 0)
    }

    /// Fire a projectile if reloaded (ship only)
    pub fn fire(&mut self, config: &GameConfig) -> Option<SpaceObject> {
        if !self.can_fire() {
            return None;
        }
        if let ObjectKind::Ship(ship) = &mut self.kind {
            ship.reload_timer = config.reload_ticks;
        }
        Some(Self::projectile(
            self.center,
            self.heading,
            self.velocity,
            (self.size / 3.0).floor(),
            config.projectile_speed,
        ))
    }

    pub fn is_invincible(&self) -> bool {
        self.as_ship().is_some_and(|ship| ship.invincible)
    }

    pub fn is_destroyed(&self) -> bool {
        self.as_ship().is_some_and(|ship| ship.destroyed)
    }

    /// Start the post-hit immunity window (ship only)
    pub fn set_invincible(&mut self, ticks: i32) {
        if let ObjectKind::Ship(ship) = &mut self.kind {
            ship.invincible = true;
            ship.invincible_timer = ticks;
        }
    }

    /// Mark the ship as wrecked; it stops drawing and firing
    pub fn wreck(&mut self) {
        if let ObjectKind::Ship(ship) = &mut self.kind {
            ship.destroyed = true;
        }
    }

    /// End an asteroid's life and return its fragments.
    ///
    /// Whole yields two Half, Half yields two Quarter, Quarter yields none.
    /// Only the first call splits; later calls (and non-asteroids) yield nothing.
    pub fn destroy<R: Rng>(&mut self, speed: f32, rng: &mut R) -> Vec<SpaceObject> {
        let size_class = match &mut self.kind {
            ObjectKind::Asteroid(asteroid) if !asteroid.destroyed => {
                asteroid.destroyed = true;
                asteroid.size_class
            }
            _ => return Vec::new(),
        };
        self.disposable = true;

        match size_class.fragment() {
            Some((child, ratio)) => {
                let size = (self.size * ratio).trunc();
                (0..2)
                    .map(|_| Self::asteroid(self.center, size, child, speed, rng))
                    .collect()
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Frame;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_destroy_splits_by_size_class() {
        let mut rng = Pcg32::seed_from_u64(7);
        let cfg = config();
        let mut whole = SpaceObject::asteroid(Vec2::new(50.0, 50.0), 40.0, AsteroidSize::Whole, 0.4, &mut rng);

        let halves = whole.destroy(cfg.asteroid_speed, &mut rng);
        assert_eq!(halves.len(), 2);
        assert!(whole.disposable);
        for half in &halves {
            let a = half.as_asteroid().unwrap();
            assert_eq!(a.size_class, AsteroidSize::Half);
            assert_eq!(half.size, 30.0);
            assert_eq!(half.center, whole.center);
        }

        let mut half = halves[0].clone();
        let quarters = half.destroy(cfg.asteroid_speed, &mut rng);
        assert_eq!(quarters.len(), 2);
        assert!(quarters.iter().all(|q| q.as_asteroid().unwrap().size_class == AsteroidSize::Quarter));
        assert_eq!(quarters[0].size, 18.0);

        let mut quarter = quarters[0].clone();
        assert!(quarter.destroy(cfg.asteroid_speed, &mut rng).is_empty());
        assert!(quarter.disposable);
    }

    #[test]
    fn test_destroy_only_splits_once() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut whole = SpaceObject::asteroid(Vec2::new(50.0, 50.0), 40.0, AsteroidSize::Whole, 0.4, &mut rng);
        assert_eq!(whole.destroy(0.4, &mut rng).len(), 2);
        assert!(whole.destroy(0.4, &mut rng).is_empty());
        whole.update(480.0, 320.0);
        assert!(whole.disposable);
    }

    #[test]
    fn test_fragment_speed_scales_with_class() {
        let mut rng = Pcg32::seed_from_u64(11);
        let quarter = SpaceObject::asteroid(Vec2::ZERO, 18.0, AsteroidSize::Quarter, 0.4, &mut rng);
        assert!((quarter.velocity.length() - 1.2).abs() < 1e-4);
        assert!(quarter.as_asteroid().unwrap().radius > 0.0);
    }

    #[test]
    fn test_projectile_inherits_ship_velocity() {
        let cfg = config();
        let mut ship = SpaceObject::ship(Vec2::new(100.0, 100.0), &cfg);
        ship.velocity = Vec2::new(1.0, 0.0);
        // Not reloaded yet
        assert!(ship.fire(&cfg).is_none());
        for _ in 0..=cfg.reload_ticks {
            ship.update(cfg.width, cfg.height);
        }
        let shot = ship.fire(&cfg).expect("reloaded");
        assert!((shot.velocity - Vec2::new(1.0, -4.0)).length() < 1e-4);
        assert_eq!(shot.size, 5.0);
        assert!(!ship.can_fire());
    }

    #[test]
    fn test_projectile_disposes_outside_and_stays_disposed() {
        let mut shot = SpaceObject::projectile(Vec2::new(2.0, 100.0), 90.0, Vec2::ZERO, 5.0, 4.0);
        shot.update(480.0, 320.0);
        assert!(shot.center.x < 0.0, "projectiles do not wrap");
        assert!(shot.disposable);
        shot.velocity = Vec2::new(10.0, 0.0);
        shot.update(480.0, 320.0);
        assert!(shot.disposable);
    }

    #[test]
    fn test_pickup_expires_after_lifespan() {
        let mut pickup = SpaceObject::pickup(Vec2::new(10.0, 10.0), 10.0, 3);
        pickup.update(480.0, 320.0);
        pickup.update(480.0, 320.0);
        assert!(!pickup.disposable);
        pickup.update(480.0, 320.0);
        assert!(pickup.disposable);
        assert_eq!(pickup.heading, 15.0);
    }

    #[test]
    fn test_invincibility_counts_down_and_blinks() {
        let cfg = config();
        let mut ship = SpaceObject::ship(cfg.arena_center(), &cfg);
        ship.set_invincible(4);
        let mut frame = Frame::new();
        let mut drawn = Vec::new();
        for _ in 0..4 {
            ship.update(cfg.width, cfg.height);
            frame.clear();
            ship.draw(&mut frame);
            drawn.push(frame.line_loops(PLAYER_COLOR));
        }
        assert!(!ship.is_invincible());
        // blink timers 1,2,3 then reset: visible, hidden, hidden, visible
        assert_eq!(drawn, vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_exhaust_drawn_once_per_thrust() {
        let cfg = config();
        let mut ship = SpaceObject::ship(cfg.arena_center(), &cfg);
        ship.accelerate(cfg.acceleration);
        assert!(ship.velocity.y < 0.0);
        let mut frame = Frame::new();
        ship.draw(&mut frame);
        assert_eq!(frame.commands.len(), 3);
        frame.clear();
        ship.draw(&mut frame);
        assert_eq!(frame.commands.len(), 1);
    }

    #[test]
    fn test_wrecked_ship_is_not_drawn_and_cannot_fire() {
        let cfg = GameConfig {
            reload_ticks: -1,
            ..GameConfig::default()
        };
        let mut ship = SpaceObject::ship(cfg.arena_center(), &cfg);
        assert!(ship.can_fire());
        ship.wreck();
        assert!(ship.is_destroyed());
        assert!(ship.fire(&cfg).is_none());
        let mut frame = Frame::new();
        ship.draw(&mut frame);
        assert!(frame.is_empty());
    }

    proptest! {
        #[test]
        fn prop_wrapping_objects_stay_in_arena(
            x in 0.0f32..480.0,
            y in 0.0f32..320.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            seed in any::<u64>(),
        ) {
            let cfg = config();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut objects = vec![
                SpaceObject::ship(Vec2::new(x, y), &cfg),
                SpaceObject::asteroid(Vec2::new(x, y), 40.0, AsteroidSize::Whole, 0.4, &mut rng),
                SpaceObject::pickup(Vec2::new(x, y), 10.0, 350),
            ];
            for object in &mut objects {
                object.velocity = Vec2::new(vx, vy);
                for _ in 0..5 {
                    object.update(cfg.width, cfg.height);
                    prop_assert!(object.center.x >= 0.0 && object.center.x < cfg.width);
                    prop_assert!(object.center.y >= 0.0 && object.center.y < cfg.height);
                }
            }
        }

        #[test]
        fn prop_projectile_disposal_is_sticky(
            x in 1.0f32..479.0,
            y in 1.0f32..319.0,
            heading in -180.0f32..180.0,
        ) {
            let mut shot = SpaceObject::projectile(Vec2::new(x, y), heading, Vec2::ZERO, 5.0, 4.0);
            let mut left = false;
            for _ in 0..400 {
                shot.update(480.0, 320.0);
                let outside = shot.center.x <= 0.0 || shot.center.x >= 480.0
                    || shot.center.y <= 0.0 || shot.center.y >= 320.0;
                left |= outside;
                if left {
                    prop_assert!(shot.disposable);
                }
            }
            prop_assert!(left);
        }
    }
}
