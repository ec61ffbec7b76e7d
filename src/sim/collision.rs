//! Proximity tests between asteroids, projectiles, pick-ups and the ship
//!
//! Asteroids are approximated by a circle of their average radius and tested
//! against the other object's center plus each of its border points. Gameplay
//! is tuned to this approximation rather than polygon intersection.

use glam::Vec2;

use super::entity::SpaceObject;

/// Mean distance from the local origin to each vertex.
///
/// Never returns less than 1 so a degenerate shape still collides.
pub fn average_radius(shape: &[Vec2]) -> f32 {
    if shape.is_empty() {
        return 1.0;
    }
    let total: f32 = shape.iter().map(|p| p.length()).sum();
    (total / shape.len() as f32).max(1.0)
}

/// True if `point` lies strictly inside the asteroid's average radius
pub fn point_inside_asteroid(asteroid: &SpaceObject, point: Vec2) -> bool {
    asteroid
        .as_asteroid()
        .is_some_and(|a| asteroid.center.distance(point) < a.radius)
}

/// True if `other`'s center or any of its border points is inside the asteroid
pub fn asteroid_collides_with(asteroid: &SpaceObject, other: &SpaceObject) -> bool {
    point_inside_asteroid(asteroid, other.center)
        || other
            .border_points
            .iter()
            .any(|p| point_inside_asteroid(asteroid, *p))
}

/// True if the ship's center or any border point is within the pick-up's size
pub fn pickup_touches(pickup: &SpaceObject, ship: &SpaceObject) -> bool {
    let reach = pickup.size;
    pickup.center.distance(ship.center) <= reach
        || ship
            .border_points
            .iter()
            .any(|p| pickup.center.distance(*p) <= reach)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::entity::AsteroidSize;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn asteroid_at(center: Vec2) -> SpaceObject {
        let mut rng = Pcg32::seed_from_u64(42);
        SpaceObject::asteroid(center, 40.0, AsteroidSize::Whole, 0.4, &mut rng)
    }

    #[test]
    fn test_average_radius() {
        let square = [
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(-10.0, 0.0),
            Vec2::new(0.0, -10.0),
        ];
        assert_eq!(average_radius(&square), 10.0);
        assert_eq!(average_radius(&[]), 1.0);
        assert_eq!(average_radius(&[Vec2::ZERO]), 1.0);
    }

    #[test]
    fn test_projectile_inside_radius_collides() {
        let asteroid = asteroid_at(Vec2::new(200.0, 200.0));
        let radius = asteroid.as_asteroid().unwrap().radius;

        let near = SpaceObject::projectile(Vec2::new(200.0 + radius * 0.5, 200.0), 0.0, Vec2::ZERO, 5.0, 4.0);
        assert!(asteroid_collides_with(&asteroid, &near));

        let far = SpaceObject::projectile(Vec2::new(200.0 + radius + 10.0, 200.0), 0.0, Vec2::ZERO, 5.0, 4.0);
        assert!(!asteroid_collides_with(&asteroid, &far));
    }

    #[test]
    fn test_border_point_alone_is_enough() {
        let cfg = GameConfig::default();
        let asteroid = asteroid_at(Vec2::new(200.0, 200.0));
        let radius = asteroid.as_asteroid().unwrap().radius;
        // Ship nose (15 px above center) pokes into the asteroid from below
        let ship = SpaceObject::ship(Vec2::new(200.0, 200.0 + radius + 10.0), &cfg);
        assert!(!point_inside_asteroid(&asteroid, ship.center));
        assert!(asteroid_collides_with(&asteroid, &ship));
    }

    #[test]
    fn test_non_asteroid_never_collides() {
        let cfg = GameConfig::default();
        let ship = SpaceObject::ship(Vec2::new(100.0, 100.0), &cfg);
        let other = SpaceObject::ship(Vec2::new(100.0, 100.0), &cfg);
        assert!(!asteroid_collides_with(&ship, &other));
    }

    #[test]
    fn test_pickup_reach() {
        let cfg = GameConfig::default();
        let ship = SpaceObject::ship(Vec2::new(100.0, 100.0), &cfg);
        let touching = SpaceObject::pickup(Vec2::new(100.0, 70.0), 10.0, 350);
        // Nose at y=85 is 15 away; tail corners are farther
        assert!(!pickup_touches(&touching, &ship));
        let closer = SpaceObject::pickup(Vec2::new(100.0, 76.0), 10.0, 350);
        assert!(pickup_touches(&closer, &ship));
    }
}
