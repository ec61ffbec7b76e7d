//! Fixed timestep session tick
//!
//! One call advances the whole world by one step, in a fixed order:
//! destruction sequence, wave controller, asteroids (with collisions),
//! projectiles, pick-ups, ship, animations, HUD.

use glam::Vec2;
use rand::Rng;

use super::animation::Animation;
use super::collision;
use super::entity::{AsteroidSize, SpaceObject};
use super::state::GameSession;
use crate::consts::*;
use crate::renderer::Surface;

/// Held intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub accelerate: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
}

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Schedule the next tick
    Continue,
    /// World is frozen until unpaused
    Paused,
    /// The session just reached its terminal state (reported once)
    GameOver,
    /// Session was already over; nothing happened
    Finished,
}

/// Advance the session by one tick and draw it onto `surface`
pub fn tick(session: &mut GameSession, input: &TickInput, surface: &mut dyn Surface) -> TickOutcome {
    if session.game_over {
        return TickOutcome::Finished;
    }
    session.time_ticks += 1;

    let mut finished = false;
    if session.lives < 0 {
        if !session.ship.is_destroyed() {
            begin_destruction(session);
        }
        if session.animations.is_empty() {
            session.game_over = true;
            finished = true;
            log::info!(
                "Game over: score {} in round {} after {} ticks",
                session.score,
                session.round(),
                session.time_ticks
            );
        }
    }

    // No new waves once the ship is wrecked
    if !session.ship.is_destroyed() {
        session.waves.step(
            session.ship.center,
            &mut session.asteroids,
            session.projectiles.is_empty(),
            &mut session.animations,
            &session.config,
            &mut session.rng,
        );
    }

    surface.clear();
    update_asteroids(session, surface);
    update_projectiles(session, surface);
    update_pickups(session, surface);
    update_ship(session, input, surface);
    update_animations(session, surface);
    draw_hud(session, surface);

    if finished {
        TickOutcome::GameOver
    } else if session.paused {
        TickOutcome::Paused
    } else {
        TickOutcome::Continue
    }
}

/// Wreck the ship and queue the game over effects
fn begin_destruction(session: &mut GameSession) {
    let cfg = &session.config;
    session.animations.push(Animation::text(
        Vec2::new(cfg.width / 2.0, cfg.height / 4.0),
        "GAME OVER",
        GAME_OVER_TEXT_TICKS,
        cfg.width / 20.0,
        TEXT_COLOR,
    ));
    session.animations.push(Animation::ship_debris(
        &session.ship.border_points,
        SHIP_DEBRIS_TICKS,
        PLAYER_COLOR,
        &mut session.rng,
    ));
    session.animations.push(Animation::explosion(
        session.ship.center,
        SHIP_EXPLOSION_TICKS,
        SPARK_COUNT,
        PLAYER_COLOR,
        &mut session.rng,
    ));
    session.ship.wreck();
    log::info!("Ship destroyed at {:?}", session.ship.center);
}

fn update_asteroids(session: &mut GameSession, surface: &mut dyn Surface) {
    // Fragments join the collection after the scan, in time to be drawn
    let mut fragments = Vec::new();
    for index in 0..session.asteroids.len() {
        detect_collision(session, index, &mut fragments);
        session.asteroids[index].update(session.config.width, session.config.height);
    }
    session.asteroids.retain(|a| !a.disposable);
    session.asteroids.append(&mut fragments);
    for asteroid in &mut session.asteroids {
        asteroid.draw(surface);
    }
}

/// Ship first; otherwise the first live projectile in order
fn detect_collision(session: &mut GameSession, index: usize, fragments: &mut Vec<SpaceObject>) {
    let asteroid = &session.asteroids[index];
    if collision::asteroid_collides_with(asteroid, &session.ship) {
        ship_collision(session, index, fragments);
        return;
    }
    let hit = session
        .projectiles
        .iter()
        .position(|p| !p.disposable && collision::asteroid_collides_with(asteroid, p));
    if let Some(projectile) = hit {
        projectile_collision(session, projectile, index, fragments);
    }
}

fn ship_collision(session: &mut GameSession, index: usize, fragments: &mut Vec<SpaceObject>) {
    if session.ship.is_invincible() || session.ship.is_destroyed() {
        return;
    }
    let asteroid = &mut session.asteroids[index];
    fragments.extend(asteroid.destroy(session.config.asteroid_speed, &mut session.rng));
    let center = asteroid.center;

    session.lives -= 1;
    session.ship.set_invincible(session.config.invincibility_ticks);
    session.animations.push(Animation::explosion(
        center,
        ASTEROID_EXPLOSION_TICKS,
        SPARK_COUNT,
        DRAW_COLOR,
        &mut session.rng,
    ));
    log::debug!("Ship hit at {:?}, {} lives left", center, session.lives);
}

fn projectile_collision(
    session: &mut GameSession,
    projectile: usize,
    index: usize,
    fragments: &mut Vec<SpaceObject>,
) {
    session.projectiles[projectile].disposable = true;

    let asteroid = &mut session.asteroids[index];
    let quarter = asteroid
        .as_asteroid()
        .is_some_and(|a| a.size_class == AsteroidSize::Quarter);
    fragments.extend(asteroid.destroy(session.config.asteroid_speed, &mut session.rng));
    let center = asteroid.center;

    if quarter && roll_drop(session.config.pickup_drop_one_in, &mut session.rng) {
        session.pickups.push(SpaceObject::pickup(
            center,
            session.config.pickup_size,
            session.config.pickup_lifespan_ticks,
        ));
        log::debug!("Pick-up dropped at {:?}", center);
    }
    session.score += 1;
    session.animations.push(Animation::explosion(
        center,
        ASTEROID_EXPLOSION_TICKS,
        SPARK_COUNT,
        DRAW_COLOR,
        &mut session.rng,
    ));
}

/// True in one of `one_in` rolls (0 never, 1 always)
fn roll_drop<R: Rng>(one_in: u32, rng: &mut R) -> bool {
    match one_in {
        0 => false,
        n => rng.random_range(1..=n) == 1,
    }
}

fn update_projectiles(session: &mut GameSession, surface: &mut dyn Surface) {
    session.projectiles.retain(|p| !p.disposable);
    for projectile in &mut session.projectiles {
        projectile.update(session.config.width, session.config.height);
        projectile.draw(surface);
    }
}

fn update_pickups(session: &mut GameSession, surface: &mut dyn Surface) {
    if !session.ship.is_destroyed() {
        for pickup in &mut session.pickups {
            if pickup.disposable || !collision::pickup_touches(pickup, &session.ship) {
                continue;
            }
            pickup.disposable = true;
            session.lives += 1;
            session.animations.push(Animation::text(
                pickup.center,
                "+1",
                PICKUP_TEXT_TICKS,
                session.config.font_size,
                PICKUP_COLOR,
            ));
            log::debug!("Extra life collected, {} lives", session.lives);
        }
    }
    session.pickups.retain(|p| !p.disposable);
    for pickup in &mut session.pickups {
        pickup.update(session.config.width, session.config.height);
        pickup.draw(surface);
    }
}

fn update_ship(session: &mut GameSession, input: &TickInput, surface: &mut dyn Surface) {
    let cfg = &session.config;
    let ship = &mut session.ship;
    if !ship.is_destroyed() {
        if input.fire {
            if let Some(shot) = ship.fire(cfg) {
                session.projectiles.push(shot);
            }
        }
        if input.accelerate {
            ship.accelerate(cfg.acceleration);
        }
        if input.turn_left {
            ship.rotate(cfg.turn_rate);
        }
        if input.turn_right {
            ship.rotate(-cfg.turn_rate);
        }
    }
    ship.update(cfg.width, cfg.height);
    ship.draw(surface);
}

fn update_animations(session: &mut GameSession, surface: &mut dyn Surface) {
    session.animations.retain(|a| !a.is_disposable());
    for animation in &mut session.animations {
        animation.play(surface);
    }
}

fn draw_hud(session: &GameSession, surface: &mut dyn Surface) {
    let cfg = &session.config;
    let fs = cfg.font_size;
    let top = fs + 2.0;

    surface.draw_text(Vec2::new(fs * 4.0, top), &format!("ROUND: {}", session.round()), fs, TEXT_COLOR);
    surface.draw_text(
        Vec2::new(cfg.width - fs * 5.0, top),
        &format!("SCORE: {:03}", session.score),
        fs,
        TEXT_COLOR,
    );
    surface.draw_text(
        Vec2::new(cfg.width / 2.0, top),
        &"+".repeat(session.lives.max(0) as usize),
        fs * 1.5,
        TEXT_COLOR,
    );

    if session.paused && !session.game_over {
        surface.draw_text(Vec2::new(cfg.width / 2.0, cfg.height / 3.0), "||", cfg.width / 10.0, TEXT_COLOR);
        surface.draw_text(Vec2::new(cfg.width / 2.0, cfg.height * 0.75), INSTRUCTIONS, fs, TEXT_COLOR);
    }

    if session.debug {
        let bottom = cfg.height - top;
        surface.draw_text(
            Vec2::new(fs * 4.0, bottom),
            &format!("FPS: {:.1}", session.fps),
            fs,
            TEXT_COLOR,
        );
        surface.draw_text(
            Vec2::new(cfg.width - fs * 5.0, bottom),
            &format!("OBJ: {}", session.object_count()),
            fs,
            TEXT_COLOR,
        );
    }
}
