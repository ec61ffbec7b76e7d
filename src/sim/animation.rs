//! Transient visual effects
//!
//! Animations only draw; they never feed back into gameplay state. Each one
//! counts down its own duration and flags itself disposable when done.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::renderer::{Color, Surface};
use crate::{midpoint, rotate_about};

/// A flying 2×2 pixel of an explosion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Spark {
    fn new<R: Rng>(pos: Vec2, rng: &mut R) -> Self {
        let speed = rng.random_range(1..=5) as f32;
        let direction = rng.random_range(-180..=180) as f32;
        Self {
            pos,
            vel: rotate_about(Vec2::new(0.0, speed), direction, Vec2::ZERO),
        }
    }
}

/// A drifting, spinning hull segment of the wrecked ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinningLine {
    pub start: Vec2,
    pub end: Vec2,
    pub vel: Vec2,
    /// Degrees/tick
    pub spin: f32,
}

impl SpinningLine {
    fn new<R: Rng>(start: Vec2, end: Vec2, rng: &mut R) -> Self {
        let direction = rng.random_range(-180..=180) as f32;
        Self {
            start,
            end,
            vel: rotate_about(Vec2::new(0.0, 0.5), direction, Vec2::ZERO),
            spin: rng.random_range(-5..=5) as f32,
        }
    }

    fn advance(&mut self) {
        let pivot = midpoint(self.start, self.end) + self.vel;
        self.start = rotate_about(self.start + self.vel, self.spin, pivot);
        self.end = rotate_about(self.end + self.vel, self.spin, pivot);
    }
}

/// Particle burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub sparks: Vec<Spark>,
    pub remaining: u32,
    pub color: Color,
}

/// Ship hull breaking apart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipDebris {
    pub segments: Vec<SpinningLine>,
    pub remaining: u32,
    pub color: Color,
}

/// Stationary text that appears for a while
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub position: Vec2,
    pub text: String,
    pub font_size: f32,
    pub color: Color,
    pub total: u32,
    pub remaining: u32,
}

/// Visual effect owned by the game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Animation {
    Explosion(Explosion),
    ShipDebris(ShipDebris),
    Text(FloatingText),
}

impl Animation {
    pub fn explosion<R: Rng>(position: Vec2, duration: u32, sparks: usize, color: Color, rng: &mut R) -> Self {
        Animation::Explosion(Explosion {
            sparks: (0..sparks).map(|_| Spark::new(position, rng)).collect(),
            remaining: duration,
            color,
        })
    }

    /// Debris from consecutive hull points (closing the loop)
    pub fn ship_debris<R: Rng>(hull: &[Vec2], duration: u32, color: Color, rng: &mut R) -> Self {
        let segments = (0..hull.len())
            .map(|i| SpinningLine::new(hull[i], hull[(i + 1) % hull.len()], rng))
            .collect();
        Animation::ShipDebris(ShipDebris {
            segments,
            remaining: duration,
            color,
        })
    }

    pub fn text(position: Vec2, text: impl Into<String>, duration: u32, font_size: f32, color: Color) -> Self {
        Animation::Text(FloatingText {
            position,
            text: text.into(),
            font_size,
            color,
            total: duration,
            remaining: duration,
        })
    }

    /// Remaining duration; zero means the animation is finished
    pub fn remaining(&self) -> u32 {
        match self {
            Animation::Explosion(e) => e.remaining,
            Animation::ShipDebris(d) => d.remaining,
            Animation::Text(t) => t.remaining,
        }
    }

    pub fn is_disposable(&self) -> bool {
        self.remaining() == 0
    }

    /// Advance one tick and draw
    pub fn play(&mut self, surface: &mut dyn Surface) {
        match self {
            Animation::Explosion(explosion) => {
                if explosion.remaining == 0 {
                    return;
                }
                for spark in &mut explosion.sparks {
                    spark.pos += spark.vel;
                    let corner = Vec2::ONE;
                    surface.draw_rect(spark.pos - corner, spark.pos + corner, explosion.color, explosion.color);
                }
                explosion.remaining -= 1;
            }
            Animation::ShipDebris(debris) => {
                if debris.remaining == 0 {
                    return;
                }
                for segment in &mut debris.segments {
                    segment.advance();
                    surface.draw_line(segment.start, segment.end, 1.0, debris.color);
                }
                debris.remaining -= 1;
            }
            Animation::Text(text) => {
                // Skip the first frame
                if text.remaining == text.total {
                    text.remaining = text.remaining.saturating_sub(1);
                    return;
                }
                if text.remaining == 0 {
                    return;
                }
                surface.draw_text(text.position, &text.text, text.font_size, text.color);
                text.remaining -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, Frame};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_explosion_runs_for_duration() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut anim = Animation::explosion(Vec2::new(50.0, 50.0), 3, 40, Color::White, &mut rng);
        let mut frame = Frame::new();
        for _ in 0..3 {
            assert!(!anim.is_disposable());
            frame.clear();
            anim.play(&mut frame);
            assert_eq!(frame.commands.len(), 40);
        }
        assert!(anim.is_disposable());
        frame.clear();
        anim.play(&mut frame);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_text_skips_first_frame() {
        let mut anim = Animation::text(Vec2::ZERO, "ROUND 1", 3, 20.0, Color::Green);
        let mut frame = Frame::new();
        anim.play(&mut frame);
        assert!(frame.is_empty());
        anim.play(&mut frame);
        anim.play(&mut frame);
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["ROUND 1", "ROUND 1"]);
        assert!(anim.is_disposable());
    }

    #[test]
    fn test_debris_segments_follow_hull() {
        let mut rng = Pcg32::seed_from_u64(9);
        let hull = [Vec2::new(0.0, -15.0), Vec2::new(-7.0, 7.0), Vec2::new(7.0, 7.0)];
        let mut anim = Animation::ship_debris(&hull, 2, Color::Yellow, &mut rng);
        let Animation::ShipDebris(debris) = &anim else {
            panic!("expected debris");
        };
        assert_eq!(debris.segments.len(), 3);
        let length_before = debris.segments[0].start.distance(debris.segments[0].end);

        let mut frame = Frame::new();
        anim.play(&mut frame);
        assert_eq!(frame.commands.len(), 3);
        let DrawCommand::Line { from, to, .. } = &frame.commands[0] else {
            panic!("expected line");
        };
        // Spinning about the midpoint keeps the segment rigid
        assert!((from.distance(*to) - length_before).abs() < 1e-3);
    }
}
