use std::f32::consts::TAU;

use glam::Vec2;

/// Golden angle in radians, `π (3 − √5)`.
pub const GOLDEN_ANGLE: f32 = 2.399_963;

const ELASTIC_PERIOD: f32 = 0.4;

#[must_use]
pub fn elastic_ease_out(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let p = ELASTIC_PERIOD;
    2.0_f32.powf(-10.0 * t) * ((t - p / 4.0) * TAU / p).sin() + 1.0
}

#[must_use]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::from_angle(angle)
}

#[must_use]
pub fn unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    pub angle: f32,
    pub radius: f32,
}

impl Seed {
    #[must_use]
    pub fn offset(self) -> Vec2 {
        direction(self.angle) * self.radius
    }
}

pub fn golden_spiral(count: usize, disc_radius: f32) -> impl Iterator<Item = Seed> {
    let total = count.max(1) as f32;
    (0..count).map(move |i| {
        let i = i as f32;
        Seed {
            angle: i * GOLDEN_ANGLE,
            radius: (i / total).sqrt() * disc_radius,
        }
    })
}
