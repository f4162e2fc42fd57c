use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::layout::SceneLayout;
use crate::paint::Rgba;

pub const STAR_PALETTE: [Rgba; 4] = [
    Rgba::hex(0xffffff),
    Rgba::hex(0xffe8a0),
    Rgba::hex(0xa8d8ff),
    Rgba::hex(0xffd6ff),
];

const SKY_BAND: f32 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec2,
    pub radius: f32,
    pub twinkle_speed: f32,
    pub phase: f32,
    pub color: Rgba,
}

impl Star {
    pub fn random(layout: &SceneLayout, rng: &mut impl Rng) -> Self {
        Self {
            position: Vec2::new(
                rng.random_range(0.0..layout.width),
                rng.random_range(0.0..layout.height * SKY_BAND),
            ),
            radius: rng.random_range(0.2..1.6),
            twinkle_speed: rng.random_range(0.002..0.010),
            phase: rng.random_range(0.0..TAU),
            color: STAR_PALETTE[rng.random_range(0..STAR_PALETTE.len())],
        }
    }

    #[must_use]
    pub fn twinkle(&self, time: f32) -> f32 {
        twinkle_intensity(time, self.twinkle_speed, self.phase)
    }
}

#[must_use]
pub fn twinkle_intensity(time: f32, speed: f32, phase: f32) -> f32 {
    0.35 + 0.65 * (0.5 + 0.5 * (time * speed * 60.0 + phase).sin())
}

#[derive(Debug, Clone, Default)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    pub fn populate(layout: &SceneLayout, rng: &mut impl Rng) -> Self {
        Self {
            stars: (0..layout.counts.stars)
                .map(|_| Star::random(layout, rng))
                .collect(),
        }
    }

    #[must_use]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
