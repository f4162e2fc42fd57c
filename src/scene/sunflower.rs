use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;

use super::geometry::{direction, elastic_ease_out, unit};
use super::layout::{SceneLayout, fan_position};

pub const STEM_RATE: f32 = 2.0;
pub const LEAF_RATE: f32 = 2.0;
pub const LEAF_OFFSET: f32 = 0.5;
pub const HEAD_RATE: f32 = 2.0;
pub const HEAD_OFFSET: f32 = 1.0;
pub const SWAY_THRESHOLD: f32 = 0.7;

const DELAY_STRIDE: u32 = 18;
const DELAY_BASE: u32 = 30;
const STEM_BEND: f32 = 0.08;
const LEAF_LENGTH: f32 = 0.22;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Growth {
    delay: u32,
    grow_speed: f32,
    grown_ticks: u32,
    ticks_to_bloom: u32,
}

impl Growth {
    #[must_use]
    pub fn new(delay: u32, grow_speed: f32) -> Self {
        let grow_speed = grow_speed.max(f32::EPSILON);
        Self {
            delay,
            grow_speed,
            grown_ticks: 0,
            // The small bias keeps 1/0.01 at exactly 100 ticks despite
            // rounding in the reciprocal.
            ticks_to_bloom: ((1.0 / grow_speed) - 1e-3).ceil().max(1.0) as u32,
        }
    }

    pub fn tick(&mut self) {
        if self.delay > 0 {
            self.delay -= 1;
        } else if self.grown_ticks < self.ticks_to_bloom {
            self.grown_ticks += 1;
        }
    }

    /// Progress in `0..=1`, non-decreasing across ticks and exactly 1 once
    /// fully grown.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.grown_ticks >= self.ticks_to_bloom {
            1.0
        } else {
            (self.grown_ticks as f32 * self.grow_speed).min(1.0)
        }
    }

    #[must_use]
    pub fn delay(&self) -> u32 {
        self.delay
    }

    pub fn finish(&mut self) {
        self.delay = 0;
        self.grown_ticks = self.ticks_to_bloom;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthStages {
    pub stem: f32,
    pub leaf: f32,
    pub head: f32,
}

impl GrowthStages {
    #[must_use]
    pub fn at(progress: f32) -> Self {
        Self {
            stem: unit(progress * STEM_RATE),
            leaf: unit(progress * LEAF_RATE - LEAF_OFFSET),
            head: unit(progress * HEAD_RATE - HEAD_OFFSET),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sway {
    pub amplitude: f32,
    pub speed: f32,
    pub phase: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leaf {
    pub fraction: f32,
    pub side: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sunflower {
    pub angle: f32,
    pub stem_length: f32,
    pub head_size: f32,
    pub petal_count: usize,
    pub sway: Sway,
    pub leaves: Vec<Leaf>,
    growth: Growth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafPose {
    pub base: Vec2,
    pub tip: Vec2,
    pub out_controls: [Vec2; 2],
    pub back_controls: [Vec2; 2],
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadPose {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SunflowerPose {
    pub base: Vec2,
    pub control: Vec2,
    pub tip: Vec2,
    pub stem_width: f32,
    pub leaves: Vec<LeafPose>,
    pub head: Option<HeadPose>,
}

impl Sunflower {
    pub fn generate(index: usize, layout: &SceneLayout, rng: &mut impl Rng) -> Self {
        let count = layout.counts.sunflowers;
        let t = fan_position(index, count);
        let bump = (std::f32::consts::PI * t * (1.0 - t) * 4.0).sin();
        let side = if index % 2 == 0 { 1.0 } else { -1.0 };

        let first_leaf = Leaf {
            fraction: rng.random_range(0.35..0.55),
            side,
        };
        let mut leaves = vec![first_leaf];
        if rng.random_bool(0.5) {
            leaves.push(Leaf {
                fraction: first_leaf.fraction + 0.2,
                side: -side,
            });
        }

        Self {
            angle: layout.fan.angle_for(index, count),
            stem_length: layout.fan.stem_scale * (0.78 + bump * 0.28 + rng.random_range(0.0..0.08)),
            head_size: layout.fan.head_scale * (1.0 + bump * 0.3),
            petal_count: rng.random_range(16..20),
            sway: Sway {
                amplitude: rng.random_range(-0.02..0.02),
                speed: rng.random_range(0.4..0.7),
                phase: rng.random_range(0.0..TAU),
            },
            leaves,
            growth: Growth::new(
                index as u32 * DELAY_STRIDE + DELAY_BASE,
                rng.random_range(0.008..0.012),
            ),
        }
    }

    #[must_use]
    pub fn with_growth(mut self, growth: Growth) -> Self {
        self.growth = growth;
        self
    }

    pub fn tick(&mut self) {
        self.growth.tick();
    }

    pub fn finish(&mut self) {
        self.growth.finish();
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.growth.progress()
    }

    #[must_use]
    pub fn growth(&self) -> &Growth {
        &self.growth
    }

    #[must_use]
    pub fn stages(&self) -> GrowthStages {
        GrowthStages::at(self.progress())
    }

    #[must_use]
    pub fn sway_offset(&self, time: f32) -> f32 {
        let progress = self.progress();
        if progress <= SWAY_THRESHOLD {
            return 0.0;
        }
        let gate = (progress - SWAY_THRESHOLD) / (1.0 - SWAY_THRESHOLD);
        self.sway.amplitude * (time * self.sway.speed + self.sway.phase).sin() * gate
    }

    #[must_use]
    pub fn pose(&self, origin: Vec2, time: f32, sway_enabled: bool) -> Option<SunflowerPose> {
        let progress = self.progress();
        if progress <= 0.0 {
            return None;
        }
        let stages = GrowthStages::at(progress);
        let angle = self.angle + if sway_enabled { self.sway_offset(time) } else { 0.0 };
        let along = direction(angle);
        let across = direction(angle + FRAC_PI_2);
        let length = self.stem_length * stages.stem;

        let tip = origin + along * length;
        let control = origin + along * (length * 0.5) + across * (self.stem_length * STEM_BEND * stages.stem);

        let leaves = if stages.leaf > 0.0 {
            self.leaves
                .iter()
                .map(|leaf| self.leaf_pose(leaf, origin, angle, length, stages.leaf))
                .collect()
        } else {
            Vec::new()
        };

        let head = (stages.head > 0.0).then(|| HeadPose {
            center: tip,
            radius: self.head_size * elastic_ease_out(stages.head),
        });

        Some(SunflowerPose {
            base: origin,
            control,
            tip,
            stem_width: 3.0 + self.head_size * 0.05,
            leaves,
            head,
        })
    }

    fn leaf_pose(&self, leaf: &Leaf, origin: Vec2, angle: f32, stem: f32, unfurl: f32) -> LeafPose {
        let perp = angle + FRAC_PI_2;
        let base = origin + direction(angle) * (stem * leaf.fraction);
        let reach = self.stem_length * LEAF_LENGTH * unfurl * leaf.side;
        let tip = base + direction(perp) * reach;
        LeafPose {
            base,
            tip,
            out_controls: [
                base + direction(perp - 0.5) * (reach * 0.7),
                tip + direction(angle) * (reach * 0.1),
            ],
            back_controls: [
                tip + direction(perp + 0.5) * (reach * 0.3),
                base + direction(perp + 0.6) * (reach * 0.3),
            ],
            opacity: unfurl,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SunflowerField {
    origin: Vec2,
    flowers: Vec<Sunflower>,
}

impl SunflowerField {
    pub fn populate(layout: &SceneLayout, rng: &mut impl Rng) -> Self {
        Self {
            origin: layout.fan.origin,
            flowers: (0..layout.counts.sunflowers)
                .map(|index| Sunflower::generate(index, layout, rng))
                .collect(),
        }
    }

    pub fn tick(&mut self) {
        for flower in &mut self.flowers {
            flower.tick();
        }
    }

    pub fn finish(&mut self) {
        for flower in &mut self.flowers {
            flower.finish();
        }
    }

    #[must_use]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    #[must_use]
    pub fn flowers(&self) -> &[Sunflower] {
        &self.flowers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flowers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty()
    }

    #[must_use]
    pub fn all_bloomed(&self) -> bool {
        self.flowers.iter().all(|flower| flower.progress() >= 1.0)
    }
}

#[cfg(test)]
mod tests;
