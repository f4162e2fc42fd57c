pub mod clock;
pub mod geometry;
pub mod layout;
pub mod shooting;
pub mod stars;
pub mod sunflower;

use std::time::Duration;

use glam::Vec2;
use log::{debug, info};
use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paint::Surface;
use crate::render;
use clock::{FixedTimestep, FrameClock};
use layout::SceneLayout;
use shooting::ShootingStarPool;
use stars::StarField;
use sunflower::SunflowerField;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("drawing surface has no paint context")]
    SurfaceUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MotionSetting {
    #[default]
    Full,
    Reduced,
    Off,
}

impl MotionSetting {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Full => Self::Reduced,
            Self::Reduced => Self::Off,
            Self::Off => Self::Full,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Reduced => "reduced",
            Self::Off => "off",
        }
    }

    fn shooting_stars(self) -> bool {
        self == Self::Full
    }

    fn sway(self) -> bool {
        matches!(self, Self::Full | Self::Off)
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    layout: SceneLayout,
    clock: FrameClock,
    stars: StarField,
    shooting: ShootingStarPool,
    sunflowers: SunflowerField,
    motion: MotionSetting,
}

impl Scene {
    pub fn build(layout: SceneLayout, motion: MotionSetting, rng: &mut impl Rng) -> Self {
        let mut scene = Self {
            layout,
            clock: FrameClock::new(),
            stars: StarField::populate(&layout, rng),
            shooting: ShootingStarPool::new(layout.counts.shooting_stars, layout.viewport(), rng),
            sunflowers: SunflowerField::populate(&layout, rng),
            motion,
        };
        if motion == MotionSetting::Off {
            scene.sunflowers.finish();
        }
        scene
    }

    pub fn tick(&mut self, rng: &mut impl Rng) {
        self.clock.advance();
        if self.motion.shooting_stars() {
            self.shooting.tick(self.layout.viewport(), rng);
        }
        self.sunflowers.tick();
    }

    #[must_use]
    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    #[must_use]
    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    #[must_use]
    pub fn time(&self) -> f32 {
        self.clock.seconds()
    }

    #[must_use]
    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    #[must_use]
    pub fn shooting_stars(&self) -> &ShootingStarPool {
        &self.shooting
    }

    #[must_use]
    pub fn sunflowers(&self) -> &SunflowerField {
        &self.sunflowers
    }

    #[must_use]
    pub fn motion(&self) -> MotionSetting {
        self.motion
    }

    #[must_use]
    pub fn shooting_stars_enabled(&self) -> bool {
        self.motion.shooting_stars()
    }

    #[must_use]
    pub fn sway_enabled(&self) -> bool {
        self.motion.sway()
    }

    fn set_motion(&mut self, motion: MotionSetting) {
        self.motion = motion;
        if motion == MotionSetting::Off {
            self.sunflowers.finish();
        }
    }
}

#[derive(Debug)]
pub struct Engine<S: Surface> {
    scene: Scene,
    surface: S,
    rng: StdRng,
    timestep: FixedTimestep,
    paused: bool,
}

impl<S: Surface> Engine<S> {
    pub fn start(
        mut surface: S,
        viewport: Vec2,
        device_scale: f32,
        motion: MotionSetting,
        mut rng: StdRng,
    ) -> Result<Self, EngineError> {
        if surface.context().is_none() {
            return Err(EngineError::SurfaceUnavailable);
        }
        surface.resize(viewport, device_scale);
        let layout = SceneLayout::rebuild(viewport.x, viewport.y);
        info!(
            "engine started at {:.0}x{:.0} ({})",
            layout.width,
            layout.height,
            if layout.is_mobile { "mobile" } else { "desktop" }
        );
        let scene = Scene::build(layout, motion, &mut rng);
        Ok(Self {
            scene,
            surface,
            rng,
            timestep: FixedTimestep::default(),
            paused: false,
        })
    }

    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.paused || self.scene.motion == MotionSetting::Off {
            return 0;
        }
        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.scene.tick(&mut self.rng);
        }
        steps
    }

    pub fn render(&mut self) -> Result<(), EngineError> {
        let painter = self
            .surface
            .context()
            .ok_or(EngineError::SurfaceUnavailable)?;
        render::draw_scene(painter, &self.scene, &mut self.rng);
        Ok(())
    }

    pub fn rebuild(&mut self, viewport: Vec2, device_scale: f32) {
        self.surface.resize(viewport, device_scale);
        let layout = SceneLayout::rebuild(viewport.x, viewport.y);
        debug!(
            "layout rebuilt at {:.0}x{:.0}: {} stars, {} shooting, {} flowers",
            layout.width,
            layout.height,
            layout.counts.stars,
            layout.counts.shooting_stars,
            layout.counts.sunflowers
        );
        self.scene = Scene::build(layout, self.scene.motion, &mut self.rng);
        self.timestep.reset();
    }

    pub fn set_motion(&mut self, motion: MotionSetting) {
        self.scene.set_motion(motion);
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.timestep.reset();
        self.paused
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}
