#![allow(dead_code)]

use glam::Vec2;
use nightbloom::{
    paint::raster::PixelCanvas,
    scene::{Engine, MotionSetting, Scene, layout::SceneLayout},
    ui::viewport_for,
};
use rand::{SeedableRng, rngs::StdRng};

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn scene_at(width: f32, height: f32, seed: u64) -> Scene {
    Scene::build(
        SceneLayout::rebuild(width, height),
        MotionSetting::Full,
        &mut seeded(seed),
    )
}

/// An engine sized for a `cols` x `rows` terminal.
pub fn terminal_engine(cols: u16, rows: u16, motion: MotionSetting, seed: u64) -> Engine<PixelCanvas> {
    let (viewport, scale) = viewport_for(cols, rows);
    Engine::start(
        PixelCanvas::new(Vec2::ONE, 1.0),
        viewport,
        scale,
        motion,
        seeded(seed),
    )
    .expect("pixel canvas always paints")
}
