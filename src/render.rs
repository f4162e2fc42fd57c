mod entities;
mod sky;

use rand::Rng;

use crate::paint::Painter;
use crate::scene::Scene;

pub use entities::{draw_shooting_star, draw_shooting_stars, draw_stars, draw_sunflower, draw_sunflowers};
pub use sky::{draw_ground, draw_moon, draw_nebula, draw_sky};

pub fn draw_scene(painter: &mut dyn Painter, scene: &Scene, rng: &mut impl Rng) {
    let layout = scene.layout();
    let time = scene.time();

    draw_sky(painter, layout);
    draw_nebula(painter, layout);
    draw_stars(painter, scene.stars().stars(), time);
    draw_moon(painter, layout);
    if scene.shooting_stars_enabled() {
        draw_shooting_stars(painter, scene.shooting_stars().stars());
    }
    draw_ground(painter, layout, rng);
    draw_sunflowers(painter, scene.sunflowers(), time, scene.sway_enabled());
}

#[cfg(test)]
mod tests;
