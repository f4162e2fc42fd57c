use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use crate::paint::{LinearGradient, Paint, Painter, Path, RadialGradient, Rgba};
use crate::scene::layout::SceneLayout;

struct NebulaPatch {
    center: Vec2,
    radii: Vec2,
    color: Rgba,
}

pub fn draw_sky(painter: &mut dyn Painter, layout: &SceneLayout) {
    let gradient = LinearGradient::new(Vec2::ZERO, Vec2::new(0.0, layout.height))
        .stop(0.0, Rgba::hex(0x010308))
        .stop(0.3, Rgba::hex(0x020818))
        .stop(0.7, Rgba::hex(0x060b20))
        .stop(1.0, Rgba::hex(0x0d1a0a));
    painter.fill_rect(Vec2::ZERO, layout.viewport(), &gradient.into());
}

pub fn draw_nebula(painter: &mut dyn Painter, layout: &SceneLayout) {
    let (w, h) = (layout.width, layout.height);
    let patches = [
        NebulaPatch {
            center: Vec2::new(w * 0.15, h * 0.2),
            radii: Vec2::new(w * 0.25, h * 0.12),
            color: Rgba::rgba(80, 40, 120, 0.07),
        },
        NebulaPatch {
            center: Vec2::new(w * 0.7, h * 0.35),
            radii: Vec2::new(w * 0.2, h * 0.1),
            color: Rgba::rgba(40, 80, 140, 0.06),
        },
        NebulaPatch {
            center: Vec2::new(w * 0.45, h * 0.1),
            radii: Vec2::new(w * 0.35, h * 0.08),
            color: Rgba::rgba(100, 50, 80, 0.05),
        },
    ];

    for patch in patches {
        let squash = patch.radii.y / patch.radii.x;
        let center = Vec2::new(patch.center.x, patch.center.y / squash);
        let wash = RadialGradient::centered(center, patch.radii.x)
            .stop(0.0, patch.color)
            .stop(1.0, patch.color.with_alpha(0.0));
        painter.save();
        painter.scale(1.0, squash);
        painter.fill(&Path::circle(center, patch.radii.x), &wash.into());
        painter.restore();
    }
}

pub fn draw_moon(painter: &mut dyn Painter, layout: &SceneLayout) {
    let center = layout.moon.center;
    let r = layout.moon.radius;
    let halo_color = Rgba::rgba(255, 245, 200, 0.12);

    let halo = RadialGradient::new(center, r, center, r * 3.5)
        .stop(0.0, halo_color)
        .stop(1.0, halo_color.with_alpha(0.0));
    painter.fill(&Path::circle(center, r * 3.5), &halo.into());

    let disc = Path::circle(center, r);
    let body = RadialGradient::new(center - Vec2::splat(r * 0.3), r * 0.1, center, r)
        .stop(0.0, Rgba::hex(0xfffde0))
        .stop(0.6, Rgba::hex(0xfef3a0))
        .stop(1.0, Rgba::hex(0xe8d060));
    painter.fill(&disc, &body.into());

    let shade = Rgba::rgba(20, 15, 50, 0.55);
    let shadow_center = center + Vec2::new(r * 0.5, 0.0);
    let shadow = RadialGradient::new(shadow_center, r * 0.2, center + Vec2::new(r * 0.7, 0.0), r)
        .stop(0.0, shade)
        .stop(1.0, shade.with_alpha(0.0));
    painter.save();
    painter.clip(&disc);
    painter.fill(&Path::circle(shadow_center, r * 1.1), &shadow.into());
    painter.restore();

    let spot = center - Vec2::splat(r * 0.35);
    let glint = Rgba::rgba(255, 255, 240, 0.25);
    let highlight = RadialGradient::centered(spot, r * 0.45)
        .stop(0.0, glint)
        .stop(1.0, glint.with_alpha(0.0));
    painter.fill(&Path::circle(spot, r * 0.45), &highlight.into());
}

pub fn draw_ground(painter: &mut dyn Painter, layout: &SceneLayout, rng: &mut impl Rng) {
    let (w, h) = (layout.width, layout.height);
    let band = LinearGradient::new(Vec2::new(0.0, h * 0.88), Vec2::new(0.0, h))
        .stop(0.0, Rgba::rgba(15, 40, 10, 0.0))
        .stop(0.3, Rgba::rgba(10, 30, 8, 0.7))
        .stop(1.0, Rgba::rgba(5, 15, 4, 1.0));
    painter.fill_rect(Vec2::new(0.0, h * 0.88), Vec2::new(w, h * 0.12), &band.into());

    let blades = ((w / 10.0).floor() as usize).max(1);
    let slot = w / blades as f32;
    let blade_paint = Paint::Solid(Rgba::hex(0x0a1f07));
    let mut mounds = Path::builder();
    for i in 0..blades {
        let x = i as f32 * slot + rng.random_range(0.0..1.0) * slot;
        let radii = Vec2::new(rng.random_range(5.0..15.0), rng.random_range(8.0..26.0));
        // Upper half of the ellipse, sitting on the bottom edge.
        mounds.ellipse(Vec2::new(x, h), radii, PI, TAU);
        mounds.close();
    }
    painter.fill(&mounds.build(), &blade_paint);
}
