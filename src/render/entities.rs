use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;

use crate::paint::{LinearGradient, Paint, Painter, Path, RadialGradient, Rgba, Stroke};
use crate::scene::geometry::{direction, golden_spiral};
use crate::scene::shooting::ShootingStar;
use crate::scene::stars::Star;
use crate::scene::sunflower::{HeadPose, LeafPose, Sunflower, SunflowerField};

const STAR_HALO: f32 = 2.5;
const STREAK_REACH: usize = 18;
const STREAK_WIDTH: f32 = 1.5;
const HEAD_GLOW_RADIUS: f32 = 6.0;
const SEED_COUNT: usize = 48;

struct PetalLayer {
    scale: f32,
    offset: f32,
    alpha: f32,
    stops: &'static [(f32, Rgba)],
}

const PETAL_LAYERS: [PetalLayer; 3] = [
    PetalLayer {
        scale: 1.0,
        offset: 0.0,
        alpha: 0.95,
        stops: &[
            (0.0, Rgba::hex(0xe8a000)),
            (0.5, Rgba::hex(0xf5c000)),
            (1.0, Rgba::hex(0xffd630)),
        ],
    },
    PetalLayer {
        scale: 0.85,
        offset: 1.0,
        alpha: 0.8,
        stops: &[(0.0, Rgba::hex(0xc87800)), (1.0, Rgba::hex(0xe8a800))],
    },
    PetalLayer {
        scale: 0.62,
        offset: 0.5,
        alpha: 0.7,
        stops: &[(0.0, Rgba::hex(0xa85a00)), (1.0, Rgba::hex(0xd08a00))],
    },
];

pub fn draw_stars(painter: &mut dyn Painter, stars: &[Star], time: f32) {
    for star in stars {
        let twinkle = star.twinkle(time);
        let halo = RadialGradient::centered(star.position, star.radius * STAR_HALO)
            .stop(0.0, star.color)
            .stop(1.0, star.color.with_alpha(0.0));
        painter.set_alpha(twinkle * 0.4);
        painter.fill(&Path::circle(star.position, star.radius * STAR_HALO), &halo.into());
        painter.set_alpha(twinkle);
        painter.fill(&Path::circle(star.position, star.radius), &Paint::Solid(star.color));
    }
    painter.set_alpha(1.0);
}

pub fn draw_shooting_star(painter: &mut dyn Painter, star: &ShootingStar) {
    if !star.is_visible() {
        return;
    }
    let head = star.position();
    let opacity = star.opacity();
    let trail_len = star.trail_len();
    let dust = Rgba::rgba(255, 255, 240, 1.0);

    for (i, point) in star.trail().enumerate() {
        let falloff = 1.0 - i as f32 / trail_len as f32;
        let fade = falloff * point.opacity;
        painter.fill(
            &Path::circle(point.position, falloff * 1.1),
            &Paint::Solid(dust.with_alpha(fade * 0.6)),
        );
    }

    if trail_len > 1
        && let Some(tail) = star.trail().nth(STREAK_REACH.min(trail_len - 1))
    {
        let streak = LinearGradient::new(tail.position, head)
            .stop(0.0, dust.with_alpha(0.0))
            .stop(1.0, dust.with_alpha(opacity * 0.9));
        painter.stroke(
            &Path::line(tail.position, head),
            &streak.into(),
            Stroke::new(STREAK_WIDTH),
        );
    }

    let glow_color = Rgba::rgba(255, 255, 230, opacity);
    let glow = RadialGradient::centered(head, HEAD_GLOW_RADIUS)
        .stop(0.0, glow_color)
        .stop(1.0, glow_color.with_alpha(0.0));
    painter.fill(&Path::circle(head, HEAD_GLOW_RADIUS), &glow.into());
}

pub fn draw_shooting_stars(painter: &mut dyn Painter, stars: &[ShootingStar]) {
    for star in stars {
        draw_shooting_star(painter, star);
    }
}

pub fn draw_sunflower(
    painter: &mut dyn Painter,
    flower: &Sunflower,
    origin: Vec2,
    time: f32,
    sway_enabled: bool,
) {
    let Some(pose) = flower.pose(origin, time, sway_enabled) else {
        return;
    };

    let stem_paint = LinearGradient::new(pose.base, pose.tip)
        .stop(0.0, Rgba::hex(0x2d5a1b))
        .stop(0.5, Rgba::hex(0x3d7a24))
        .stop(1.0, Rgba::hex(0x4a8f2a));
    let mut stem = Path::builder();
    stem.move_to(pose.base);
    stem.quad_to(pose.control, pose.tip);
    painter.stroke(&stem.build(), &stem_paint.into(), Stroke::new(pose.stem_width).round());

    for leaf in &pose.leaves {
        draw_leaf(painter, leaf);
    }

    if let Some(head) = pose.head {
        draw_head(painter, head, flower.petal_count);
    }
}

pub fn draw_sunflowers(painter: &mut dyn Painter, field: &SunflowerField, time: f32, sway_enabled: bool) {
    for flower in field.flowers() {
        draw_sunflower(painter, flower, field.origin(), time, sway_enabled);
    }
}

fn draw_leaf(painter: &mut dyn Painter, leaf: &LeafPose) {
    let mut blade = Path::builder();
    blade.move_to(leaf.base);
    blade.cubic_to(leaf.out_controls[0], leaf.out_controls[1], leaf.tip);
    blade.cubic_to(leaf.back_controls[0], leaf.back_controls[1], leaf.base);
    blade.close();
    painter.fill(&blade.build(), &Paint::Solid(Rgba::rgba(45, 110, 30, 0.85 * leaf.opacity)));
    painter.stroke(
        &Path::line(leaf.base, leaf.tip),
        &Paint::Solid(Rgba::rgba(55, 130, 35, 0.5 * leaf.opacity)),
        Stroke::new(0.8),
    );
}

fn draw_head(painter: &mut dyn Painter, head: HeadPose, petal_count: usize) {
    let HeadPose { center, radius: r } = head;
    if r <= 0.0 {
        return;
    }
    let count = petal_count.max(1);
    let pitch = TAU / count as f32;

    for layer in &PETAL_LAYERS {
        painter.set_alpha(layer.alpha);
        for i in 0..count {
            let angle = pitch * i as f32 + layer.offset * PI / count as f32;
            let (petal, paint) = petal(center, r, angle, layer);
            painter.fill(&petal, &paint);
        }
    }
    painter.set_alpha(1.0);

    let disc_radius = r * 0.38;
    let disc = Path::circle(center, disc_radius);
    let disc_paint = RadialGradient::new(center - Vec2::splat(r * 0.1), 0.0, center, disc_radius)
        .stop(0.0, Rgba::hex(0x4a2800))
        .stop(0.5, Rgba::hex(0x3a1f00))
        .stop(1.0, Rgba::hex(0x2a1400));
    painter.fill(&disc, &disc_paint.into());

    let mut seeds = Path::builder();
    for seed in golden_spiral(SEED_COUNT, r * 0.36) {
        seeds.arc(center + seed.offset(), r * 0.028, 0.0, TAU);
        seeds.close();
    }
    painter.fill(&seeds.build(), &Paint::Solid(Rgba::rgba(90, 50, 10, 0.6)));

    let sheen = Rgba::rgba(255, 255, 200, 0.18);
    let shine = RadialGradient::new(
        center - Vec2::splat(r * 0.15),
        0.0,
        center - Vec2::splat(r * 0.1),
        r * 0.25,
    )
    .stop(0.0, sheen)
    .stop(1.0, sheen.with_alpha(0.0));
    painter.fill(&disc, &shine.into());

    let warm = Rgba::rgba(255, 200, 0, 0.08);
    let glow = RadialGradient::new(center, r * 0.3, center, r * 1.5)
        .stop(0.0, warm)
        .stop(1.0, warm.with_alpha(0.0));
    painter.fill(&Path::circle(center, r * 1.5), &glow.into());
}

fn petal(center: Vec2, r: f32, angle: f32, layer: &PetalLayer) -> (Path, Paint) {
    let length = r * layer.scale;
    let width = r * 0.32;
    let along = direction(angle);
    let across = direction(angle + FRAC_PI_2);
    let base = center + along * (r * 0.35);
    let tip = center + along * (r * 0.35 + length);
    let c1 = base + direction(angle - 0.45) * (length * 0.55) + across * width;
    let c2 = base + direction(angle + 0.45) * (length * 0.55) - across * width;

    let mut path = Path::builder();
    path.move_to(base);
    path.cubic_to(c1, tip, tip);
    path.cubic_to(tip, c2, base);
    path.close();

    let gradient = layer
        .stops
        .iter()
        .fold(LinearGradient::new(base, tip), |gradient, &(offset, color)| {
            gradient.stop(offset, color)
        });
    (path.build(), gradient.into())
}
