use glam::Vec2;
use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::paint::Painter;
use crate::scene::{
    MotionSetting, Scene,
    layout::SceneLayout,
    shooting::{Launch, ShootingStar},
    stars::Star,
    sunflower::{Growth, Sunflower},
};
use crate::test_support::{PaintOp, RecordingPainter};

fn layout() -> SceneLayout {
    SceneLayout::rebuild(1920.0, 1080.0)
}

fn assert_clean(painter: &RecordingPainter) {
    assert_eq!(painter.depth(), 0, "unbalanced save/restore");
    assert!((painter.alpha() - 1.0).abs() < f32::EPSILON, "alpha left at {}", painter.alpha());
    assert_eq!(painter.current_scale(), Vec2::ONE);
}

fn flying_star() -> ShootingStar {
    let mut star = ShootingStar::from_launch(Launch {
        position: Vec2::new(100.0, 50.0),
        speed: 10.0,
        angle: 30_f32.to_radians(),
        max_life: 80,
        delay: 1,
    });
    let viewport = Vec2::new(1000.0, 1000.0);
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..31 {
        star.update(viewport, &mut rng);
    }
    star
}

#[test]
fn waiting_shooting_star_paints_nothing() {
    let star = ShootingStar::from_launch(Launch {
        position: Vec2::new(10.0, 10.0),
        speed: 12.0,
        angle: 0.5,
        max_life: 60,
        delay: 40,
    });
    let mut painter = RecordingPainter::default();
    draw_shooting_star(&mut painter, &star);
    assert_eq!(painter.calls, 0);
}

#[test]
fn flying_star_draws_trail_then_streak_then_glow() {
    let star = flying_star();
    assert!(star.is_visible());
    assert_eq!(star.trail_len(), 22);

    let mut painter = RecordingPainter::default();
    draw_shooting_star(&mut painter, &star);

    let trail = star.trail_len();
    assert_eq!(painter.ops.len(), trail + 2);
    assert!(painter.ops[..trail].iter().all(|op| *op == PaintOp::Fill));
    assert_eq!(painter.ops[trail], PaintOp::Stroke);
    assert_eq!(painter.ops[trail + 1], PaintOp::Fill);
    assert_clean(&painter);
}

#[test]
fn stars_restore_full_alpha() {
    let mut rng = StdRng::seed_from_u64(8);
    let layout = layout();
    let stars: Vec<Star> = (0..3).map(|_| Star::random(&layout, &mut rng)).collect();
    let mut painter = RecordingPainter::default();
    draw_stars(&mut painter, &stars, 2.5);
    assert_eq!(painter.ops, vec![PaintOp::Fill; 6]);
    assert_clean(&painter);
}

#[test]
fn sky_covers_the_whole_viewport() {
    let layout = layout();
    let mut painter = RecordingPainter::default();
    draw_sky(&mut painter, &layout);
    assert_eq!(painter.bounds, vec![(Vec2::ZERO, layout.viewport())]);
}

#[test]
fn nebula_and_moon_balance_their_state() {
    let layout = layout();
    let mut painter = RecordingPainter::default();
    draw_nebula(&mut painter, &layout);
    assert_eq!(painter.max_depth, 1);
    assert_clean(&painter);

    let mut painter = RecordingPainter::default();
    draw_moon(&mut painter, &layout);
    assert!(painter.ops.contains(&PaintOp::Clip));
    assert_clean(&painter);
}

#[test]
fn ground_shimmers_between_frames() {
    let layout = layout();
    let mut rng = StdRng::seed_from_u64(11);
    let mut first = RecordingPainter::default();
    draw_ground(&mut first, &layout, &mut rng);
    let mut second = RecordingPainter::default();
    draw_ground(&mut second, &layout, &mut rng);

    assert_eq!(first.ops, vec![PaintOp::Fill, PaintOp::Fill]);
    assert_ne!(first.bounds[1], second.bounds[1]);
    // Blades sit on the bottom edge and only rise above it.
    let (top_left, bottom_right) = first.bounds[1];
    assert!(bottom_right.y <= layout.height + 1e-3);
    assert!(top_left.y >= layout.height - 26.5);
}

#[test]
fn ungrown_sunflower_paints_nothing() {
    let layout = layout();
    let flower = Sunflower::generate(0, &layout, &mut StdRng::seed_from_u64(1))
        .with_growth(Growth::new(10, 0.01));
    let mut painter = RecordingPainter::default();
    draw_sunflower(&mut painter, &flower, layout.fan.origin, 0.0, true);
    assert_eq!(painter.calls, 0);
}

#[test]
fn bloomed_sunflower_paints_every_part() {
    let layout = layout();
    let mut flower = Sunflower::generate(2, &layout, &mut StdRng::seed_from_u64(6));
    flower.finish();
    let leaves = flower.leaves.len();

    let mut painter = RecordingPainter::default();
    draw_sunflower(&mut painter, &flower, layout.fan.origin, 1.0, true);

    let fills = painter.ops.iter().filter(|op| **op == PaintOp::Fill).count();
    let strokes = painter.ops.iter().filter(|op| **op == PaintOp::Stroke).count();
    assert_eq!(painter.ops[0], PaintOp::Stroke, "stem comes first");
    assert_eq!(strokes, 1 + leaves);
    // Leaf blades, three petal rings, then disc, seeds, shine and glow.
    assert_eq!(fills, leaves + 3 * flower.petal_count + 4);
    assert_clean(&painter);
}

#[test]
fn whole_scene_leaves_painter_clean() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut scene = Scene::build(layout(), MotionSetting::Full, &mut rng);
    for _ in 0..400 {
        scene.tick(&mut rng);
    }
    let mut painter = RecordingPainter::default();
    draw_scene(&mut painter, &scene, &mut rng);
    assert!(painter.calls > 600);
    assert_eq!(painter.bounds[0], (Vec2::ZERO, scene.layout().viewport()));
    assert_clean(&painter);
}

#[test]
fn still_scene_on_real_canvas_shows_petal_colours() {
    use crate::paint::raster::PixelCanvas;

    let layout = SceneLayout::rebuild(800.0, 640.0);
    let mut rng = StdRng::seed_from_u64(2);
    let scene = Scene::build(layout, MotionSetting::Off, &mut rng);
    let mut canvas = PixelCanvas::new(layout.viewport(), 0.125);
    draw_scene(&mut canvas, &scene, &mut rng);

    let yellowish = (0..canvas.height())
        .flat_map(|y| (0..canvas.width()).map(move |x| (x, y)))
        .filter_map(|(x, y)| canvas.rgb(x, y))
        .filter(|(r, g, b)| *r > 150 && *g > 90 && *b < 80)
        .count();
    assert!(yellowish > 10, "only {yellowish} petal-coloured pixels");
    assert_eq!(canvas.save_depth(), 0);
}
