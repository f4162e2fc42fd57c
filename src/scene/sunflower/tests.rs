use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::scene::layout::SceneLayout;

fn desktop() -> SceneLayout {
    SceneLayout::rebuild(1920.0, 1080.0)
}

fn flower(growth: Growth) -> Sunflower {
    Sunflower::generate(3, &desktop(), &mut StdRng::seed_from_u64(21)).with_growth(growth)
}

#[test]
fn blooms_in_exactly_one_hundred_ticks_at_one_percent() {
    let mut growth = Growth::new(0, 0.01);
    let mut previous = growth.progress();
    for tick in 1..=100 {
        growth.tick();
        let progress = growth.progress();
        assert!(progress >= previous, "tick {tick} went backwards");
        assert!(progress <= 1.0);
        if tick < 100 {
            assert!(progress < 1.0, "bloomed early at tick {tick}");
        }
        previous = progress;
    }
    assert!((growth.progress() - 1.0).abs() < f32::EPSILON);
    growth.tick();
    assert!((growth.progress() - 1.0).abs() < f32::EPSILON);
}

#[test]
fn delay_holds_growth_back() {
    let mut growth = Growth::new(3, 0.5);
    for _ in 0..3 {
        growth.tick();
        assert!(growth.progress().abs() < f32::EPSILON);
    }
    growth.tick();
    assert!((growth.progress() - 0.5).abs() < f32::EPSILON);
}

#[test]
fn stem_is_full_before_head_appears() {
    for step in 0..=1000 {
        let stages = GrowthStages::at(step as f32 / 1000.0);
        if stages.head > 0.0 {
            assert!((stages.stem - 1.0).abs() < f32::EPSILON, "p={}", step);
        }
        assert!((0.0..=1.0).contains(&stages.head));
        assert!((0.0..=1.0).contains(&stages.leaf));
    }
}

#[test]
fn leaves_start_while_stem_is_still_growing() {
    let stages = GrowthStages::at(0.3);
    assert!(stages.leaf > 0.0);
    assert!(stages.stem < 1.0);
    assert!(stages.head.abs() < f32::EPSILON);
}

#[test]
fn delays_are_staggered_in_fan_order() {
    let layout = desktop();
    let mut rng = StdRng::seed_from_u64(4);
    let field = SunflowerField::populate(&layout, &mut rng);
    let delays: Vec<u32> = field.flowers().iter().map(|f| f.growth().delay()).collect();
    assert_eq!(delays, vec![30, 48, 66, 84, 102, 120, 138]);
    let angles: Vec<f32> = field.flowers().iter().map(|f| f.angle).collect();
    assert!(angles.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn generated_parameters_stay_in_range() {
    let layout = desktop();
    let mut rng = StdRng::seed_from_u64(99);
    for index in 0..layout.counts.sunflowers {
        let flower = Sunflower::generate(index, &layout, &mut rng);
        assert!((16..20).contains(&flower.petal_count));
        assert!(flower.sway.amplitude.abs() <= 0.02);
        assert!((1..=2).contains(&flower.leaves.len()));
        assert!(flower.stem_length > 0.0 && flower.head_size > 0.0);
    }
}

#[test]
fn no_pose_before_growth_starts() {
    let flower = flower(Growth::new(5, 0.01));
    assert!(flower.pose(Vec2::ZERO, 0.0, true).is_none());
}

#[test]
fn growing_flower_does_not_sway() {
    let mut growth = Growth::new(0, 0.01);
    for _ in 0..60 {
        growth.tick();
    }
    let flower = flower(growth);
    for step in 0..50 {
        assert!(flower.sway_offset(step as f32 * 0.3).abs() < f32::EPSILON);
    }
}

#[test]
fn bloomed_flower_sways_within_amplitude() {
    let mut flower = flower(Growth::new(0, 0.01));
    flower.sway.amplitude = 0.02;
    flower.finish();
    let offsets: Vec<f32> = (0..200).map(|step| flower.sway_offset(step as f32 * 0.1)).collect();
    assert!(offsets.iter().all(|offset| offset.abs() <= 0.02 + 1e-6));
    assert!(offsets.iter().any(|offset| offset.abs() > 0.005));
}

#[test]
fn bloomed_pose_has_head_at_stem_tip() {
    let mut flower = flower(Growth::new(0, 0.01));
    flower.finish();
    let origin = Vec2::new(960.0, 1100.0);
    let pose = flower.pose(origin, 0.0, false).expect("visible");
    let head = pose.head.expect("bloomed");
    assert_eq!(head.center, pose.tip);
    assert!((head.radius - flower.head_size).abs() < 1e-3);
    assert!((pose.tip.distance(origin) - flower.stem_length).abs() < 1e-2);
    assert_eq!(pose.leaves.len(), flower.leaves.len());
}

#[test]
fn half_grown_pose_has_no_head() {
    let mut growth = Growth::new(0, 0.01);
    for _ in 0..40 {
        growth.tick();
    }
    let pose = flower(growth)
        .pose(Vec2::ZERO, 0.0, true)
        .expect("visible");
    assert!(pose.head.is_none());
    assert!(!pose.leaves.is_empty());
}
