use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use super::geometry::{direction, unit};

pub const TRAIL_CAP: usize = 22;
/// Horizontal slack past the right edge before a streak counts as gone.
pub const EXIT_MARGIN: f32 = 100.0;

const RAMP_IN: f32 = 0.2;
const RAMP_OUT_START: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShootingStarState {
    Waiting,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Waiting,
    Launched,
    Moved,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub position: Vec2,
    pub speed: f32,
    pub angle: f32,
    pub max_life: u32,
    pub delay: u32,
}

impl Launch {
    pub fn random(viewport: Vec2, initial: bool, rng: &mut impl Rng) -> Self {
        Self {
            position: Vec2::new(
                rng.random_range(-0.1..1.1) * viewport.x,
                rng.random_range(0.0..0.4) * viewport.y,
            ),
            speed: rng.random_range(8.0..22.0),
            angle: rng.random_range(20.0_f32..45.0).to_radians(),
            max_life: rng.random_range(40..100),
            delay: if initial {
                rng.random_range(0..200)
            } else {
                rng.random_range(60..360)
            },
        }
    }
}

/// Opacity over a flight: ramp in over the first 20 %, hold, ramp out over
/// the last 30 %.
#[must_use]
pub fn opacity_envelope(progress: f32) -> f32 {
    let opacity = if progress < RAMP_IN {
        progress / RAMP_IN
    } else if progress > RAMP_OUT_START {
        1.0 - (progress - RAMP_OUT_START) / (1.0 - RAMP_OUT_START)
    } else {
        1.0
    };
    unit(opacity)
}

#[derive(Debug, Clone)]
pub struct ShootingStar {
    position: Vec2,
    speed: f32,
    angle: f32,
    opacity: f32,
    life: u32,
    max_life: u32,
    delay: u32,
    state: ShootingStarState,
    trail: VecDeque<TrailPoint>,
}

impl ShootingStar {
    pub fn new(viewport: Vec2, rng: &mut impl Rng) -> Self {
        Self::from_launch(Launch::random(viewport, true, rng))
    }

    #[must_use]
    pub fn from_launch(launch: Launch) -> Self {
        let mut star = Self {
            position: Vec2::ZERO,
            speed: 0.0,
            angle: 0.0,
            opacity: 0.0,
            life: 0,
            max_life: 1,
            delay: 0,
            state: ShootingStarState::Waiting,
            trail: VecDeque::with_capacity(TRAIL_CAP + 1),
        };
        star.rearm(launch);
        star
    }

    pub fn rearm(&mut self, launch: Launch) {
        self.position = launch.position;
        self.speed = launch.speed;
        self.angle = launch.angle;
        self.max_life = launch.max_life.max(1);
        self.delay = launch.delay;
        self.opacity = 0.0;
        self.life = 0;
        self.state = ShootingStarState::Waiting;
        self.trail.clear();
    }

    pub fn update(&mut self, viewport: Vec2, rng: &mut impl Rng) -> Transition {
        if self.state == ShootingStarState::Waiting {
            self.delay = self.delay.saturating_sub(1);
            if self.delay > 0 {
                return Transition::Waiting;
            }
            self.state = ShootingStarState::Active;
            return Transition::Launched;
        }

        self.life += 1;
        self.opacity = opacity_envelope(self.progress());
        self.trail.push_front(TrailPoint {
            position: self.position,
            opacity: self.opacity,
        });
        self.trail.truncate(TRAIL_CAP);
        self.position += direction(self.angle) * self.speed;

        if self.life >= self.max_life || self.has_exited(viewport) {
            self.rearm(Launch::random(viewport, false, rng));
            return Transition::Expired;
        }
        Transition::Moved
    }

    #[must_use]
    pub fn has_exited(&self, viewport: Vec2) -> bool {
        self.position.x > viewport.x + EXIT_MARGIN || self.position.y > viewport.y
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.life as f32 / self.max_life as f32
    }

    #[must_use]
    pub fn state(&self) -> ShootingStarState {
        self.state
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state == ShootingStarState::Active && self.opacity > 0.0
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    #[must_use]
    pub fn life(&self) -> u32 {
        self.life
    }

    #[must_use]
    pub fn max_life(&self) -> u32 {
        self.max_life
    }

    pub fn trail(&self) -> impl ExactSizeIterator<Item = &TrailPoint> + DoubleEndedIterator {
        self.trail.iter()
    }

    #[must_use]
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShootingStarPool {
    stars: Vec<ShootingStar>,
}

impl ShootingStarPool {
    pub fn new(count: usize, viewport: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            stars: (0..count).map(|_| ShootingStar::new(viewport, rng)).collect(),
        }
    }

    pub fn tick(&mut self, viewport: Vec2, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.update(viewport, rng);
        }
    }

    #[must_use]
    pub fn stars(&self) -> &[ShootingStar] {
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

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1600.0, 800.0);

    fn launch(delay: u32, max_life: u32) -> Launch {
        Launch {
            position: Vec2::new(100.0, 50.0),
            speed: 1.0,
            angle: 0.0,
            max_life,
            delay,
        }
    }

    #[test]
    fn waits_out_its_delay_before_moving() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut star = ShootingStar::from_launch(launch(3, 50));
        assert_eq!(star.update(VIEWPORT, &mut rng), Transition::Waiting);
        assert_eq!(star.update(VIEWPORT, &mut rng), Transition::Waiting);
        assert_eq!(star.update(VIEWPORT, &mut rng), Transition::Launched);
        assert_eq!(star.position(), Vec2::new(100.0, 50.0));
        assert_eq!(star.update(VIEWPORT, &mut rng), Transition::Moved);
        assert_eq!(star.position(), Vec2::new(101.0, 50.0));
    }

    #[test]
    fn zero_delay_launches_on_first_tick() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut star = ShootingStar::from_launch(launch(0, 50));
        assert_eq!(star.update(VIEWPORT, &mut rng), Transition::Launched);
    }

    #[test]
    fn expires_exactly_when_life_runs_out() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut star = ShootingStar::from_launch(launch(0, 10));
        star.update(VIEWPORT, &mut rng);
        for tick in 1..10 {
            assert_eq!(star.update(VIEWPORT, &mut rng), Transition::Moved, "tick {tick}");
            assert_eq!(star.life(), tick);
        }
        assert_eq!(star.update(VIEWPORT, &mut rng), Transition::Expired);
        assert_eq!(star.state(), ShootingStarState::Waiting);
        assert_eq!(star.trail_len(), 0);
    }

    #[test]
    fn expires_when_leaving_the_bottom_edge() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut star = ShootingStar::from_launch(Launch {
            position: Vec2::new(200.0, 790.0),
            speed: 4.0,
            angle: std::f32::consts::FRAC_PI_2,
            max_life: 90,
            delay: 0,
        });
        star.update(VIEWPORT, &mut rng);
        assert_eq!(star.update(VIEWPORT, &mut rng), Transition::Moved);
        assert_eq!(star.update(VIEWPORT, &mut rng), Transition::Moved);
        assert_eq!(star.update(VIEWPORT, &mut rng), Transition::Expired);
    }

    #[test]
    fn right_edge_has_margin() {
        let mut star = ShootingStar::from_launch(launch(0, 10));
        star.position = Vec2::new(VIEWPORT.x + EXIT_MARGIN, 10.0);
        assert!(!star.has_exited(VIEWPORT));
        star.position.x += 0.5;
        assert!(star.has_exited(VIEWPORT));
    }

    #[test]
    fn trail_is_capped_and_newest_first() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut star = ShootingStar::from_launch(launch(0, 99));
        star.update(VIEWPORT, &mut rng);
        for _ in 0..40 {
            star.update(VIEWPORT, &mut rng);
            assert!(star.trail_len() <= TRAIL_CAP);
        }
        assert_eq!(star.trail_len(), TRAIL_CAP);
        let xs: Vec<f32> = star.trail().map(|point| point.position.x).collect();
        assert!(xs.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn envelope_shape() {
        assert!(opacity_envelope(0.0).abs() < f32::EPSILON);
        assert!((opacity_envelope(0.1) - 0.5).abs() < 1e-6);
        assert!((opacity_envelope(0.5) - 1.0).abs() < f32::EPSILON);
        assert!((opacity_envelope(0.85) - 0.5).abs() < 1e-5);
        assert!(opacity_envelope(1.0).abs() < 1e-6);
        assert!(opacity_envelope(1.4).abs() < f32::EPSILON);
    }

    #[test]
    fn pool_size_is_constant_across_many_ticks() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut pool = ShootingStarPool::new(6, VIEWPORT, &mut rng);
        for _ in 0..2_000 {
            pool.tick(VIEWPORT, &mut rng);
            assert_eq!(pool.len(), 6);
        }
    }
}
