use std::f32::consts::PI;

use glam::Vec2;

pub const MOBILE_BREAKPOINT: f32 = 700.0;
pub const MIN_VIEWPORT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moon {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanGeometry {
    pub origin: Vec2,
    pub spread: f32,
    pub stem_scale: f32,
    pub head_scale: f32,
}

impl FanGeometry {
    #[must_use]
    pub fn angle_for(&self, index: usize, count: usize) -> f32 {
        -PI / 2.0 + (fan_position(index, count) - 0.5) * self.spread
    }
}

#[must_use]
pub fn fan_position(index: usize, count: usize) -> f32 {
    if count <= 1 {
        0.5
    } else {
        index as f32 / (count - 1) as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityCounts {
    pub stars: usize,
    pub shooting_stars: usize,
    pub sunflowers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    pub width: f32,
    pub height: f32,
    pub is_mobile: bool,
    pub moon: Moon,
    pub fan: FanGeometry,
    pub counts: EntityCounts,
}

impl SceneLayout {
    /// Derives the layout for a viewport. Non-positive or non-finite sizes
    /// are clamped to [`MIN_VIEWPORT`] rather than rejected.
    #[must_use]
    pub fn rebuild(width: f32, height: f32) -> Self {
        let width = clamp_side(width);
        let height = clamp_side(height);
        let is_mobile = width < MOBILE_BREAKPOINT;
        let min_side = width.min(height);

        let moon = Moon {
            center: Vec2::new(width * 0.82, height * 0.14),
            radius: min_side * if is_mobile { 0.07 } else { 0.055 },
        };

        let fan = FanGeometry {
            origin: Vec2::new(width / 2.0, height * 1.02),
            spread: if is_mobile { PI * 0.52 } else { PI * 0.65 },
            stem_scale: min_side * if is_mobile { 0.58 } else { 0.55 },
            head_scale: min_side * if is_mobile { 0.085 } else { 0.07 },
        };

        let counts = if is_mobile {
            EntityCounts {
                stars: 180,
                shooting_stars: 4,
                sunflowers: 5,
            }
        } else {
            EntityCounts {
                stars: 300,
                shooting_stars: 6,
                sunflowers: 7,
            }
        };

        Self {
            width,
            height,
            is_mobile,
            moon,
            fan,
            counts,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[must_use]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

fn clamp_side(value: f32) -> f32 {
    if value.is_finite() {
        value.max(MIN_VIEWPORT)
    } else {
        MIN_VIEWPORT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_layout_matches_tuning() {
        let layout = SceneLayout::rebuild(1920.0, 1080.0);
        assert!(!layout.is_mobile);
        assert_eq!(
            layout.counts,
            EntityCounts {
                stars: 300,
                shooting_stars: 6,
                sunflowers: 7
            }
        );
        assert!((layout.moon.radius - 1080.0 * 0.055).abs() < 1e-3);
        assert_eq!(layout.fan.origin, Vec2::new(960.0, 1080.0 * 1.02));
    }

    #[test]
    fn mobile_layout_matches_tuning() {
        let layout = SceneLayout::rebuild(480.0, 800.0);
        assert!(layout.is_mobile);
        assert_eq!(layout.counts.stars, 180);
        assert_eq!(layout.counts.shooting_stars, 4);
        assert_eq!(layout.counts.sunflowers, 5);
        assert!((layout.moon.radius - 480.0 * 0.07).abs() < 1e-3);
    }

    #[test]
    fn breakpoint_is_exclusive() {
        assert!(SceneLayout::rebuild(699.9, 500.0).is_mobile);
        assert!(!SceneLayout::rebuild(700.0, 500.0).is_mobile);
    }

    #[test]
    fn degenerate_viewport_is_clamped() {
        for (w, h) in [(0.0, 0.0), (-50.0, 20.0), (f32::NAN, f32::INFINITY)] {
            let layout = SceneLayout::rebuild(w, h);
            assert!(layout.width >= MIN_VIEWPORT);
            assert!(layout.height >= MIN_VIEWPORT);
            assert!(layout.moon.radius > 0.0);
        }
    }

    #[test]
    fn fan_is_symmetric_around_vertical() {
        let layout = SceneLayout::rebuild(1600.0, 800.0);
        let first = layout.fan.angle_for(0, 7);
        let middle = layout.fan.angle_for(3, 7);
        let last = layout.fan.angle_for(6, 7);
        assert!((middle + PI / 2.0).abs() < 1e-6);
        assert!(((first + PI / 2.0) + (last + PI / 2.0)).abs() < 1e-5);
        assert!((last - first - layout.fan.spread).abs() < 1e-5);
    }

    #[test]
    fn single_flower_sits_in_the_middle() {
        assert!((fan_position(0, 1) - 0.5).abs() < f32::EPSILON);
    }
}
