mod gradient;
mod path;
pub mod raster;

use glam::Vec2;

pub use gradient::{LinearGradient, RadialGradient};
pub use path::{Path, PathBuilder};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: 1.0,
        }
    }

    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    // Premultiplied, so fading to a transparent stop keeps the hue.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let a = self.a + (other.a - self.a) * t;
        if a <= f32::EPSILON {
            return Self::TRANSPARENT;
        }
        let channel = |x: u8, y: u8| -> u8 {
            let px = f32::from(x) * self.a;
            let py = f32::from(y) * other.a;
            ((px + (py - px) * t) / a).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a,
        }
    }

    pub(crate) fn premultiplied(self) -> [f32; 4] {
        let a = self.a.clamp(0.0, 1.0);
        [
            f32::from(self.r) / 255.0 * a,
            f32::from(self.g) / 255.0 * a,
            f32::from(self.b) / 255.0 * a,
            a,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    #[must_use]
    pub fn color_at(&self, point: Vec2) -> Rgba {
        match self {
            Self::Solid(color) => *color,
            Self::Linear(gradient) => gradient.color_at(point),
            Self::Radial(gradient) => gradient.color_at(point),
        }
    }
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Self::Solid(color)
    }
}

impl From<LinearGradient> for Paint {
    fn from(gradient: LinearGradient) -> Self {
        Self::Linear(gradient)
    }
}

impl From<RadialGradient> for Paint {
    fn from(gradient: RadialGradient) -> Self {
        Self::Radial(gradient)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub cap: LineCap,
}

impl Stroke {
    #[must_use]
    pub const fn new(width: f32) -> Self {
        Self {
            width,
            cap: LineCap::Butt,
        }
    }

    #[must_use]
    pub const fn round(self) -> Self {
        Self {
            cap: LineCap::Round,
            ..self
        }
    }
}

/// A `restore` without a matching `save` is a no-op.
pub trait Painter {
    fn save(&mut self);
    fn restore(&mut self);
    fn alpha(&self) -> f32;
    fn set_alpha(&mut self, alpha: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    fn clip(&mut self, path: &Path);
    fn fill(&mut self, path: &Path, paint: &Paint);
    fn stroke(&mut self, path: &Path, paint: &Paint, stroke: Stroke);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        self.fill(&Path::rect(origin, size), paint);
    }
}

pub trait Surface {
    fn resize(&mut self, logical: Vec2, device_scale: f32);
    fn context(&mut self) -> Option<&mut dyn Painter>;
}
