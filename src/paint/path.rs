use glam::Vec2;
use lyon::geom::Arc;
use lyon::math::{Angle, Box2D, Point, Transform, point, vector};
use lyon::path::iterator::PathIterator;
use lyon::path::{PathEvent, Winding, path::Builder};

const BOUNDS_TOLERANCE: f32 = 0.1;

fn to_point(v: Vec2) -> Point {
    point(v.x, v.y)
}

fn to_vec2(p: Point) -> Vec2 {
    Vec2::new(p.x, p.y)
}

#[derive(Debug, Clone)]
pub struct Path {
    inner: lyon::path::Path,
}

impl Path {
    #[must_use]
    pub fn builder() -> PathBuilder {
        PathBuilder::default()
    }

    #[must_use]
    pub fn circle(center: Vec2, radius: f32) -> Self {
        let mut builder = lyon::path::Path::builder();
        builder.add_circle(to_point(center), radius, Winding::Positive);
        Self {
            inner: builder.build(),
        }
    }

    #[must_use]
    pub fn rect(origin: Vec2, size: Vec2) -> Self {
        let mut builder = lyon::path::Path::builder();
        builder.add_rectangle(
            &Box2D::new(to_point(origin), to_point(origin + size)),
            Winding::Positive,
        );
        Self {
            inner: builder.build(),
        }
    }

    #[must_use]
    pub fn line(from: Vec2, to: Vec2) -> Self {
        let mut builder = Self::builder();
        builder.move_to(from);
        builder.line_to(to);
        builder.build()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.iter().next().is_none()
    }

    #[must_use]
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let contours = self.contours(BOUNDS_TOLERANCE);
        let mut points = contours.iter().flatten();
        let first = *points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))))
    }

    #[must_use]
    pub fn scaled(&self, scale: Vec2) -> Self {
        Self {
            inner: self
                .inner
                .clone()
                .transformed(&Transform::scale(scale.x, scale.y)),
        }
    }

    pub(crate) fn contours(&self, tolerance: f32) -> Vec<Vec<Vec2>> {
        let mut contours: Vec<Vec<Vec2>> = Vec::new();
        for event in self.inner.iter().flattened(tolerance) {
            match event {
                PathEvent::Begin { at } => contours.push(vec![to_vec2(at)]),
                PathEvent::Line { to, .. } => {
                    if let Some(contour) = contours.last_mut() {
                        contour.push(to_vec2(to));
                    }
                }
                _ => {}
            }
        }
        contours
    }

    pub(crate) fn as_lyon(&self) -> &lyon::path::Path {
        &self.inner
    }
}

pub struct PathBuilder {
    inner: Builder,
    open: bool,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self {
            inner: lyon::path::Path::builder(),
            open: false,
        }
    }
}

impl PathBuilder {
    pub fn move_to(&mut self, at: Vec2) {
        self.end_open();
        self.inner.begin(to_point(at));
        self.open = true;
    }

    pub fn line_to(&mut self, to: Vec2) {
        if self.open {
            self.inner.line_to(to_point(to));
        } else {
            self.move_to(to);
        }
    }

    pub fn quad_to(&mut self, ctrl: Vec2, to: Vec2) {
        self.ensure_open(ctrl);
        self.inner.quadratic_bezier_to(to_point(ctrl), to_point(to));
    }

    pub fn cubic_to(&mut self, c1: Vec2, c2: Vec2, to: Vec2) {
        self.ensure_open(c1);
        self.inner
            .cubic_bezier_to(to_point(c1), to_point(c2), to_point(to));
    }

    pub fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        self.ellipse(center, Vec2::splat(radius), start, end);
    }

    pub fn ellipse(&mut self, center: Vec2, radii: Vec2, start: f32, end: f32) {
        let arc = Arc {
            center: to_point(center),
            radii: vector(radii.x, radii.y),
            start_angle: Angle::radians(start),
            sweep_angle: Angle::radians(end - start),
            x_rotation: Angle::radians(0.0),
        };
        self.line_to(to_vec2(arc.from()));
        let inner = &mut self.inner;
        arc.for_each_quadratic_bezier(&mut |segment| {
            inner.quadratic_bezier_to(segment.ctrl, segment.to);
        });
    }

    pub fn close(&mut self) {
        if self.open {
            self.inner.close();
            self.open = false;
        }
    }

    #[must_use]
    pub fn build(mut self) -> Path {
        self.end_open();
        Path {
            inner: self.inner.build(),
        }
    }

    fn ensure_open(&mut self, fallback: Vec2) {
        if !self.open {
            self.move_to(fallback);
        }
    }

    fn end_open(&mut self) {
        if self.open {
            self.inner.end(false);
            self.open = false;
        }
    }
}
