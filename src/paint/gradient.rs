use glam::Vec2;

use super::Rgba;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

fn sample_stops(stops: &[ColorStop], t: f32) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.offset {
            let span = hi.offset - lo.offset;
            if span <= f32::EPSILON {
                return hi.color;
            }
            return lo.color.lerp(hi.color, (t - lo.offset) / span);
        }
    }
    stops.last().map_or(Rgba::TRANSPARENT, |stop| stop.color)
}

fn insert_stop(stops: &mut Vec<ColorStop>, offset: f32, color: Rgba) {
    let offset = offset.clamp(0.0, 1.0);
    let index = stops.partition_point(|stop| stop.offset <= offset);
    stops.insert(index, ColorStop { offset, color });
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    start: Vec2,
    end: Vec2,
    stops: Vec<ColorStop>,
}

impl LinearGradient {
    #[must_use]
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            stops: Vec::new(),
        }
    }

    #[must_use]
    pub fn stop(mut self, offset: f32, color: Rgba) -> Self {
        insert_stop(&mut self.stops, offset, color);
        self
    }

    #[must_use]
    pub fn color_at(&self, point: Vec2) -> Rgba {
        let axis = self.end - self.start;
        let len_sq = axis.length_squared();
        if len_sq <= f32::EPSILON {
            return self.stops.last().map_or(Rgba::TRANSPARENT, |stop| stop.color);
        }
        let t = (point - self.start).dot(axis) / len_sq;
        sample_stops(&self.stops, t)
    }
}

/// Two-circle gradient; points outside the swept cone are transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    start: Vec2,
    start_radius: f32,
    end: Vec2,
    end_radius: f32,
    stops: Vec<ColorStop>,
}

impl RadialGradient {
    #[must_use]
    pub fn new(start: Vec2, start_radius: f32, end: Vec2, end_radius: f32) -> Self {
        Self {
            start,
            start_radius: start_radius.max(0.0),
            end,
            end_radius: end_radius.max(0.0),
            stops: Vec::new(),
        }
    }

    #[must_use]
    pub fn centered(center: Vec2, radius: f32) -> Self {
        Self::new(center, 0.0, center, radius)
    }

    #[must_use]
    pub fn stop(mut self, offset: f32, color: Rgba) -> Self {
        insert_stop(&mut self.stops, offset, color);
        self
    }

    #[must_use]
    pub fn color_at(&self, point: Vec2) -> Rgba {
        match self.parameter_at(point) {
            Some(t) => sample_stops(&self.stops, t),
            None => Rgba::TRANSPARENT,
        }
    }

    fn parameter_at(&self, point: Vec2) -> Option<f32> {
        let cd = self.end - self.start;
        let pd = point - self.start;
        let dr = self.end_radius - self.start_radius;
        let r0 = self.start_radius;

        let a = cd.length_squared() - dr * dr;
        let b = pd.dot(cd) + r0 * dr;
        let c = pd.length_squared() - r0 * r0;
        let radius_ok = |t: f32| r0 + t * dr >= 0.0;

        if a.abs() <= 1e-6 {
            if b.abs() <= 1e-6 {
                return None;
            }
            let t = c / (2.0 * b);
            return radius_ok(t).then_some(t);
        }

        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let t1 = (b + root) / a;
        let t2 = (b - root) / a;
        let (hi, lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };
        if radius_ok(hi) {
            Some(hi)
        } else if radius_ok(lo) {
            Some(lo)
        } else {
            None
        }
    }
}
