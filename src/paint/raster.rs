#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use glam::Vec2;
use log::debug;
use lyon::tessellation::{
    BuffersBuilder, LineCap as TessCap, LineJoin, StrokeOptions, StrokeTessellator, StrokeVertex,
    StrokeVertexConstructor, VertexBuffers,
};

use super::{LineCap, Paint, Painter, Path, Stroke, Surface};

const SAMPLES: usize = 2;
/// Curve flattening and stroke tessellation tolerance, in device pixels.
const TOLERANCE: f32 = 0.05;
const MIN_HAIRLINE_ALPHA: f32 = 0.3;

struct DevicePoint;

impl StrokeVertexConstructor<Vec2> for DevicePoint {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> Vec2 {
        let position = vertex.position();
        Vec2::new(position.x, position.y)
    }
}

#[derive(Debug, Clone)]
struct PaintState {
    alpha: f32,
    scale: Vec2,
    clip: Option<Vec<f32>>,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            scale: Vec2::ONE,
            clip: None,
        }
    }
}

struct Coverage {
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
    data: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    device_scale: f32,
    pixels: Vec<[f32; 4]>,
    state: PaintState,
    stack: Vec<PaintState>,
}

impl PixelCanvas {
    #[must_use]
    pub fn new(logical: Vec2, device_scale: f32) -> Self {
        let mut canvas = Self {
            width: 0,
            height: 0,
            device_scale: 1.0,
            pixels: Vec::new(),
            state: PaintState::default(),
            stack: Vec::new(),
        };
        canvas.resize(logical, device_scale);
        canvas
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn rgb(&self, x: usize, y: usize) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b, _] = self.pixels[y * self.width + x];
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Some((byte(r), byte(g), byte(b)))
    }

    pub fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
        self.state = PaintState::default();
        self.stack.clear();
    }

    fn to_device(&self) -> Vec2 {
        self.state.scale * self.device_scale
    }

    fn coverage(&self, contours: &[Vec<Vec2>]) -> Option<Coverage> {
        let mut points = contours.iter().flatten();
        let first = *points.next()?;
        let (lo, hi) = points.fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        if hi.x - lo.x < 1.0 && hi.y - lo.y < 1.0 {
            return self.splat(contours, lo, hi);
        }

        let x0 = lo.x.floor().max(0.0) as usize;
        let y0 = lo.y.floor().max(0.0) as usize;
        let x1 = (hi.x.ceil().max(0.0) as usize).min(self.width);
        let y1 = (hi.y.ceil().max(0.0) as usize).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        let width = x1 - x0;
        let height = y1 - y0;
        let mut data = vec![0.0_f32; width * height];
        let weight = 1.0 / (SAMPLES * SAMPLES) as f32;
        let mut crossings: Vec<(f32, i32)> = Vec::new();

        for sub_row in 0..height * SAMPLES {
            let yc = y0 as f32 + (sub_row as f32 + 0.5) / SAMPLES as f32;
            crossings.clear();
            for points in contours {
                if points.len() < 2 {
                    continue;
                }
                for i in 0..points.len() {
                    let a = points[i];
                    let b = points[(i + 1) % points.len()];
                    let dir = if a.y <= yc && b.y > yc {
                        1
                    } else if b.y <= yc && a.y > yc {
                        -1
                    } else {
                        continue;
                    };
                    let x = a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y);
                    crossings.push((x, dir));
                }
            }
            if crossings.is_empty() {
                continue;
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let row = (sub_row / SAMPLES) * width;
            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding == 0 {
                    continue;
                }
                let start = sample_column(pair[0].0, x0, width);
                let end = sample_column(pair[1].0, x0, width);
                for sub_col in start..end {
                    data[row + sub_col / SAMPLES] += weight;
                }
            }
        }

        Some(Coverage {
            x0,
            y0,
            width,
            height,
            data,
        })
    }

    fn splat(&self, contours: &[Vec<Vec2>], lo: Vec2, hi: Vec2) -> Option<Coverage> {
        let center = (lo + hi) * 0.5;
        if center.x < 0.0 || center.y < 0.0 {
            return None;
        }
        let (x, y) = (center.x as usize, center.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        let area: f32 = contours.iter().map(|points| signed_area(points).abs()).sum();
        if area <= 0.0 {
            return None;
        }
        Some(Coverage {
            x0: x,
            y0: y,
            width: 1,
            height: 1,
            data: vec![area.sqrt().min(1.0)],
        })
    }

    fn composite(&mut self, coverage: &Coverage, paint: &Paint, alpha: f32) {
        let inverse = self.to_device().recip();
        for row in 0..coverage.height {
            let y = coverage.y0 + row;
            for col in 0..coverage.width {
                let mut amount = coverage.data[row * coverage.width + col].min(1.0);
                if amount <= 0.0 {
                    continue;
                }
                let x = coverage.x0 + col;
                let index = y * self.width + x;
                if let Some(clip) = &self.state.clip {
                    amount *= clip[index];
                    if amount <= 0.0 {
                        continue;
                    }
                }
                let logical = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * inverse;
                let [sr, sg, sb, sa] = paint.color_at(logical).premultiplied();
                let k = amount * alpha;
                let src = [sr * k, sg * k, sb * k, sa * k];
                let dst = &mut self.pixels[index];
                let keep = 1.0 - src[3];
                for channel in 0..4 {
                    dst[channel] = src[channel] + dst[channel] * keep;
                }
            }
        }
    }

    fn stroke_triangles(path: &Path, width: f32, cap: LineCap) -> Vec<Vec<Vec2>> {
        let cap = match cap {
            LineCap::Butt => TessCap::Butt,
            LineCap::Round => TessCap::Round,
        };
        let options = StrokeOptions::tolerance(TOLERANCE)
            .with_line_width(width)
            .with_line_cap(cap)
            .with_line_join(LineJoin::Round);
        let mut geometry: VertexBuffers<Vec2, u32> = VertexBuffers::new();
        let result = StrokeTessellator::new().tessellate_path(
            path.as_lyon(),
            &options,
            &mut BuffersBuilder::new(&mut geometry, DevicePoint),
        );
        if let Err(err) = result {
            debug!("stroke tessellation failed: {err:?}");
            return Vec::new();
        }
        geometry
            .indices
            .chunks_exact(3)
            .map(|triangle| {
                let mut points: Vec<Vec2> = triangle
                    .iter()
                    .map(|index| geometry.vertices[*index as usize])
                    .collect();
                if signed_area(&points) > 0.0 {
                    points.reverse();
                }
                points
            })
            .collect()
    }
}

fn sample_column(x: f32, x0: usize, width: usize) -> usize {
    let column = ((x - x0 as f32) * SAMPLES as f32 - 0.5).ceil();
    column.clamp(0.0, (width * SAMPLES) as f32) as usize
}

fn signed_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

impl Painter for PixelCanvas {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn alpha(&self) -> f32 {
        self.state.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.scale *= Vec2::new(sx, sy);
    }

    fn clip(&mut self, path: &Path) {
        let contours = path.scaled(self.to_device()).contours(TOLERANCE);
        let mut mask = vec![0.0_f32; self.width * self.height];
        if let Some(coverage) = self.coverage(&contours) {
            for row in 0..coverage.height {
                for col in 0..coverage.width {
                    let index = (coverage.y0 + row) * self.width + coverage.x0 + col;
                    mask[index] = coverage.data[row * coverage.width + col].min(1.0);
                }
            }
        }
        if let Some(existing) = &self.state.clip {
            for (value, previous) in mask.iter_mut().zip(existing) {
                *value *= previous;
            }
        }
        self.state.clip = Some(mask);
    }

    fn fill(&mut self, path: &Path, paint: &Paint) {
        let alpha = self.state.alpha;
        if alpha <= 0.0 {
            return;
        }
        let contours = path.scaled(self.to_device()).contours(TOLERANCE);
        if let Some(coverage) = self.coverage(&contours) {
            self.composite(&coverage, paint, alpha);
        }
    }

    fn stroke(&mut self, path: &Path, paint: &Paint, stroke: Stroke) {
        let scale = self.to_device();
        let device_width = stroke.width * (scale.x + scale.y) * 0.5;
        if device_width <= 0.0 || self.state.alpha <= 0.0 {
            return;
        }
        // Hairlines are drawn one pixel wide and faded by their true width.
        let (width, alpha) = if device_width < 1.0 {
            (1.0, self.state.alpha * device_width.max(MIN_HAIRLINE_ALPHA))
        } else {
            (device_width, self.state.alpha)
        };
        let triangles = Self::stroke_triangles(&path.scaled(scale), width, stroke.cap);
        if let Some(coverage) = self.coverage(&triangles) {
            self.composite(&coverage, paint, alpha);
        }
    }
}

impl Surface for PixelCanvas {
    fn resize(&mut self, logical: Vec2, device_scale: f32) {
        let device_scale = if device_scale.is_finite() && device_scale > 0.0 {
            device_scale
        } else {
            1.0
        };
        let device = (logical.max(Vec2::ZERO) * device_scale).ceil();
        self.width = device.x as usize;
        self.height = device.y as usize;
        self.device_scale = device_scale;
        self.pixels = vec![[0.0; 4]; self.width * self.height];
        self.state = PaintState::default();
        self.stack.clear();
    }

    fn context(&mut self) -> Option<&mut dyn Painter> {
        Some(self)
    }
}
