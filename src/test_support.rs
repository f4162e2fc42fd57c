use glam::Vec2;

use crate::{
    cli::{Cli, ColorArg, DEFAULT_FPS},
    paint::{Paint, Painter, Path, Stroke},
};

pub(crate) fn test_cli() -> Cli {
    Cli {
        fps: DEFAULT_FPS,
        no_animation: false,
        reduced_motion: false,
        color: ColorArg::Auto,
        no_color: false,
        seed: None,
        hud: false,
        log_file: None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PaintOp {
    Fill,
    Stroke,
    Clip,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordingPainter {
    pub ops: Vec<PaintOp>,
    pub calls: usize,
    pub max_depth: usize,
    pub bounds: Vec<(Vec2, Vec2)>,
    alpha: f32,
    scale: Vec2,
    stack: Vec<(f32, Vec2)>,
}

impl Default for RecordingPainter {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            calls: 0,
            max_depth: 0,
            bounds: Vec::new(),
            alpha: 1.0,
            scale: Vec2::ONE,
            stack: Vec::new(),
        }
    }
}

impl RecordingPainter {
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn current_scale(&self) -> Vec2 {
        self.scale
    }

    fn record(&mut self, op: PaintOp, path: &Path) {
        self.calls += 1;
        self.ops.push(op);
        if op != PaintOp::Clip
            && let Some(bounds) = path.bounds()
        {
            self.bounds.push(bounds);
        }
    }
}

impl Painter for RecordingPainter {
    fn save(&mut self) {
        self.calls += 1;
        self.stack.push((self.alpha, self.scale));
        self.max_depth = self.max_depth.max(self.stack.len());
    }

    fn restore(&mut self) {
        self.calls += 1;
        if let Some((alpha, scale)) = self.stack.pop() {
            self.alpha = alpha;
            self.scale = scale;
        }
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.calls += 1;
        self.alpha = alpha;
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.calls += 1;
        self.scale *= Vec2::new(sx, sy);
    }

    fn clip(&mut self, path: &Path) {
        self.record(PaintOp::Clip, path);
    }

    fn fill(&mut self, path: &Path, _paint: &Paint) {
        self.record(PaintOp::Fill, path);
    }

    fn stroke(&mut self, path: &Path, _paint: &Paint, _stroke: Stroke) {
        self.record(PaintOp::Stroke, path);
    }
}
