use std::f64::consts::TAU;

use kurbo::{PathEl, Shape as _};

use crate::{
    foundation::{
        core::{BezPath, CanvasSize, Point, Rect, Rgba8, Vec2},
        error::{PlaygroundError, PlaygroundResult},
    },
    render::{
        composite,
        snapshot::Snapshot,
        surface::{DrawState, LineCap, LineJoin, Surface},
    },
};

const PATH_TOLERANCE: f64 = 0.1;

/// Software-rendered [`Surface`] backed by `vello_cpu`.
///
/// Fills are queued and rasterized lazily into a transparent layer which is then composited
/// over the retained pixels, so pixel-level operations (clear, snapshot, restore) only need
/// to flush first.
pub struct CpuSurface {
    size: CanvasSize,
    width: u16,
    height: u16,
    pixels: Vec<u8>,
    pending: Vec<FillCmd>,
    state: DrawState,
    saved: Vec<DrawState>,
    // Device space.
    path: BezPath,
}

struct FillCmd {
    path: vello_cpu::kurbo::BezPath,
    color: Rgba8,
}

impl CpuSurface {
    pub fn new(size: CanvasSize) -> PlaygroundResult<Self> {
        let (width, height) = size.as_u16()?;
        Ok(Self {
            size,
            width,
            height,
            pixels: vec![0u8; size.byte_len()],
            pending: Vec::new(),
            state: DrawState::default(),
            saved: Vec::new(),
            path: BezPath::new(),
        })
    }

    /// Number of fills queued since the last flush.
    pub fn pending_fills(&self) -> usize {
        self.pending.len()
    }

    pub fn flush(&mut self) -> PlaygroundResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for cmd in self.pending.drain(..) {
            let c = cmd.color;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
            ctx.fill_path(&cmd.path);
        }
        ctx.flush();

        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut layer);
        composite::over_in_place(&mut self.pixels, layer.data_as_u8_slice())
    }

    fn push_fill(&mut self, path: &BezPath, color: Rgba8) {
        if path.elements().is_empty() || color.a == 0 {
            return;
        }
        self.pending.push(FillCmd {
            path: bezpath_to_cpu(path),
            color,
        });
    }

    fn device_point(&self, x: f64, y: f64) -> Point {
        self.state.transform * Point::new(x, y)
    }

    fn stroke_style(&self) -> kurbo::Stroke {
        // Paths are already in device space; scale the width the way the transform would.
        let scale = self.state.transform.determinant().abs().sqrt();
        let mut style = kurbo::Stroke::new(self.state.line_width * scale)
            .with_caps(match self.state.line_cap {
                LineCap::Butt => kurbo::Cap::Butt,
                LineCap::Round => kurbo::Cap::Round,
                LineCap::Square => kurbo::Cap::Square,
            })
            .with_join(match self.state.line_join {
                LineJoin::Miter => kurbo::Join::Miter,
                LineJoin::Round => kurbo::Join::Round,
                LineJoin::Bevel => kurbo::Join::Bevel,
            });
        if self.state.line_dash.iter().any(|&d| d > 0.0) {
            let pattern: Vec<f64> = self.state.line_dash.iter().map(|d| d * scale).collect();
            style = style.with_dashes(0.0, pattern);
        }
        style
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> CanvasSize {
        self.size
    }

    fn state(&self) -> &DrawState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }

    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(st) = self.saved.pop() {
            self.state = st;
        }
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.device_point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.device_point(x, y);
        if self.path.elements().is_empty() {
            self.path.move_to(p);
        } else {
            self.path.line_to(p);
        }
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_rad: f64, end_rad: f64) {
        if !(radius.is_finite() && radius >= 0.0) {
            return;
        }
        let raw = end_rad - start_rad;
        let sweep = if raw >= TAU { TAU } else { raw.rem_euclid(TAU) };
        let arc = kurbo::Arc::new(
            Point::new(cx, cy),
            Vec2::new(radius, radius),
            start_rad,
            sweep,
            0.0,
        );

        let transform = self.state.transform;
        let continuing = !self.path.elements().is_empty();
        for el in arc.path_elements(PATH_TOLERANCE) {
            let el = transform * el;
            match el {
                PathEl::MoveTo(p) if continuing => self.path.line_to(p),
                other => self.path.push(other),
            }
        }
    }

    fn stroke(&mut self) {
        if self.path.elements().is_empty() {
            return;
        }
        let outline = kurbo::stroke(
            self.path.iter(),
            &self.stroke_style(),
            &kurbo::StrokeOpts::default(),
            PATH_TOLERANCE,
        );
        self.push_fill(&outline, self.state.stroke_color);
    }

    fn fill(&mut self) {
        let path = self.path.clone();
        self.push_fill(&path, self.state.fill_color);
    }

    fn fill_rect(&mut self, rect: Rect) {
        let path = self.state.transform * rect.to_path(PATH_TOLERANCE);
        self.push_fill(&path, self.state.fill_color);
    }

    fn clear_rect(&mut self, rect: Rect) -> PlaygroundResult<()> {
        self.flush()?;
        let device = self.state.transform.transform_rect_bbox(rect);
        composite::clear_region(&mut self.pixels, self.size, device)
    }

    fn clear(&mut self) -> PlaygroundResult<()> {
        self.pending.clear();
        self.pixels.fill(0);
        Ok(())
    }

    fn snapshot(&mut self) -> PlaygroundResult<Snapshot> {
        self.flush()?;
        Snapshot::from_premul_rgba8(self.size, self.pixels.clone())
    }

    fn put_snapshot(&mut self, snapshot: &Snapshot) -> PlaygroundResult<()> {
        if snapshot.size() != self.size {
            return Err(PlaygroundError::surface(format!(
                "snapshot is {}x{} but surface is {}x{}",
                snapshot.width(),
                snapshot.height(),
                self.size.width,
                self.size.height
            )));
        }
        self.pending.clear();
        self.pixels.copy_from_slice(snapshot.data());
        Ok(())
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    fn pt(p: Point) -> vello_cpu::kurbo::Point {
        vello_cpu::kurbo::Point::new(p.x, p.y)
    }

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
