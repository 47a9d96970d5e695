use crate::{
    foundation::{
        core::{Affine, CanvasSize, Rect, Rgba8},
        error::PlaygroundResult,
    },
    render::snapshot::Snapshot,
};

/// Line end style for stroked paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Line corner style for stroked paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Graphics state saved and restored by [`Surface::save`] / [`Surface::restore`].
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub transform: Affine,
    pub fill_color: Rgba8,
    pub stroke_color: Rgba8,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub line_dash: Vec<f64>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            fill_color: Rgba8::BLACK,
            stroke_color: Rgba8::BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            line_dash: Vec::new(),
        }
    }
}

/// A drawable 2D bitmap with canvas-style immediate drawing.
///
/// Path coordinates are transformed by the current transform when they are added, so
/// changing the transform mid-path affects only the points added afterwards. Fills and
/// strokes may be batched; [`Surface::snapshot`] always observes every prior operation.
pub trait Surface {
    fn size(&self) -> CanvasSize;

    fn state(&self) -> &DrawState;
    fn state_mut(&mut self) -> &mut DrawState;

    /// Push a copy of the current [`DrawState`].
    fn save(&mut self);
    /// Pop the last saved [`DrawState`]; no-op when nothing was saved.
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64) {
        let st = self.state_mut();
        st.transform = st.transform * Affine::translate((dx, dy));
    }

    fn rotate(&mut self, angle_rad: f64) {
        let st = self.state_mut();
        st.transform = st.transform * Affine::rotate(angle_rad);
    }

    fn set_fill_color(&mut self, color: Rgba8) {
        self.state_mut().fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Rgba8) {
        self.state_mut().stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.state_mut().line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state_mut().line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state_mut().line_join = join;
    }

    /// Set the dash pattern. Patterns with a negative or non-finite entry are ignored.
    fn set_line_dash(&mut self, segments: &[f64]) {
        if segments.iter().all(|s| s.is_finite() && *s >= 0.0) {
            self.state_mut().line_dash = segments.to_vec();
        }
    }

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Clockwise arc from `start_rad` to `end_rad` around `(cx, cy)`.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_rad: f64, end_rad: f64);

    fn stroke(&mut self);
    fn fill(&mut self);

    fn fill_rect(&mut self, rect: Rect);
    /// Make every pixel covered by `rect` (after the current transform) transparent.
    fn clear_rect(&mut self, rect: Rect) -> PlaygroundResult<()>;

    /// Clear the whole canvas regardless of the current transform.
    fn clear(&mut self) -> PlaygroundResult<()>;

    fn snapshot(&mut self) -> PlaygroundResult<Snapshot>;
    /// Replace every pixel with the contents of `snapshot`.
    fn put_snapshot(&mut self, snapshot: &Snapshot) -> PlaygroundResult<()>;
}
