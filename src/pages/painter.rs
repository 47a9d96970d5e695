use crate::{
    animation::FrameHandle,
    config::PainterConfig,
    foundation::{
        core::{CanvasSize, Point},
        error::PlaygroundResult,
    },
    history::{History, Step},
    input::{ControlKind, ControlState, InputEvent},
    pages::{Page, PageCtx},
    render::{
        snapshot::Snapshot,
        surface::{LineCap, LineJoin, Surface},
    },
    routes::Route,
};

/// Freehand drawing with undo/redo.
///
/// A gesture runs from pointer-down to pointer-up (or pointer-leave). It is committed to the
/// history only if it changed the pixels shown before it started, so a click, a zero-length
/// drag or a stroke drawn entirely off-canvas leaves the history untouched.
pub struct Painter {
    config: PainterConfig,
    history: History<Snapshot>,
    gesture: Option<Gesture>,
}

#[derive(Debug, Default)]
struct Gesture {
    last: Option<Point>,
    dirty: bool,
}

impl Painter {
    pub fn new(config: PainterConfig) -> Self {
        Self {
            config,
            history: History::new(),
            gesture: None,
        }
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    fn extend_stroke(&mut self, to: Point, surface: &mut dyn Surface) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        let from = gesture.last.unwrap_or(to);

        surface.save();
        surface.set_stroke_color(self.config.stroke_color);
        surface.set_line_width(self.config.line_width);
        surface.set_line_cap(LineCap::Round);
        surface.set_line_join(LineJoin::Round);
        surface.begin_path();
        surface.move_to(from.x, from.y);
        surface.line_to(to.x, to.y);
        surface.stroke();
        surface.restore();

        gesture.last = Some(to);
        gesture.dirty = true;
    }

    fn end_gesture(&mut self, surface: &mut dyn Surface) -> PlaygroundResult<()> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(());
        };
        if !gesture.dirty {
            return Ok(());
        }
        let snapshot = surface.snapshot()?;
        let unchanged = match self.history.current() {
            Some(shown) => *shown == snapshot,
            None => snapshot.is_blank(),
        };
        if unchanged {
            tracing::debug!("gesture discarded: no pixels changed");
        } else {
            self.history.record(snapshot);
            tracing::debug!(
                cursor = self.history.position(),
                len = self.history.len(),
                "stroke committed"
            );
        }
        Ok(())
    }

    fn undo(&mut self, surface: &mut dyn Surface) -> PlaygroundResult<()> {
        match self.history.undo() {
            Some(Step::Show(snapshot)) => surface.put_snapshot(snapshot)?,
            Some(Step::Blank) => surface.clear()?,
            None => {
                tracing::debug!("undo ignored: nothing to undo");
                return Ok(());
            }
        }
        tracing::debug!(cursor = self.history.position(), "undo");
        Ok(())
    }

    fn redo(&mut self, surface: &mut dyn Surface) -> PlaygroundResult<()> {
        let Some(snapshot) = self.history.redo() else {
            tracing::debug!("redo ignored: nothing to redo");
            return Ok(());
        };
        surface.put_snapshot(snapshot)?;
        tracing::debug!(cursor = self.history.position(), "redo");
        Ok(())
    }
}

impl Page for Painter {
    fn route(&self) -> Route {
        Route::Painter
    }

    fn canvas(&self) -> CanvasSize {
        self.config.canvas
    }

    fn mount(&mut self, ctx: &mut PageCtx<'_>) -> PlaygroundResult<()> {
        ctx.surface.clear()
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        ctx: &mut PageCtx<'_>,
    ) -> PlaygroundResult<()> {
        match *event {
            InputEvent::PointerDown { .. } => {
                self.gesture = Some(Gesture::default());
                Ok(())
            }
            InputEvent::PointerMove { x, y } => {
                self.extend_stroke(Point::new(x, y), ctx.surface);
                Ok(())
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => self.end_gesture(ctx.surface),
            InputEvent::Press { control } => {
                // A control press happens off-canvas, so any open gesture is over.
                self.end_gesture(ctx.surface)?;
                match control {
                    ControlKind::Undo => self.undo(ctx.surface),
                    ControlKind::Redo => self.redo(ctx.surface),
                }
            }
            InputEvent::KeyDown { .. } | InputEvent::KeyUp { .. } => Ok(()),
        }
    }

    fn on_frame(&mut self, _handle: FrameHandle, _ctx: &mut PageCtx<'_>) -> PlaygroundResult<()> {
        Ok(())
    }

    fn controls(&self) -> Vec<ControlState> {
        vec![
            ControlState {
                kind: ControlKind::Undo,
                enabled: self.history.can_undo(),
            },
            ControlState {
                kind: ControlKind::Redo,
                enabled: self.history.can_redo(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::testing::Harness;

    fn painter() -> Harness<Painter> {
        Harness::mount(Painter::new(PainterConfig {
            canvas: CanvasSize::new(64, 64),
            ..PainterConfig::default()
        }))
    }

    fn stroke(h: &mut Harness<Painter>, points: &[(f64, f64)]) {
        let (x0, y0) = points[0];
        h.input(InputEvent::PointerDown { x: x0, y: y0 });
        for &(x, y) in points {
            h.input(InputEvent::PointerMove { x, y });
        }
        h.input(InputEvent::PointerUp);
    }

    fn press(h: &mut Harness<Painter>, control: ControlKind) {
        h.input(InputEvent::Press { control });
    }

    fn shown(h: &mut Harness<Painter>) -> Snapshot {
        h.surface.snapshot().unwrap()
    }

    fn enabled(h: &Harness<Painter>) -> (bool, bool) {
        let c = h.page.controls();
        (c[0].enabled, c[1].enabled)
    }

    #[test]
    fn controls_start_disabled() {
        let h = painter();
        assert_eq!(enabled(&h), (false, false));
    }

    #[test]
    fn click_without_movement_records_nothing() {
        let mut h = painter();
        h.input(InputEvent::PointerDown { x: 5.0, y: 5.0 });
        h.input(InputEvent::PointerUp);
        h.input(InputEvent::PointerDown { x: 5.0, y: 5.0 });
        h.input(InputEvent::PointerLeave);
        assert!(h.page.history().is_empty());
        assert!(shown(&mut h).is_blank());
    }

    #[test]
    fn zero_length_drag_records_nothing() {
        let mut h = painter();
        h.input(InputEvent::PointerDown { x: 20.0, y: 20.0 });
        h.input(InputEvent::PointerMove { x: 20.0, y: 20.0 });
        h.input(InputEvent::PointerUp);
        assert!(h.page.history().is_empty());
        assert_eq!(enabled(&h), (false, false));

        stroke(&mut h, &[(4.0, 32.0), (60.0, 32.0)]);
        let drawn = shown(&mut h);
        h.input(InputEvent::PointerDown { x: 10.0, y: 10.0 });
        h.input(InputEvent::PointerMove { x: 10.0, y: 10.0 });
        h.input(InputEvent::PointerLeave);
        assert_eq!(h.page.history().len(), 1);
        assert_eq!(shown(&mut h), drawn);
    }

    #[test]
    fn off_canvas_stroke_records_nothing() {
        let mut h = painter();
        stroke(&mut h, &[(200.0, 200.0), (300.0, 250.0)]);
        assert!(h.page.history().is_empty());
        assert!(shown(&mut h).is_blank());

        stroke(&mut h, &[(4.0, 10.0), (60.0, 10.0)]);
        press(&mut h, ControlKind::Undo);
        stroke(&mut h, &[(-50.0, -50.0), (-10.0, -80.0)]);
        // Nothing was drawn, so the undone stroke is still redoable.
        assert_eq!(h.page.history().position(), -1);
        assert_eq!(enabled(&h), (false, true));
    }

    #[test]
    fn moves_without_pointer_down_do_not_draw() {
        let mut h = painter();
        h.input(InputEvent::PointerMove { x: 5.0, y: 5.0 });
        h.input(InputEvent::PointerMove { x: 40.0, y: 40.0 });
        h.input(InputEvent::PointerUp);
        assert!(h.page.history().is_empty());
        assert!(shown(&mut h).is_blank());
    }

    #[test]
    fn stroke_is_committed_on_pointer_up() {
        let mut h = painter();
        stroke(&mut h, &[(4.0, 32.0), (60.0, 32.0)]);

        assert_eq!(h.page.history().position(), 0);
        assert!(!h.page.is_drawing());
        assert_eq!(shown(&mut h).pixel(32, 32).map(|p| p[3]), Some(255));
        assert_eq!(enabled(&h), (true, false));
    }

    #[test]
    fn undo_restores_previous_stroke_and_blank() {
        let mut h = painter();
        stroke(&mut h, &[(4.0, 10.0), (60.0, 10.0)]);
        let a = shown(&mut h);
        stroke(&mut h, &[(4.0, 50.0), (60.0, 50.0)]);

        press(&mut h, ControlKind::Undo);
        assert_eq!(shown(&mut h), a);
        assert_eq!(enabled(&h), (true, true));

        press(&mut h, ControlKind::Undo);
        assert!(shown(&mut h).is_blank());
        assert_eq!(h.page.history().position(), -1);
        assert_eq!(enabled(&h), (false, true));

        // Disabled undo is a no-op.
        press(&mut h, ControlKind::Undo);
        assert_eq!(h.page.history().position(), -1);
    }

    #[test]
    fn redo_then_undo_restores_the_pre_redo_surface() {
        let mut h = painter();
        stroke(&mut h, &[(4.0, 10.0), (60.0, 10.0)]);
        stroke(&mut h, &[(4.0, 50.0), (60.0, 50.0)]);
        press(&mut h, ControlKind::Undo);
        let before = shown(&mut h);

        press(&mut h, ControlKind::Redo);
        assert_ne!(shown(&mut h), before);
        press(&mut h, ControlKind::Undo);
        assert_eq!(shown(&mut h), before);
    }

    #[test]
    fn new_stroke_after_undo_discards_redo() {
        let mut h = painter();
        stroke(&mut h, &[(4.0, 10.0), (60.0, 10.0)]);
        stroke(&mut h, &[(4.0, 30.0), (60.0, 30.0)]);
        press(&mut h, ControlKind::Undo);
        stroke(&mut h, &[(32.0, 4.0), (32.0, 60.0)]);

        assert_eq!(h.page.history().len(), 2);
        assert_eq!(h.page.history().position(), 1);
        assert_eq!(enabled(&h), (true, false));

        let current = shown(&mut h);
        press(&mut h, ControlKind::Redo);
        assert_eq!(shown(&mut h), current);
    }

    #[test]
    fn control_press_mid_gesture_commits_first() {
        let mut h = painter();
        h.input(InputEvent::PointerDown { x: 4.0, y: 32.0 });
        h.input(InputEvent::PointerMove { x: 4.0, y: 32.0 });
        h.input(InputEvent::PointerMove { x: 60.0, y: 32.0 });
        press(&mut h, ControlKind::Undo);

        assert_eq!(h.page.history().len(), 1);
        assert_eq!(h.page.history().position(), -1);
        assert!(shown(&mut h).is_blank());
    }
}
