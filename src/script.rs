//! Headless input scripts: a route, a frame count and the events to inject per frame.
//!
//! ```json
//! {
//!   "route": "/painter",
//!   "frames": 3,
//!   "events": [
//!     { "frame": 0, "event": { "type": "pointer_down", "x": 10, "y": 10 } },
//!     { "frame": 1, "event": { "type": "pointer_move", "x": 10, "y": 10 } },
//!     { "frame": 1, "event": { "type": "pointer_move", "x": 80, "y": 40 } },
//!     { "frame": 2, "event": { "type": "pointer_up" } }
//!   ]
//! }
//! ```

use std::path::Path;

use crate::{
    app::App,
    foundation::{
        core::FrameIndex,
        error::{PlaygroundError, PlaygroundResult},
    },
    input::InputEvent,
    render::snapshot::Snapshot,
    routes::Route,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputScript {
    pub route: String,
    pub frames: u64,
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptedEvent {
    /// Frame the event is dispatched in, before that frame's callbacks run.
    pub frame: u64,
    pub event: InputEvent,
}

impl InputScript {
    pub fn from_json_str(json: &str) -> PlaygroundResult<Self> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: &Path) -> PlaygroundResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            PlaygroundError::Other(
                anyhow::Error::new(e).context(format!("read script '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> PlaygroundResult<()> {
        Route::resolve(&self.route)?;
        if self.frames == 0 {
            return Err(PlaygroundError::validation("script frames must be > 0"));
        }
        let mut prev = 0;
        for (i, ev) in self.events.iter().enumerate() {
            if ev.frame >= self.frames {
                return Err(PlaygroundError::validation(format!(
                    "events[{i}].frame {} is outside 0..{}",
                    ev.frame, self.frames
                )));
            }
            if ev.frame < prev {
                return Err(PlaygroundError::validation(format!(
                    "events[{i}] is out of order (frame {} after {prev})",
                    ev.frame
                )));
            }
            prev = ev.frame;
        }
        Ok(())
    }

    /// Navigate `app` to the script's route and play it. For each frame, the frame's events
    /// are dispatched, then the frame is advanced and `on_frame` sees the result.
    #[tracing::instrument(skip_all)]
    pub fn run<F>(&self, app: &mut App, mut on_frame: F) -> PlaygroundResult<Snapshot>
    where
        F: FnMut(FrameIndex, &mut App) -> PlaygroundResult<()>,
    {
        self.validate()?;
        tracing::debug!(route = %self.route, frames = self.frames, "playing script");
        app.navigate(&self.route)?;

        let mut events = self.events.iter().peekable();
        for frame in 0..self.frames {
            while let Some(ev) = events.next_if(|ev| ev.frame == frame) {
                app.dispatch(&ev.event)?;
            }
            app.frame()?;
            on_frame(FrameIndex(frame), app)?;
        }
        app.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAINT: &str = r#"{
        "route": "/painter",
        "frames": 3,
        "events": [
            { "frame": 0, "event": { "type": "pointer_down", "x": 10, "y": 10 } },
            { "frame": 1, "event": { "type": "pointer_move", "x": 10, "y": 10 } },
            { "frame": 1, "event": { "type": "pointer_move", "x": 80, "y": 40 } },
            { "frame": 2, "event": { "type": "pointer_up" } }
        ]
    }"#;

    #[test]
    fn parses_and_plays_a_painter_script() {
        let script = InputScript::from_json_str(PAINT).unwrap();
        assert_eq!(script.events.len(), 4);

        let mut app = App::default();
        let mut seen = Vec::new();
        let snap = script
            .run(&mut app, |f, _| {
                seen.push(f.0);
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec![0, 1, 2]);
        assert!(!snap.is_blank());
        assert_eq!(app.title(), "Canvas Playground - Painter");
    }

    #[test]
    fn rejects_bad_scripts() {
        let zero = r#"{ "route": "/painter", "frames": 0 }"#;
        assert!(matches!(
            InputScript::from_json_str(zero),
            Err(PlaygroundError::Validation(_))
        ));

        let late = r#"{ "route": "/painter", "frames": 1,
            "events": [ { "frame": 1, "event": { "type": "pointer_up" } } ] }"#;
        assert!(InputScript::from_json_str(late).is_err());

        let unordered = r#"{ "route": "/painter", "frames": 5, "events": [
            { "frame": 3, "event": { "type": "pointer_up" } },
            { "frame": 1, "event": { "type": "pointer_up" } } ] }"#;
        assert!(InputScript::from_json_str(unordered).is_err());

        let route = r#"{ "route": "/missing", "frames": 1 }"#;
        assert!(matches!(
            InputScript::from_json_str(route),
            Err(PlaygroundError::Routing(_))
        ));

        let unknown_event = r#"{ "route": "/painter", "frames": 1,
            "events": [ { "frame": 0, "event": { "type": "wiggle" } } ] }"#;
        assert!(matches!(
            InputScript::from_json_str(unknown_event),
            Err(PlaygroundError::Serde(_))
        ));
    }

    #[test]
    fn keyboard_script_moves_the_box() {
        let json = r#"{
            "route": "/controllable-box",
            "frames": 4,
            "events": [
                { "frame": 0, "event": { "type": "key_down", "key": "ArrowRight" } },
                { "frame": 2, "event": { "type": "key_up", "key": "ArrowRight" } }
            ]
        }"#;
        let script = InputScript::from_json_str(json).unwrap();

        let mut app = App::default();
        let still = {
            app.navigate("/controllable-box").unwrap();
            app.snapshot().unwrap()
        };
        let moved = script.run(&mut app, |_, _| Ok(())).unwrap();
        assert_ne!(moved, still);
        // Box starts at x=470 and moves 5 px on each of frames 0 and 1.
        assert_eq!(moved.pixel(488, 270).map(|p| p[3]), Some(255));
        assert_eq!(moved.pixel(472, 270).map(|p| p[3]), Some(0));
    }
}
