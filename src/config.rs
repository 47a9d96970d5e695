use std::path::Path;

use crate::foundation::{
    core::{CanvasSize, Rgba8},
    error::{PlaygroundError, PlaygroundResult},
};

/// Settings for every page. Missing sections and fields fall back to the defaults below.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaygroundConfig {
    pub painter: PainterConfig,
    pub moving_box: MovingBoxConfig,
    pub controllable_box: ControllableBoxConfig,
    pub transforming: TransformingConfig,
    pub racing_car: RacingCarConfig,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PainterConfig {
    pub canvas: CanvasSize,
    pub stroke_color: Rgba8,
    pub line_width: f64,
}

impl Default for PainterConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::new(960, 540),
            stroke_color: Rgba8::BLACK,
            line_width: 2.0,
        }
    }
}

/// How the bouncing box advances each tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BounceMode {
    /// Both axes step every tick.
    #[default]
    Diagonal,
    /// x steps every tick; y steps only on the ticks where x reflects.
    Scan,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovingBoxConfig {
    pub canvas: CanvasSize,
    pub box_size: f64,
    pub step: f64,
    pub mode: BounceMode,
    pub color: Rgba8,
}

impl Default for MovingBoxConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::new(960, 540),
            box_size: 10.0,
            step: 5.0,
            mode: BounceMode::Diagonal,
            color: Rgba8::BLACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllableBoxConfig {
    pub canvas: CanvasSize,
    pub box_size: f64,
    pub step: f64,
    pub color: Rgba8,
}

impl Default for ControllableBoxConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::new(960, 540),
            box_size: 20.0,
            step: 5.0,
            color: Rgba8::BLACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformingConfig {
    pub canvas: CanvasSize,
    pub circle_radius: f64,
    pub orbit_radius: f64,
    pub angle_step: f64,
    pub color: Rgba8,
}

impl Default for TransformingConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::new(960, 540),
            circle_radius: 30.0,
            orbit_radius: 100.0,
            angle_step: 0.05,
            color: Rgba8::BLACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RacingCarConfig {
    pub canvas: CanvasSize,
    pub velocity_cap: f64,
    pub velocity_step: f64,
    pub wall_height: f64,
    pub wall_color: Rgba8,
    pub line_color: Rgba8,
    pub body_color: Rgba8,
    pub wheel_color: Rgba8,
}

impl Default for RacingCarConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::new(800, 400),
            velocity_cap: 20.0,
            velocity_step: 0.1,
            wall_height: 100.0,
            wall_color: Rgba8::rgb(0x33, 0x33, 0x33),
            line_color: Rgba8::ORANGE,
            body_color: Rgba8::BLACK,
            wheel_color: Rgba8::GRAY,
        }
    }
}

impl PlaygroundConfig {
    pub fn from_json_str(json: &str) -> PlaygroundResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> PlaygroundResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            PlaygroundError::Other(
                anyhow::Error::new(e).context(format!("read config '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> PlaygroundResult<()> {
        validate_canvas("painter", self.painter.canvas)?;
        positive("painter.line_width", self.painter.line_width)?;

        let mb = &self.moving_box;
        validate_canvas("moving_box", mb.canvas)?;
        positive("moving_box.step", mb.step)?;
        validate_box("moving_box", mb.canvas, mb.box_size)?;

        let cb = &self.controllable_box;
        validate_canvas("controllable_box", cb.canvas)?;
        positive("controllable_box.step", cb.step)?;
        validate_box("controllable_box", cb.canvas, cb.box_size)?;

        let tf = &self.transforming;
        validate_canvas("transforming", tf.canvas)?;
        positive("transforming.circle_radius", tf.circle_radius)?;
        if !(tf.orbit_radius.is_finite() && tf.orbit_radius >= 0.0) {
            return Err(PlaygroundError::validation(
                "transforming.orbit_radius must be finite and >= 0",
            ));
        }
        positive("transforming.angle_step", tf.angle_step)?;

        let rc = &self.racing_car;
        validate_canvas("racing_car", rc.canvas)?;
        positive("racing_car.velocity_cap", rc.velocity_cap)?;
        positive("racing_car.velocity_step", rc.velocity_step)?;
        if !(rc.wall_height.is_finite() && rc.wall_height >= 0.0)
            || rc.wall_height * 2.0 >= f64::from(rc.canvas.height)
        {
            return Err(PlaygroundError::validation(
                "racing_car.wall_height must leave room for the road",
            ));
        }

        Ok(())
    }
}

fn validate_canvas(section: &str, canvas: CanvasSize) -> PlaygroundResult<()> {
    canvas
        .as_u16()
        .map(|_| ())
        .map_err(|e| PlaygroundError::validation(format!("{section}.canvas: {e}")))
}

fn positive(field: &str, v: f64) -> PlaygroundResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(PlaygroundError::validation(format!(
            "{field} must be finite and > 0"
        )))
    }
}

fn validate_box(section: &str, canvas: CanvasSize, box_size: f64) -> PlaygroundResult<()> {
    positive(&format!("{section}.box_size"), box_size)?;
    if box_size > f64::from(canvas.width) || box_size > f64::from(canvas.height) {
        return Err(PlaygroundError::validation(format!(
            "{section}.box_size does not fit the canvas"
        )));
    }
    Ok(())
}
