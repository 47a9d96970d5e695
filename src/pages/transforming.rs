use std::f64::consts::TAU;

use crate::{
    animation::{Animation, AnimationLoop, FrameHandle, FrameScheduler, LoopControl},
    config::TransformingConfig,
    foundation::{
        core::{CanvasSize, Point, Rgba8},
        error::PlaygroundResult,
    },
    input::InputEvent,
    pages::{Page, PageCtx},
    render::surface::Surface,
    routes::Route,
};

/// A filled circle orbiting the canvas center, drawn through translate + rotate.
#[derive(Clone, Debug)]
pub struct Orbit {
    pub angle: f64,
    step: f64,
    radius: f64,
    orbit: f64,
    center: Point,
    color: Rgba8,
}

impl Orbit {
    pub fn new(config: &TransformingConfig) -> Self {
        Self {
            angle: 0.0,
            step: config.angle_step,
            radius: config.circle_radius,
            orbit: config.orbit_radius,
            center: config.canvas.rect().center(),
            color: config.color,
        }
    }
}

impl Animation for Orbit {
    fn update(&mut self) -> LoopControl {
        self.angle += self.step;
        LoopControl::Continue
    }

    fn draw(&self, surface: &mut dyn Surface) -> PlaygroundResult<()> {
        surface.save();
        surface.set_fill_color(self.color);
        surface.translate(self.center.x, self.center.y);
        surface.rotate(self.angle);
        surface.begin_path();
        surface.arc(self.orbit, 0.0, self.radius, 0.0, TAU);
        surface.fill();
        surface.restore();
        Ok(())
    }
}

pub struct Transforming {
    canvas: CanvasSize,
    animation: AnimationLoop<Orbit>,
}

impl Transforming {
    pub fn new(config: &TransformingConfig) -> Self {
        Self {
            canvas: config.canvas,
            animation: AnimationLoop::new(Orbit::new(config)),
        }
    }

    pub fn state(&self) -> &Orbit {
        self.animation.animation()
    }
}

impl Page for Transforming {
    fn route(&self) -> Route {
        Route::Transforming
    }

    fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    fn mount(&mut self, ctx: &mut PageCtx<'_>) -> PlaygroundResult<()> {
        self.animation.redraw(ctx.surface)?;
        self.animation.start(ctx.scheduler);
        Ok(())
    }

    fn handle_input(
        &mut self,
        _event: &InputEvent,
        _ctx: &mut PageCtx<'_>,
    ) -> PlaygroundResult<()> {
        Ok(())
    }

    fn on_frame(&mut self, handle: FrameHandle, ctx: &mut PageCtx<'_>) -> PlaygroundResult<()> {
        self.animation.on_frame(handle, ctx.surface, ctx.scheduler)?;
        Ok(())
    }

    fn unmount(&mut self, scheduler: &mut FrameScheduler) {
        self.animation.stop(scheduler);
        scheduler.cancel_all();
    }
}
