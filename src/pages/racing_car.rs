//! A car on a scrolling road. Holding the pointer down accelerates, releasing it brakes.
//!
//! Accelerating and braking are two modes of one [`AnimationLoop`]: switching mode replaces
//! the outstanding frame request, so the two chains never run at the same time.

use crate::{
    animation::{Animation, AnimationLoop, FrameHandle, FrameScheduler, LoopControl},
    config::RacingCarConfig,
    foundation::{
        core::{CanvasSize, Rect},
        error::PlaygroundResult,
    },
    input::InputEvent,
    pages::{Page, PageCtx},
    render::surface::Surface,
    routes::Route,
};

const LINE_GAP: f64 = 10.0;
const LINE_WIDTH: f64 = 5.0;
const CENTER_DASH: [f64; 2] = [15.0, 20.0];

const CAR_X: f64 = 30.0;
const BODY_WIDTH: f64 = 40.0;
const BODY_HEIGHT: f64 = 20.0;
const WHEEL_GAP: f64 = 3.0;
const WHEEL_WIDTH: f64 = 15.0;
const WHEEL_HEIGHT: f64 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Throttle {
    #[default]
    Idle,
    Accelerate,
    Brake,
}

#[derive(Clone, Debug)]
pub struct Car {
    pub velocity: f64,
    /// Road scroll in pixels, always in `[0, width)`.
    pub offset: f64,
    pub throttle: Throttle,
    config: RacingCarConfig,
}

impl Car {
    pub fn new(config: &RacingCarConfig) -> Self {
        Self {
            velocity: 0.0,
            offset: 0.0,
            throttle: Throttle::Idle,
            config: config.clone(),
        }
    }

    fn width(&self) -> f64 {
        f64::from(self.config.canvas.width)
    }

    fn height(&self) -> f64 {
        f64::from(self.config.canvas.height)
    }

    fn advance_road(&mut self) {
        self.offset = (self.offset + self.velocity).floor().rem_euclid(self.width());
    }

    fn draw_walls(&self, surface: &mut dyn Surface) {
        let (w, h, wall) = (self.width(), self.height(), self.config.wall_height);
        surface.set_fill_color(self.config.wall_color);
        surface.fill_rect(Rect::new(0.0, 0.0, w, wall));
        surface.fill_rect(Rect::new(0.0, h - wall, w, h));
    }

    fn draw_boundary_lines(&self, surface: &mut dyn Surface) {
        let (w, h) = (self.width(), self.height());
        let top = self.config.wall_height + LINE_GAP;
        let bottom = h - top;

        surface.save();
        surface.set_stroke_color(self.config.line_color);
        surface.set_line_width(LINE_WIDTH);
        surface.begin_path();
        surface.move_to(0.0, top);
        surface.line_to(w, top);
        surface.move_to(0.0, bottom);
        surface.line_to(w, bottom);
        surface.stroke();
        surface.restore();
    }

    fn draw_center_line(&self, surface: &mut dyn Surface) {
        let (w, h) = (self.width(), self.height());

        surface.save();
        surface.set_stroke_color(self.config.line_color);
        surface.set_line_width(LINE_WIDTH);
        surface.set_line_dash(&CENTER_DASH);
        surface.translate(-self.offset, 0.0);
        surface.begin_path();
        // Twice the width so the scrolled line still spans the canvas.
        surface.move_to(0.0, h / 2.0);
        surface.line_to(w * 2.0, h / 2.0);
        surface.stroke();
        surface.restore();
    }

    fn draw_body(&self, surface: &mut dyn Surface) {
        surface.set_fill_color(self.config.body_color);
        surface.fill_rect(Rect::from_origin_size(
            (CAR_X, self.height() / 2.0 - BODY_HEIGHT / 2.0),
            (BODY_WIDTH, BODY_HEIGHT),
        ));
    }

    fn draw_wheels(&self, surface: &mut dyn Surface) {
        let mid = self.height() / 2.0;
        let above = mid - BODY_HEIGHT / 2.0 - WHEEL_GAP - WHEEL_HEIGHT;
        let below = mid + BODY_HEIGHT / 2.0 + WHEEL_GAP;

        surface.set_fill_color(self.config.wheel_color);
        for x in [CAR_X, CAR_X + BODY_WIDTH - WHEEL_WIDTH] {
            for y in [above, below] {
                surface.fill_rect(Rect::from_origin_size((x, y), (WHEEL_WIDTH, WHEEL_HEIGHT)));
            }
        }
    }
}

impl Animation for Car {
    fn update(&mut self) -> LoopControl {
        match self.throttle {
            Throttle::Idle => return LoopControl::Stop,
            Throttle::Accelerate => {
                self.velocity = (self.velocity + self.config.velocity_step)
                    .min(self.config.velocity_cap);
            }
            Throttle::Brake => {
                if self.velocity <= 0.0 {
                    self.throttle = Throttle::Idle;
                    return LoopControl::Stop;
                }
                self.velocity = (self.velocity - self.config.velocity_step).max(0.0);
            }
        }
        self.advance_road();
        LoopControl::Continue
    }

    fn draw(&self, surface: &mut dyn Surface) -> PlaygroundResult<()> {
        surface.save();
        self.draw_walls(surface);
        self.draw_boundary_lines(surface);
        self.draw_center_line(surface);
        self.draw_body(surface);
        self.draw_wheels(surface);
        surface.restore();
        Ok(())
    }
}

pub struct RacingCar {
    canvas: CanvasSize,
    animation: AnimationLoop<Car>,
}

impl RacingCar {
    pub fn new(config: &RacingCarConfig) -> Self {
        Self {
            canvas: config.canvas,
            animation: AnimationLoop::new(Car::new(config)),
        }
    }

    pub fn car(&self) -> &Car {
        self.animation.animation()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.animation.pending()
    }

    fn switch(&mut self, throttle: Throttle, ctx: &mut PageCtx<'_>) -> PlaygroundResult<()> {
        if self.car().throttle == throttle {
            return Ok(());
        }
        self.animation.animation_mut().throttle = throttle;
        tracing::debug!(?throttle, velocity = self.car().velocity, "throttle changed");
        // Runs the first tick now and replaces the other mode's pending request.
        self.animation.tick(ctx.surface, ctx.scheduler)?;
        Ok(())
    }
}

impl Page for RacingCar {
    fn route(&self) -> Route {
        Route::RacingCar
    }

    fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    fn mount(&mut self, ctx: &mut PageCtx<'_>) -> PlaygroundResult<()> {
        self.animation.redraw(ctx.surface)
    }

    fn handle_input(
        &mut self,
        event: &InputEvent,
        ctx: &mut PageCtx<'_>,
    ) -> PlaygroundResult<()> {
        match event {
            InputEvent::PointerDown { .. } => self.switch(Throttle::Accelerate, ctx),
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                if self.car().throttle == Throttle::Accelerate {
                    self.switch(Throttle::Brake, ctx)
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
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
