use crate::{
    animation::{Animation, AnimationLoop, FrameHandle, FrameScheduler, LoopControl},
    config::{BounceMode, MovingBoxConfig},
    foundation::{
        core::{CanvasSize, Rect, Rgba8},
        error::PlaygroundResult,
    },
    input::InputEvent,
    pages::{Page, PageCtx},
    render::surface::Surface,
    routes::Route,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

/// One axis of the bouncing box, confined to `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axis {
    pub position: f64,
    pub direction: Direction,
    pub max: f64,
}

impl Axis {
    /// Advance by `step`. A step that would leave `[0, max]` flips the direction and lands
    /// exactly on the bound. Returns whether the axis reflected.
    pub fn advance(&mut self, step: f64) -> bool {
        let next = self.position + self.direction.sign() * step;
        if next > self.max {
            self.position = self.max;
            self.direction = Direction::Negative;
            true
        } else if next < 0.0 {
            self.position = 0.0;
            self.direction = Direction::Positive;
            true
        } else {
            self.position = next;
            false
        }
    }
}

#[derive(Clone, Debug)]
pub struct BouncingBox {
    pub x: Axis,
    pub y: Axis,
    size: f64,
    step: f64,
    mode: BounceMode,
    color: Rgba8,
}

impl BouncingBox {
    pub fn new(config: &MovingBoxConfig) -> Self {
        let max = |extent: u32| (f64::from(extent) - config.box_size).max(0.0);
        Self {
            x: Axis {
                position: 0.0,
                direction: Direction::Positive,
                max: max(config.canvas.width),
            },
            y: Axis {
                position: 0.0,
                direction: Direction::Positive,
                max: max(config.canvas.height),
            },
            size: config.box_size,
            step: config.step,
            mode: config.mode,
            color: config.color,
        }
    }
}

impl Animation for BouncingBox {
    fn update(&mut self) -> LoopControl {
        let x_reflected = self.x.advance(self.step);
        match self.mode {
            BounceMode::Diagonal => {
                self.y.advance(self.step);
            }
            BounceMode::Scan => {
                if x_reflected {
                    self.y.advance(self.step);
                }
            }
        }
        LoopControl::Continue
    }

    fn draw(&self, surface: &mut dyn Surface) -> PlaygroundResult<()> {
        surface.set_fill_color(self.color);
        surface.fill_rect(Rect::from_origin_size(
            (self.x.position, self.y.position),
            (self.size, self.size),
        ));
        Ok(())
    }
}

pub struct MovingBox {
    canvas: CanvasSize,
    animation: AnimationLoop<BouncingBox>,
}

impl MovingBox {
    pub fn new(config: &MovingBoxConfig) -> Self {
        Self {
            canvas: config.canvas,
            animation: AnimationLoop::new(BouncingBox::new(config)),
        }
    }

    pub fn state(&self) -> &BouncingBox {
        self.animation.animation()
    }
}

impl Page for MovingBox {
    fn route(&self) -> Route {
        Route::MovingBox
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
