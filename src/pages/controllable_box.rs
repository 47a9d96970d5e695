use crate::{
    animation::{Animation, AnimationLoop, FrameHandle, FrameScheduler, LoopControl},
    config::ControllableBoxConfig,
    foundation::{
        core::{CanvasSize, Rect, Rgba8},
        error::PlaygroundResult,
    },
    input::{ArrowKeyMap, InputEvent},
    pages::{Page, PageCtx},
    render::surface::Surface,
    routes::Route,
};

/// A box moved by whichever arrow keys are held, one fixed step per tick.
#[derive(Clone, Debug)]
pub struct SteeredBox {
    pub x: f64,
    pub y: f64,
    pub keys: ArrowKeyMap,
    size: f64,
    step: f64,
    max_x: f64,
    max_y: f64,
    color: Rgba8,
}

impl SteeredBox {
    pub fn new(config: &ControllableBoxConfig) -> Self {
        let w = f64::from(config.canvas.width);
        let h = f64::from(config.canvas.height);
        Self {
            x: w / 2.0 - config.box_size / 2.0,
            y: h / 2.0 - config.box_size / 2.0,
            keys: ArrowKeyMap::default(),
            size: config.box_size,
            step: config.step,
            max_x: (w - config.box_size).max(0.0),
            max_y: (h - config.box_size).max(0.0),
            color: config.color,
        }
    }
}

impl Animation for SteeredBox {
    fn update(&mut self) -> LoopControl {
        if self.keys.left {
            self.x = (self.x - self.step).max(0.0);
        }
        if self.keys.right {
            self.x = (self.x + self.step).min(self.max_x);
        }
        if self.keys.up {
            self.y = (self.y - self.step).max(0.0);
        }
        if self.keys.down {
            self.y = (self.y + self.step).min(self.max_y);
        }
        LoopControl::Continue
    }

    fn draw(&self, surface: &mut dyn Surface) -> PlaygroundResult<()> {
        surface.set_fill_color(self.color);
        surface.fill_rect(Rect::from_origin_size(
            (self.x, self.y),
            (self.size, self.size),
        ));
        Ok(())
    }
}

pub struct ControllableBox {
    canvas: CanvasSize,
    animation: AnimationLoop<SteeredBox>,
}

impl ControllableBox {
    pub fn new(config: &ControllableBoxConfig) -> Self {
        Self {
            canvas: config.canvas,
            animation: AnimationLoop::new(SteeredBox::new(config)),
        }
    }

    pub fn state(&self) -> &SteeredBox {
        self.animation.animation()
    }
}

impl Page for ControllableBox {
    fn route(&self) -> Route {
        Route::ControllableBox
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
        event: &InputEvent,
        _ctx: &mut PageCtx<'_>,
    ) -> PlaygroundResult<()> {
        // Only the held-key map changes here; movement happens on the next tick.
        self.animation.animation_mut().keys.apply(event);
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
