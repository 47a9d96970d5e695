//! The demo pages. Each page instance owns all of its state; the shell creates a fresh
//! instance on every mount and drops it on unmount.

pub mod controllable_box;
pub mod moving_box;
pub mod painter;
pub mod racing_car;
pub mod transforming;

use crate::{
    animation::{FrameHandle, FrameScheduler},
    config::PlaygroundConfig,
    foundation::{core::CanvasSize, error::PlaygroundResult},
    input::{ControlState, InputEvent},
    render::surface::Surface,
    routes::Route,
};

/// Borrowed resources a mounted page draws and schedules with.
pub struct PageCtx<'a> {
    pub surface: &'a mut dyn Surface,
    pub scheduler: &'a mut FrameScheduler,
}

pub trait Page {
    fn route(&self) -> Route;

    /// Size of the canvas the shell must allocate for this page.
    fn canvas(&self) -> CanvasSize;

    /// Draw the initial state and start any animation.
    fn mount(&mut self, ctx: &mut PageCtx<'_>) -> PlaygroundResult<()>;

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut PageCtx<'_>)
    -> PlaygroundResult<()>;

    /// Deliver one due frame request.
    fn on_frame(&mut self, handle: FrameHandle, ctx: &mut PageCtx<'_>) -> PlaygroundResult<()>;

    fn controls(&self) -> Vec<ControlState> {
        Vec::new()
    }

    /// Stop every scheduled callback. The page is dropped right after.
    fn unmount(&mut self, scheduler: &mut FrameScheduler) {
        scheduler.cancel_all();
    }
}

pub fn create(route: Route, config: &PlaygroundConfig) -> Box<dyn Page> {
    match route {
        Route::Painter => Box::new(painter::Painter::new(config.painter.clone())),
        Route::MovingBox => Box::new(moving_box::MovingBox::new(&config.moving_box)),
        Route::ControllableBox => Box::new(controllable_box::ControllableBox::new(
            &config.controllable_box,
        )),
        Route::Transforming => Box::new(transforming::Transforming::new(&config.transforming)),
        Route::RacingCar => Box::new(racing_car::RacingCar::new(&config.racing_car)),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::render::cpu::CpuSurface;

    /// A page mounted on its own CPU surface, driven frame by frame.
    pub(crate) struct Harness<P> {
        pub(crate) page: P,
        pub(crate) surface: CpuSurface,
        pub(crate) scheduler: FrameScheduler,
    }

    impl<P: Page> Harness<P> {
        pub(crate) fn mount(mut page: P) -> Self {
            let mut surface = CpuSurface::new(page.canvas()).unwrap();
            let mut scheduler = FrameScheduler::new();
            page.mount(&mut PageCtx {
                surface: &mut surface,
                scheduler: &mut scheduler,
            })
            .unwrap();
            Self {
                page,
                surface,
                scheduler,
            }
        }

        pub(crate) fn input(&mut self, event: InputEvent) {
            self.page
                .handle_input(
                    &event,
                    &mut PageCtx {
                        surface: &mut self.surface,
                        scheduler: &mut self.scheduler,
                    },
                )
                .unwrap();
        }

        pub(crate) fn frame(&mut self) {
            for handle in self.scheduler.begin_frame() {
                self.page
                    .on_frame(
                        handle,
                        &mut PageCtx {
                            surface: &mut self.surface,
                            scheduler: &mut self.scheduler,
                        },
                    )
                    .unwrap();
            }
        }

        pub(crate) fn frames(&mut self, n: usize) {
            for _ in 0..n {
                self.frame();
            }
        }
    }
}
