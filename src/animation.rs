//! Per-frame callbacks for page animations.
//!
//! [`FrameScheduler`] is the request/cancel primitive a page owns for its lifetime: a
//! request made during frame N is delivered in frame N+1, and cancelled requests are never
//! delivered. [`AnimationLoop`] builds the shared "clear, update, draw, schedule next"
//! shape on top of it.

use std::collections::BTreeSet;

use crate::{
    foundation::{core::FrameIndex, error::PlaygroundResult},
    render::surface::Surface,
};

/// Identifies one outstanding frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: BTreeSet<FrameHandle>,
    frame: FrameIndex,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(handle);
        handle
    }

    /// Revoke a request. Returns `false` if it was already delivered or cancelled.
    pub fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        self.pending.remove(&handle)
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of frames delivered so far.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Start a new frame and take every request made before it, in request order.
    pub fn begin_frame(&mut self) -> Vec<FrameHandle> {
        self.frame = self.frame.next();
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

/// Whether an animation wants another tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// State that advances once per tick and knows how to draw itself.
pub trait Animation {
    fn update(&mut self) -> LoopControl;
    fn draw(&self, surface: &mut dyn Surface) -> PlaygroundResult<()>;
}

/// Drives an [`Animation`] with at most one outstanding frame request.
#[derive(Debug)]
pub struct AnimationLoop<A> {
    animation: A,
    pending: Option<FrameHandle>,
    ticks: u64,
}

impl<A: Animation> AnimationLoop<A> {
    pub fn new(animation: A) -> Self {
        Self {
            animation,
            pending: None,
            ticks: 0,
        }
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn animation_mut(&mut self) -> &mut A {
        &mut self.animation
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Schedule the next tick unless one is already outstanding.
    pub fn start(&mut self, scheduler: &mut FrameScheduler) {
        if self.pending.is_none() {
            self.pending = Some(scheduler.request_frame());
            tracing::debug!(handle = ?self.pending, "animation loop started");
        }
    }

    pub fn stop(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
            tracing::debug!(?handle, "animation loop stopped");
        }
    }

    /// Run one tick immediately: clear, update, draw, then schedule the next tick if the
    /// animation wants one. Any outstanding request is replaced.
    pub fn tick(
        &mut self,
        surface: &mut dyn Surface,
        scheduler: &mut FrameScheduler,
    ) -> PlaygroundResult<LoopControl> {
        self.stop(scheduler);

        surface.clear()?;
        let control = self.animation.update();
        self.animation.draw(surface)?;
        self.ticks += 1;
        tracing::trace!(ticks = self.ticks, ?control, "animation tick");

        if control == LoopControl::Continue {
            self.pending = Some(scheduler.request_frame());
        }
        Ok(control)
    }

    /// Deliver a frame from [`FrameScheduler::begin_frame`]. Handles that are not this loop's
    /// outstanding request are ignored; returns whether a tick ran.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        surface: &mut dyn Surface,
        scheduler: &mut FrameScheduler,
    ) -> PlaygroundResult<bool> {
        if self.pending != Some(handle) {
            return Ok(false);
        }
        self.pending = None;
        self.tick(surface, scheduler)?;
        Ok(true)
    }

    /// Clear and draw the current state without advancing it.
    pub fn redraw(&self, surface: &mut dyn Surface) -> PlaygroundResult<()> {
        surface.clear()?;
        self.animation.draw(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foundation::core::{CanvasSize, Rect},
        render::cpu::CpuSurface,
    };

    struct Counter {
        value: u32,
        stop_at: u32,
    }

    impl Animation for Counter {
        fn update(&mut self) -> LoopControl {
            self.value += 1;
            if self.value >= self.stop_at {
                LoopControl::Stop
            } else {
                LoopControl::Continue
            }
        }

        fn draw(&self, surface: &mut dyn Surface) -> PlaygroundResult<()> {
            surface.fill_rect(Rect::new(f64::from(self.value), 0.0, 1.0 + f64::from(self.value), 1.0));
            Ok(())
        }
    }

    fn run_frame(
        lp: &mut AnimationLoop<Counter>,
        surface: &mut CpuSurface,
        sched: &mut FrameScheduler,
    ) -> usize {
        let mut ran = 0;
        for h in sched.begin_frame() {
            if lp.on_frame(h, surface, sched).unwrap() {
                ran += 1;
            }
        }
        ran
    }

    #[test]
    fn scheduler_delivers_requests_once_and_skips_cancelled() {
        let mut s = FrameScheduler::new();
        let a = s.request_frame();
        let b = s.request_frame();
        assert!(s.cancel_frame(b));
        assert!(!s.cancel_frame(b));

        assert_eq!(s.begin_frame(), vec![a]);
        assert!(s.begin_frame().is_empty());
        assert_eq!(s.frame(), FrameIndex(2));
    }

    #[test]
    fn loop_ticks_once_per_frame_and_keeps_one_request() {
        let mut surface = CpuSurface::new(CanvasSize::new(16, 4)).unwrap();
        let mut sched = FrameScheduler::new();
        let mut lp = AnimationLoop::new(Counter {
            value: 0,
            stop_at: 100,
        });

        lp.start(&mut sched);
        lp.start(&mut sched);
        assert_eq!(sched.pending_len(), 1);

        for _ in 0..3 {
            assert_eq!(run_frame(&mut lp, &mut surface, &mut sched), 1);
            assert_eq!(sched.pending_len(), 1);
        }
        assert_eq!(lp.animation().value, 3);
        assert_eq!(lp.ticks(), 3);
    }

    #[test]
    fn loop_clears_before_drawing() {
        let mut surface = CpuSurface::new(CanvasSize::new(16, 4)).unwrap();
        let mut sched = FrameScheduler::new();
        let mut lp = AnimationLoop::new(Counter {
            value: 0,
            stop_at: 100,
        });
        lp.start(&mut sched);
        run_frame(&mut lp, &mut surface, &mut sched);
        run_frame(&mut lp, &mut surface, &mut sched);

        let snap = surface.snapshot().unwrap();
        assert_eq!(snap.pixel(1, 0).map(|p| p[3]), Some(0));
        assert_eq!(snap.pixel(2, 0).map(|p| p[3]), Some(255));
    }

    #[test]
    fn stop_control_ends_the_chain() {
        let mut surface = CpuSurface::new(CanvasSize::new(16, 4)).unwrap();
        let mut sched = FrameScheduler::new();
        let mut lp = AnimationLoop::new(Counter {
            value: 0,
            stop_at: 2,
        });
        lp.start(&mut sched);
        run_frame(&mut lp, &mut surface, &mut sched);
        assert!(lp.is_running());
        run_frame(&mut lp, &mut surface, &mut sched);
        assert!(!lp.is_running());
        assert_eq!(run_frame(&mut lp, &mut surface, &mut sched), 0);
        assert_eq!(lp.animation().value, 2);
    }

    #[test]
    fn stop_cancels_the_outstanding_request() {
        let mut sched = FrameScheduler::new();
        let mut lp = AnimationLoop::new(Counter {
            value: 0,
            stop_at: 100,
        });
        lp.start(&mut sched);
        let handle = lp.pending().unwrap();
        lp.stop(&mut sched);
        assert!(!sched.is_pending(handle));
        assert_eq!(sched.pending_len(), 0);
    }

    #[test]
    fn stale_handles_are_ignored() {
        let mut surface = CpuSurface::new(CanvasSize::new(16, 4)).unwrap();
        let mut sched = FrameScheduler::new();
        let mut lp = AnimationLoop::new(Counter {
            value: 0,
            stop_at: 100,
        });
        let foreign = sched.request_frame();
        assert!(!lp.on_frame(foreign, &mut surface, &mut sched).unwrap());
        assert_eq!(lp.animation().value, 0);
    }
}
