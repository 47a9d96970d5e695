use crate::{
    animation::FrameScheduler,
    config::PlaygroundConfig,
    foundation::{
        core::FrameIndex,
        error::{PlaygroundError, PlaygroundResult},
    },
    input::{ControlState, InputEvent},
    pages::{self, Page, PageCtx},
    render::{cpu::CpuSurface, snapshot::Snapshot, surface::Surface},
    routes::{self, APP_TITLE, MenuItem, Route},
};

/// The application shell: owns the mounted page, its canvas and its frame scheduler.
///
/// At most one page is mounted. Navigating always builds a fresh page instance on a fresh
/// surface, so no page state survives a round trip through another route.
pub struct App {
    config: PlaygroundConfig,
    title: String,
    mounted: Option<Mounted>,
}

struct Mounted {
    page: Box<dyn Page>,
    surface: CpuSurface,
    scheduler: FrameScheduler,
}

impl Mounted {
    fn ctx(&mut self) -> (&mut Box<dyn Page>, PageCtx<'_>) {
        (
            &mut self.page,
            PageCtx {
                surface: &mut self.surface,
                scheduler: &mut self.scheduler,
            },
        )
    }
}

impl App {
    pub fn new(config: PlaygroundConfig) -> PlaygroundResult<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: PlaygroundConfig) -> Self {
        Self {
            config,
            title: APP_TITLE.to_string(),
            mounted: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn menu(&self) -> Vec<MenuItem> {
        routes::menu()
    }

    pub fn current_route(&self) -> Option<Route> {
        self.mounted.as_ref().map(|m| m.page.route())
    }

    /// Mount the page for `path`. If the path is unknown or the new page fails to mount, the
    /// error is returned and the current page stays mounted and untouched.
    #[tracing::instrument(skip(self))]
    pub fn navigate(&mut self, path: &str) -> PlaygroundResult<Route> {
        let route = Route::resolve(path)?;

        let mut page = pages::create(route, &self.config);
        let mut surface = CpuSurface::new(page.canvas())?;
        let mut scheduler = FrameScheduler::new();
        page.mount(&mut PageCtx {
            surface: &mut surface,
            scheduler: &mut scheduler,
        })?;

        self.unmount();
        self.title = route.title();
        self.mounted = Some(Mounted {
            page,
            surface,
            scheduler,
        });
        tracing::info!(%route, title = %self.title, "page mounted");
        Ok(route)
    }

    /// Cancel the page's pending frames and drop it.
    pub fn unmount(&mut self) {
        if let Some(mut m) = self.mounted.take() {
            m.page.unmount(&mut m.scheduler);
            tracing::debug!(route = %m.page.route(), "page unmounted");
        }
    }

    /// Deliver an input event to the mounted page. Events with no page mounted are dropped.
    pub fn dispatch(&mut self, event: &InputEvent) -> PlaygroundResult<()> {
        let Some(m) = self.mounted.as_mut() else {
            tracing::debug!(?event, "input dropped: no page mounted");
            return Ok(());
        };
        let (page, mut ctx) = m.ctx();
        page.handle_input(event, &mut ctx)
    }

    /// Advance one display frame, delivering every request made before it. Returns the
    /// number of callbacks that ran.
    #[tracing::instrument(skip(self), level = "trace")]
    pub fn frame(&mut self) -> PlaygroundResult<usize> {
        let Some(m) = self.mounted.as_mut() else {
            return Ok(0);
        };
        let due = m.scheduler.begin_frame();
        let delivered = due.len();
        for handle in due {
            let (page, mut ctx) = m.ctx();
            page.on_frame(handle, &mut ctx)?;
        }
        Ok(delivered)
    }

    pub fn frame_index(&self) -> Option<FrameIndex> {
        self.mounted.as_ref().map(|m| m.scheduler.frame())
    }

    pub fn pending_frames(&self) -> usize {
        self.mounted
            .as_ref()
            .map_or(0, |m| m.scheduler.pending_len())
    }

    pub fn controls(&self) -> Vec<ControlState> {
        self.mounted
            .as_ref()
            .map(|m| m.page.controls())
            .unwrap_or_default()
    }

    /// Current pixels of the mounted page's canvas.
    pub fn snapshot(&mut self) -> PlaygroundResult<Snapshot> {
        match self.mounted.as_mut() {
            Some(m) => m.surface.snapshot(),
            None => Err(PlaygroundError::routing("no page mounted")),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::with_valid_config(PlaygroundConfig::default())
    }
}
