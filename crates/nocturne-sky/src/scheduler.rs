//! The frame loop: one shared clock that advances and renders the sky.

use log::{error, info, warn};
use nocturne_core::{SkyError, SkyParams, Viewport};
use rand::{SeedableRng, rngs::StdRng};

use crate::input::SkyEvent;
use crate::particles::ParticleStore;
use crate::pointer::PointerTracker;
use crate::render::{Surface, draw_frame};
use crate::viewport::ViewportController;

/// Handle for a frame callback requested from a [`FrameHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// The host's per-frame callback mechanism.
///
/// `request_frame` asks for [`Scheduler::on_frame`] to be invoked with the
/// returned request at the next display frame; `cancel_frame` withdraws it.
pub trait FrameHost {
    fn request_frame(&mut self) -> FrameRequest;
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Lifecycle of a [`Scheduler`]. There is no way back from `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Stopped,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// State advanced and the frame was drawn.
    Rendered,
    /// State advanced but drawing failed; the next frame is still scheduled.
    Degraded,
    /// The scheduler is stopped and nothing happened.
    Stopped,
}

/// Drives the starfield: owns the particles, viewport, pointer and surface
/// and advances them once per host frame.
#[derive(Debug)]
pub struct Scheduler<S, H> {
    state: SchedulerState,
    surface: S,
    host: H,
    viewport: ViewportController,
    pointer: PointerTracker,
    store: ParticleStore,
    /// The frame callback this scheduler is waiting on.
    pending: Option<FrameRequest>,
    /// Ticks run so far.
    frames: u64,
}

impl<S: Surface, H: FrameHost> Scheduler<S, H> {
    /// Build the sky for `surface` and request the first frame.
    ///
    /// Refuses to start without a surface or with a zero-sized one.
    pub fn initialize(surface: Option<S>, mut host: H, params: SkyParams) -> Result<Self, SkyError> {
        let Some(surface) = surface else {
            error!("starfield not started: {}", SkyError::MissingSurface);
            return Err(SkyError::MissingSurface);
        };
        let (width, height) = surface.size();
        let viewport = Viewport::new(width, height).inspect_err(|err| {
            error!("starfield not started: {err}");
        })?;

        let viewport = ViewportController::new(viewport);
        let pointer = PointerTracker::new(params.parallax_x, params.parallax_y, params.easing);
        let rng = seeded_rng(params.seed);
        let store = ParticleStore::new(params, rng, viewport.viewport(), viewport.band());
        let pending = Some(host.request_frame());

        info!("starfield started on {width}x{height} surface");
        Ok(Self {
            state: SchedulerState::Running,
            surface,
            host,
            viewport,
            pointer,
            store,
            pending,
            frames: 0,
        })
    }

    /// Host callback entry point.
    ///
    /// Runs a tick only for the request this scheduler is waiting on, so a
    /// callback that was already queued when [`destroy`](Self::destroy) ran
    /// is ignored.
    pub fn on_frame(&mut self, request: FrameRequest) -> Option<TickOutcome> {
        if self.state != SchedulerState::Running || self.pending != Some(request) {
            return None;
        }
        self.pending = None;
        Some(self.tick())
    }

    /// Advance and draw one frame, then schedule the next one.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state == SchedulerState::Stopped {
            return TickOutcome::Stopped;
        }

        let cleared = self.surface.clear();
        self.pointer.step();
        self.store.advance_frame();
        let drawn = cleared.and_then(|()| {
            draw_frame(
                &mut self.surface,
                &self.store,
                self.viewport.band(),
                &self.pointer,
            )
        });
        self.frames += 1;

        let outcome = match drawn {
            Ok(()) => TickOutcome::Rendered,
            Err(err) => {
                warn!("frame {} skipped: {err}", self.frames);
                TickOutcome::Degraded
            }
        };

        if let Some(stale) = self.pending.take() {
            self.host.cancel_frame(stale);
        }
        self.pending = Some(self.host.request_frame());
        outcome
    }

    /// Deliver a pointer or resize event.
    ///
    /// Anomalous input is dropped and leaves the sky untouched.
    pub fn handle(&mut self, event: SkyEvent) -> Result<(), SkyError> {
        if self.state == SchedulerState::Stopped {
            return Err(SkyError::Stopped);
        }
        match event {
            SkyEvent::PointerMoved { x, y } => {
                let viewport = self.viewport.viewport();
                self.pointer
                    .update_pointer(x, y, viewport.width(), viewport.height());
                Ok(())
            }
            SkyEvent::Resized { width, height } => self
                .viewport
                .resize(width, height, &mut self.store)
                .inspect_err(|err| warn!("ignoring resize: {err}")),
        }
    }

    /// Regenerate the sky from a new random source.
    pub fn reseed(&mut self, seed: Option<u64>) -> Result<(), SkyError> {
        if self.state == SchedulerState::Stopped {
            return Err(SkyError::Stopped);
        }
        self.store.reseed(seeded_rng(seed));
        self.store
            .repopulate(self.viewport.viewport(), self.viewport.band());
        Ok(())
    }

    /// Stop for good, cancelling any frame callback already requested.
    pub fn destroy(&mut self) {
        if self.state == SchedulerState::Stopped {
            return;
        }
        self.state = SchedulerState::Stopped;
        if let Some(request) = self.pending.take() {
            self.host.cancel_frame(request);
        }
        info!("starfield stopped after {} frames", self.frames);
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
