//! Starfield animation engine for the nocturne terminal sky.
//!
//! This crate owns the particle populations (ambient stars, galactic band
//! stars and shooting stars), the viewport and pointer state feeding them,
//! and the scheduler that advances and renders everything once per frame.
//! Drawing goes through the [`Surface`] trait; [`CellCanvas`] implements it
//! on a grid of terminal cells.

mod canvas;
mod chars;
mod input;
mod particles;
mod pointer;
mod render;
mod scheduler;
mod viewport;

pub use canvas::CellCanvas;
pub use input::{Debounce, SkyEvent};
pub use particles::{
    AmbientStar, BandStar, FrameReport, ParticleStore, ShootingStar, create_ambient_star,
    create_band_star, create_shooting_star, spectral_color,
};
pub use pointer::PointerTracker;
pub use render::{BandGlow, GradientStop, Streak, Surface, draw_frame};
pub use scheduler::{FrameHost, FrameRequest, Scheduler, SchedulerState, TickOutcome};
pub use viewport::{BandGeometry, ViewportController};
