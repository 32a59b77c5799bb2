//! Particle records and their lifecycle.

mod factory;
mod store;

use nocturne_core::Rgb;

pub use factory::{create_ambient_star, create_band_star, create_shooting_star, spectral_color};
pub use store::{FrameReport, ParticleStore};

/// A drifting background star.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientStar {
    /// Position in canvas pixels.
    pub x: f64,
    pub y: f64,
    /// Radius in pixels (0.1-1.2).
    pub radius: f64,
    /// Opacity before flicker is applied (0.3-1.0).
    pub base_opacity: f64,
    /// Running angle fed into the flicker sine.
    pub flicker_phase: f64,
    /// Phase advance per frame.
    pub flicker_speed: f64,
    /// Drift velocity in pixels per frame.
    pub vx: f64,
    pub vy: f64,
    /// Spectral color, fixed at creation.
    pub color: Rgb,
    /// Draw a faint halo around this star.
    pub glow: bool,
}

/// A star placed once inside the galactic band. Only its flicker changes.
#[derive(Debug, Clone, PartialEq)]
pub struct BandStar {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub base_opacity: f64,
    pub flicker_phase: f64,
    pub flicker_speed: f64,
    pub color: Rgb,
    pub glow: bool,
}

/// A transient streak crossing the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    /// Store-assigned identifier, unique for the lifetime of a store.
    pub id: u64,
    /// Head position in canvas pixels.
    pub x: f64,
    pub y: f64,
    /// Pixels travelled per frame.
    pub speed: f64,
    /// Direction of travel in radians.
    pub angle: f64,
    /// Trail length in pixels.
    pub length: f64,
    /// Frames lived so far.
    pub life: u32,
    /// Frames after which the star is retired.
    pub max_life: f64,
    pub color: Rgb,
}

impl ShootingStar {
    /// Whether the star has outlived its maximum life.
    pub fn is_expired(&self) -> bool {
        self.life as f64 > self.max_life
    }
}
