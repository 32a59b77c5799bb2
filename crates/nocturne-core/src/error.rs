//! Error types for the starfield engine.

use thiserror::Error;

/// Errors raised while setting up or driving the starfield.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkyError {
    /// No rendering surface was supplied at initialization.
    #[error("no rendering surface available")]
    MissingSurface,
    /// Viewport dimensions must be positive and finite.
    #[error("invalid viewport dimensions {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
    /// The scheduler has been destroyed.
    #[error("scheduler has been destroyed")]
    Stopped,
}

/// Errors raised by a rendering surface while drawing a frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A draw call received a NaN or infinite coordinate.
    #[error("non-finite coordinate in draw call")]
    NonFinite,
    /// The surface can no longer be drawn to.
    #[error("rendering surface lost: {0}")]
    SurfaceLost(String),
}
