//! Core types shared across the nocturne crates.

mod color;
mod error;
mod geometry;
mod params;

pub use color::Rgb;
pub use error::{RenderError, SkyError};
pub use geometry::{Point, Viewport};
pub use params::SkyParams;
