//! Tunable starfield parameters.

use serde::{Deserialize, Serialize};

/// Tunable constants for populations, spawning and parallax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyParams {
    /// Number of drifting background stars.
    pub ambient_count: usize,
    /// Number of static galactic band stars.
    pub band_count: usize,
    /// Per-frame probability of spawning a shooting star.
    pub spawn_probability: f64,
    /// Cap on simultaneously live shooting stars.
    pub max_concurrent_shooting_stars: usize,
    /// Constant rightward pan added to every ambient star each frame.
    pub drift_speed: f64,
    /// Fraction of the remaining distance the parallax offset closes per frame.
    pub easing: f64,
    /// Horizontal parallax offset at full pointer deflection.
    pub parallax_x: f64,
    /// Vertical parallax offset at full pointer deflection.
    pub parallax_y: f64,
    /// Radius around the pointer inside which stars fade.
    pub hover_radius: f64,
    /// Parallax depth factor for ambient stars.
    pub ambient_depth: f64,
    /// Parallax depth factor for band stars.
    pub band_depth: f64,
    /// Fixed seed for the random source. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            ambient_count: 400,
            band_count: 300,
            spawn_probability: 0.008,
            max_concurrent_shooting_stars: 1,
            drift_speed: 0.00005,
            easing: 0.05,
            parallax_x: 50.0,
            parallax_y: 30.0,
            hover_radius: 150.0,
            ambient_depth: 0.3,
            band_depth: 0.2,
            seed: None,
        }
    }
}
