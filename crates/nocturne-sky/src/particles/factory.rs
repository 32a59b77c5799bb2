//! Fresh particle records for each population.
//!
//! Every constructor is a pure function of its random source and geometry,
//! so a seeded RNG reproduces the same sky.

use std::f64::consts::{PI, TAU};

use nocturne_core::{Rgb, Viewport};
use rand::Rng;

use super::{AmbientStar, BandStar, ShootingStar};
use crate::viewport::BandGeometry;

/// Spectral classes as (inclusive upper bound, color), hottest first.
const SPECTRAL_CLASSES: [(f64, Rgb); 7] = [
    (0.01, Rgb::new(155, 176, 255)), // O - blue-white
    (0.1, Rgb::new(170, 200, 255)),  // B
    (0.3, Rgb::new(235, 240, 255)),  // A
    (0.5, Rgb::new(255, 245, 220)),  // F
    (0.7, Rgb::new(255, 230, 180)),  // G
    (0.9, Rgb::new(255, 190, 120)),  // K
    (1.0, Rgb::new(255, 120, 100)),  // M - red-orange
];

/// Curvature applied to band stars along the band axis.
const BAND_CURVATURE: f64 = 0.00002;

/// Trail color shared by all shooting stars.
const SHOOTING_STAR_COLOR: Rgb = Rgb::new(180, 230, 255);

/// Map a uniform sample in [0, 1) to a spectral class color.
pub fn spectral_color(sample: f64) -> Rgb {
    SPECTRAL_CLASSES
        .iter()
        .find(|(upper, _)| sample <= *upper)
        .map(|(_, color)| *color)
        .unwrap_or(SPECTRAL_CLASSES[SPECTRAL_CLASSES.len() - 1].1)
}

/// Create a background star at a uniformly random position.
pub fn create_ambient_star<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> AmbientStar {
    let radius = rng.gen_range(0.1..1.2);
    AmbientStar {
        x: rng.r#gen::<f64>() * viewport.width(),
        y: rng.r#gen::<f64>() * viewport.height(),
        radius,
        base_opacity: rng.r#gen::<f64>() * 0.7 + 0.3,
        flicker_speed: rng.r#gen::<f64>() * 0.1 + 0.02,
        flicker_phase: rng.r#gen::<f64>() * TAU,
        vx: (rng.r#gen::<f64>() - 0.5) * 0.001,
        vy: (rng.r#gen::<f64>() - 0.5) * 0.001,
        color: spectral_color(rng.r#gen()),
        glow: rng.r#gen::<f64>() < 0.25,
    }
}

/// Create a star inside the galactic band.
///
/// The position is generated in the band's local frame (axis along x, a
/// quadratic arc plus jitter across y), then rotated by the band angle and
/// translated to the band center.
pub fn create_band_star<R: Rng + ?Sized>(rng: &mut R, band: &BandGeometry) -> BandStar {
    let along = (rng.r#gen::<f64>() - 0.5) * band.length;
    let arc = BAND_CURVATURE * along * along;
    let across = arc + (rng.r#gen::<f64>() - 0.5) * band.width;

    let (sin, cos) = band.angle.sin_cos();
    let rotated_x = along * cos - across * sin;
    let rotated_y = along * sin + across * cos;

    BandStar {
        x: band.center.x + rotated_x,
        y: band.center.y + rotated_y,
        radius: rng.r#gen::<f64>() * 0.6 + 0.1,
        base_opacity: rng.r#gen::<f64>() * 0.6 + 0.4,
        flicker_speed: rng.r#gen::<f64>() * 0.1 + 0.05,
        flicker_phase: rng.r#gen::<f64>() * TAU,
        color: spectral_color(rng.r#gen()),
        glow: rng.r#gen::<f64>() < 0.3,
    }
}

/// Create a shooting star in the upper 70% of the canvas, heading toward the
/// opposite horizontal edge from where it starts.
///
/// The returned star has `id` 0; the store assigns identifiers on spawn.
pub fn create_shooting_star<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> ShootingStar {
    let speed = 25.0 + rng.r#gen::<f64>() * 20.0;
    let max_life = 50.0 + rng.r#gen::<f64>() * 30.0;
    let length = 10.0 + rng.r#gen::<f64>() * 10.0;
    let x = rng.r#gen::<f64>() * viewport.width();
    let y = rng.r#gen::<f64>() * viewport.height() * 0.7;

    // Right half heads left, left half heads right, within +/- 9 degrees.
    let base_angle = if x > viewport.width() / 2.0 { PI } else { 0.0 };
    let angle = base_angle + (rng.r#gen::<f64>() - 0.5) * (PI / 10.0);

    ShootingStar {
        id: 0,
        x,
        y,
        speed,
        angle,
        length,
        life: 0,
        max_life,
        color: SHOOTING_STAR_COLOR,
    }
}
