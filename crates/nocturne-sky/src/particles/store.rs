//! Ownership and per-frame evolution of the three particle populations.

use log::{debug, trace};
use nocturne_core::{SkyParams, Viewport};
use rand::{Rng, rngs::StdRng};

use super::{
    AmbientStar, BandStar, ShootingStar, create_ambient_star, create_band_star,
    create_shooting_star,
};
use crate::viewport::BandGeometry;

/// What changed in the shooting star population during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Identifier of the shooting star spawned this frame, if any.
    pub spawned: Option<u64>,
    /// Identifiers of shooting stars retired this frame.
    pub retired: Vec<u64>,
}

/// Owns ambient, band and shooting stars for the current viewport.
#[derive(Debug)]
pub struct ParticleStore {
    params: SkyParams,
    rng: StdRng,
    /// Canvas extent used for wraparound.
    viewport: Viewport,
    ambient: Vec<AmbientStar>,
    band: Vec<BandStar>,
    /// Live shooting stars. Retirement swap-removes, so order is not stable.
    shooting: Vec<ShootingStar>,
    next_shooting_id: u64,
}

impl ParticleStore {
    /// Create a store and populate it for the given geometry.
    pub fn new(params: SkyParams, rng: StdRng, viewport: &Viewport, band: &BandGeometry) -> Self {
        let mut store = Self {
            ambient: Vec::with_capacity(params.ambient_count),
            band: Vec::with_capacity(params.band_count),
            shooting: Vec::with_capacity(params.max_concurrent_shooting_stars),
            params,
            rng,
            viewport: *viewport,
            next_shooting_id: 0,
        };
        store.repopulate(viewport, band);
        store
    }

    /// Discard every particle and regenerate the fixed populations.
    pub fn repopulate(&mut self, viewport: &Viewport, band: &BandGeometry) {
        self.viewport = *viewport;
        self.ambient.clear();
        self.band.clear();
        self.shooting.clear();

        for _ in 0..self.params.ambient_count {
            self.ambient.push(create_ambient_star(&mut self.rng, viewport));
        }
        for _ in 0..self.params.band_count {
            self.band.push(create_band_star(&mut self.rng, band));
        }

        debug!(
            "repopulated {} ambient and {} band stars for {}x{}",
            self.ambient.len(),
            self.band.len(),
            viewport.width(),
            viewport.height()
        );
    }

    /// Replace the random source, e.g. to reseed the sky.
    pub fn reseed(&mut self, rng: StdRng) {
        self.rng = rng;
    }

    /// Advance every population by one frame.
    pub fn advance_frame(&mut self) -> FrameReport {
        self.advance_ambient();
        self.advance_band();

        let spawned = self.maybe_spawn();
        let retired = self.advance_shooting();
        FrameReport { spawned, retired }
    }

    fn advance_ambient(&mut self) {
        let width = self.viewport.width();
        let height = self.viewport.height();
        let drift = self.params.drift_speed;

        for star in &mut self.ambient {
            star.flicker_phase += star.flicker_speed;
            star.x = wrap(star.x + star.vx + drift, width);
            star.y = wrap(star.y + star.vy, height);
        }
    }

    fn advance_band(&mut self) {
        for star in &mut self.band {
            star.flicker_phase += star.flicker_speed;
        }
    }

    /// Roll for a new shooting star while below the concurrency cap.
    fn maybe_spawn(&mut self) -> Option<u64> {
        if self.shooting.len() >= self.params.max_concurrent_shooting_stars {
            return None;
        }
        if self.rng.r#gen::<f64>() >= self.params.spawn_probability {
            return None;
        }

        let mut star = create_shooting_star(&mut self.rng, &self.viewport);
        star.id = self.next_shooting_id;
        self.next_shooting_id += 1;
        trace!("spawned shooting star {} at ({:.1}, {:.1})", star.id, star.x, star.y);
        let id = star.id;
        self.shooting.push(star);
        Some(id)
    }

    /// Move shooting stars and retire the ones past their max life.
    fn advance_shooting(&mut self) -> Vec<u64> {
        let mut retired = Vec::new();
        let mut i = 0;
        // swap_remove pulls an unvisited star into slot i, so i is not advanced.
        while i < self.shooting.len() {
            let star = &mut self.shooting[i];
            let (sin, cos) = star.angle.sin_cos();
            star.x += cos * star.speed;
            star.y += sin * star.speed;
            star.life += 1;

            if star.is_expired() {
                let star = self.shooting.swap_remove(i);
                trace!("retired shooting star {} after {} frames", star.id, star.life);
                retired.push(star.id);
            } else {
                i += 1;
            }
        }
        retired
    }

    pub fn params(&self) -> &SkyParams {
        &self.params
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn ambient_stars(&self) -> &[AmbientStar] {
        &self.ambient
    }

    pub fn band_stars(&self) -> &[BandStar] {
        &self.band
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting
    }

    /// Insert a shooting star directly, bypassing the spawn roll.
    pub fn push_shooting_star(&mut self, mut star: ShootingStar) -> u64 {
        star.id = self.next_shooting_id;
        self.next_shooting_id += 1;
        let id = star.id;
        self.shooting.push(star);
        id
    }
}

/// Wrap a coordinate into [0, extent).
fn wrap(value: f64, extent: f64) -> f64 {
    if (0.0..extent).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    if wrapped >= extent { 0.0 } else { wrapped }
}
