//! Viewport dimensions and the galactic band geometry derived from them.

use std::f64::consts::PI;

use log::debug;
use nocturne_core::{Point, SkyError, Viewport};

use crate::particles::ParticleStore;

/// Downward offset of the band center from the viewport center.
const BAND_CENTER_OFFSET_Y: f64 = 50.0;

/// Fixed tilt of the band.
const BAND_ANGLE: f64 = -PI / 20.0;

/// The rotated, curved strip that band stars are placed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandGeometry {
    pub center: Point,
    /// Extent across the band axis (canvas height / 4).
    pub width: f64,
    /// Extent along the band axis (canvas width * 1.2).
    pub length: f64,
    /// Rotation of the band axis in radians.
    pub angle: f64,
}

impl BandGeometry {
    pub fn from_viewport(viewport: &Viewport) -> Self {
        let center = viewport.center();
        Self {
            center: Point::new(center.x, center.y + BAND_CENTER_OFFSET_Y),
            width: viewport.height() / 4.0,
            length: viewport.width() * 1.2,
            angle: BAND_ANGLE,
        }
    }
}

/// Owns the current viewport and its band geometry.
#[derive(Debug, Clone)]
pub struct ViewportController {
    viewport: Viewport,
    band: BandGeometry,
}

impl ViewportController {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            band: BandGeometry::from_viewport(&viewport),
            viewport,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn band(&self) -> &BandGeometry {
        &self.band
    }

    /// Apply new dimensions and rebuild the store for them.
    ///
    /// Invalid dimensions leave the current geometry and store untouched.
    pub fn resize(
        &mut self,
        width: f64,
        height: f64,
        store: &mut ParticleStore,
    ) -> Result<(), SkyError> {
        let viewport = Viewport::new(width, height)?;
        debug!("viewport resized to {width}x{height}");
        self.viewport = viewport;
        self.band = BandGeometry::from_viewport(&viewport);
        store.repopulate(&self.viewport, &self.band);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nocturne_core::SkyParams;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_band_geometry_formulas() {
        let band = BandGeometry::from_viewport(&Viewport::new(1000.0, 800.0).unwrap());
        assert_eq!(band.center, Point::new(500.0, 450.0));
        assert_eq!(band.width, 200.0);
        assert_eq!(band.length, 1200.0);
        assert_eq!(band.angle, -PI / 20.0);
    }

    #[test]
    fn test_resize_recomputes_band_and_repopulates() {
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        let mut controller = ViewportController::new(viewport);
        let mut store = ParticleStore::new(
            SkyParams::default(),
            StdRng::seed_from_u64(1),
            controller.viewport(),
            controller.band(),
        );
        let before = store.band_stars().to_vec();

        controller.resize(1920.0, 1080.0, &mut store).unwrap();

        assert_eq!(controller.viewport().width(), 1920.0);
        assert_eq!(controller.band().length, 1920.0 * 1.2);
        assert_eq!(controller.band().center, Point::new(960.0, 590.0));
        assert_ne!(store.band_stars(), before.as_slice());
        assert!(
            store
                .ambient_stars()
                .iter()
                .all(|s| s.x < 1920.0 && s.y < 1080.0)
        );
    }

    #[test]
    fn test_resize_rejects_invalid_dimensions() {
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        let mut controller = ViewportController::new(viewport);
        let mut store = ParticleStore::new(
            SkyParams::default(),
            StdRng::seed_from_u64(1),
            controller.viewport(),
            controller.band(),
        );
        let before = store.ambient_stars().to_vec();

        assert!(controller.resize(0.0, 600.0, &mut store).is_err());
        assert!(controller.resize(f64::NAN, 600.0, &mut store).is_err());

        assert_eq!(controller.viewport().width(), 800.0);
        assert_eq!(store.ambient_stars(), before.as_slice());
    }
}
