//! Viewport dimensions and points in canvas pixel space.

use crate::SkyError;

/// A point in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Squared distance to another point.
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Canvas dimensions in pixels. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    /// Validate and create a viewport.
    pub fn new(width: f64, height: f64) -> Result<Self, SkyError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(SkyError::InvalidViewport { width, height })
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_rejects_degenerate_dimensions() {
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(800.0, -1.0).is_err());
        assert!(Viewport::new(f64::NAN, 600.0).is_err());
        assert!(Viewport::new(800.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_viewport_accepts_positive_dimensions() {
        let viewport = Viewport::new(800.0, 600.0).unwrap();
        assert_eq!(viewport.width(), 800.0);
        assert_eq!(viewport.height(), 600.0);
        assert_eq!(viewport.center(), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_distance_sq() {
        assert_eq!(Point::new(0.0, 0.0).distance_sq(Point::new(3.0, 4.0)), 25.0);
    }
}
