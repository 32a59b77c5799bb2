//! Pointer position and the eased parallax offset it drives.

use log::warn;
use nocturne_core::Point;

/// Tracks the normalized pointer and smooths it into a parallax offset.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    /// Pointer position normalized to [-1, 1] on both axes.
    raw: Point,
    /// Smoothed parallax offset in pixels.
    offset: Point,
    /// Offset reached at full deflection on each axis.
    scale: Point,
    /// Fraction of the remaining distance closed per step.
    easing: f64,
}

impl PointerTracker {
    pub fn new(scale_x: f64, scale_y: f64, easing: f64) -> Self {
        Self {
            raw: Point::default(),
            offset: Point::default(),
            scale: Point::new(scale_x, scale_y),
            easing: easing.clamp(0.0, 1.0),
        }
    }

    /// Record a pointer position in client pixels.
    ///
    /// Non-finite input is dropped; positions outside the canvas clamp to
    /// the nearest edge.
    pub fn update_pointer(&mut self, client_x: f64, client_y: f64, width: f64, height: f64) {
        let inputs_valid = [client_x, client_y, width, height]
            .iter()
            .all(|v| v.is_finite())
            && width > 0.0
            && height > 0.0;
        if !inputs_valid {
            warn!("ignoring pointer update ({client_x}, {client_y}) on {width}x{height}");
            return;
        }
        self.raw = Point::new(
            (2.0 * (client_x / width) - 1.0).clamp(-1.0, 1.0),
            (2.0 * (client_y / height) - 1.0).clamp(-1.0, 1.0),
        );
    }

    /// Move the offset a fixed fraction of the way toward its target.
    pub fn step(&mut self) {
        let target = self.target();
        self.offset.x += (target.x - self.offset.x) * self.easing;
        self.offset.y += (target.y - self.offset.y) * self.easing;
    }

    /// The offset the easing converges to for the current pointer.
    pub fn target(&self) -> Point {
        Point::new(self.raw.x * self.scale.x, self.raw.y * self.scale.y)
    }

    pub fn raw(&self) -> Point {
        self.raw
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Pointer position mapped back into canvas pixels.
    pub fn canvas_position(&self, width: f64, height: f64) -> Point {
        Point::new(
            (self.raw.x + 1.0) / 2.0 * width,
            (self.raw.y + 1.0) / 2.0 * height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> PointerTracker {
        PointerTracker::new(50.0, 30.0, 0.05)
    }

    #[test]
    fn test_normalization() {
        let mut pointer = tracker();
        pointer.update_pointer(0.0, 0.0, 800.0, 600.0);
        assert_eq!(pointer.raw(), Point::new(-1.0, -1.0));
        pointer.update_pointer(400.0, 300.0, 800.0, 600.0);
        assert_eq!(pointer.raw(), Point::new(0.0, 0.0));
        pointer.update_pointer(800.0, 600.0, 800.0, 600.0);
        assert_eq!(pointer.raw(), Point::new(1.0, 1.0));
    }

    #[test]
    fn test_out_of_range_pointer_is_clamped() {
        let mut pointer = tracker();
        pointer.update_pointer(-200.0, 1200.0, 800.0, 600.0);
        assert_eq!(pointer.raw(), Point::new(-1.0, 1.0));
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let mut pointer = tracker();
        pointer.update_pointer(200.0, 150.0, 800.0, 600.0);
        let before = pointer.raw();
        pointer.update_pointer(f64::NAN, 10.0, 800.0, 600.0);
        pointer.update_pointer(10.0, f64::INFINITY, 800.0, 600.0);
        pointer.update_pointer(10.0, 10.0, 0.0, 600.0);
        assert_eq!(pointer.raw(), before);
    }

    #[test]
    fn test_single_step_moves_five_percent() {
        let mut pointer = tracker();
        pointer.update_pointer(800.0, 600.0, 800.0, 600.0);
        pointer.step();
        let offset = pointer.offset();
        assert!((offset.x - 2.5).abs() < 1e-12);
        assert!((offset.y - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_easing_converges_without_overshoot() {
        let mut pointer = tracker();
        pointer.update_pointer(800.0, 600.0, 800.0, 600.0);
        let mut previous = pointer.offset();
        for _ in 0..1000 {
            pointer.step();
            let offset = pointer.offset();
            assert!(offset.x <= 50.0 && offset.y <= 30.0);
            assert!(offset.x >= previous.x && offset.y >= previous.y);
            previous = offset;
        }
        assert!((previous.x - 50.0).abs() < 1e-6);
        assert!((previous.y - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_canvas_position_round_trips() {
        let mut pointer = tracker();
        pointer.update_pointer(200.0, 450.0, 800.0, 600.0);
        let position = pointer.canvas_position(800.0, 600.0);
        assert!((position.x - 200.0).abs() < 1e-9);
        assert!((position.y - 450.0).abs() < 1e-9);
    }
}
