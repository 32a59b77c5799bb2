//! Input events delivered into the sky, and burst coalescing for them.

use std::time::{Duration, Instant};

/// An input event for the starfield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkyEvent {
    /// Pointer moved to client coordinates in canvas pixels.
    PointerMoved { x: f64, y: f64 },
    /// The canvas now has these pixel dimensions.
    Resized { width: f64, height: f64 },
}

/// Trailing-edge debounce: the latest value of a burst is released once no
/// new value has arrived for `delay`.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Record a value, replacing any pending one and restarting the delay.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Release the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, due)) if now >= due => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
