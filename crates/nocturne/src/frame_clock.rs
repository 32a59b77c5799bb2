//! Single-threaded frame host driven by the terminal event loop.

use std::time::{Duration, Instant};

use nocturne_sky::{FrameHost, FrameRequest};

/// Hands out frame requests due one interval after they are made. At most
/// one request is outstanding.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameRequest, Instant)>,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            pending: None,
        }
    }

    /// When the outstanding request is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, due)| due)
    }

    /// Take the outstanding request if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameRequest> {
        match self.pending {
            Some((request, due)) if now >= due => {
                self.pending = None;
                Some(request)
            }
            _ => None,
        }
    }
}

impl FrameHost for FrameClock {
    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id);
        self.next_id += 1;
        self.pending = Some((request, Instant::now() + self.interval));
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if matches!(self.pending, Some((pending, _)) if pending == request) {
            self.pending = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(16);

    #[test]
    fn test_request_due_after_interval() {
        let mut clock = FrameClock::new(INTERVAL);
        let before = Instant::now();
        let request = clock.request_frame();
        let due = clock.deadline().unwrap();
        assert!(due >= before + INTERVAL);

        assert_eq!(clock.take_due(before), None);
        assert_eq!(clock.take_due(due), Some(request));
        assert_eq!(clock.take_due(due + INTERVAL), None);
    }

    #[test]
    fn test_cancel_removes_pending_request() {
        let mut clock = FrameClock::new(INTERVAL);
        let request = clock.request_frame();
        clock.cancel_frame(request);
        assert_eq!(clock.deadline(), None);
        assert_eq!(clock.take_due(Instant::now() + INTERVAL * 2), None);
    }

    #[test]
    fn test_stale_cancel_keeps_newer_request() {
        let mut clock = FrameClock::new(INTERVAL);
        let first = clock.request_frame();
        let second = clock.request_frame();
        clock.cancel_frame(first);
        let later = Instant::now() + INTERVAL * 2;
        assert_eq!(clock.take_due(later), Some(second));
    }
}
