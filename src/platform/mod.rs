//! Platform abstraction layer
//!
//! Turns host frame timestamps into elapsed-ms ticks for `Session::on_tick`.
//! The browser binding lives in `web` (wasm32 only).

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Frame-timestamp tick source.
///
/// Suspended while no round runs; `resume` starts a fresh timebase so time
/// spent outside a round never reaches the accumulator. Long frame gaps are
/// passed through whole.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.last_time.is_some()
    }

    /// Start ticking from `now` (ms)
    pub fn resume(&mut self, now: f64) {
        self.last_time = Some(now);
    }

    pub fn suspend(&mut self) {
        self.last_time = None;
    }

    /// Elapsed ms since the previous frame, or `None` while suspended.
    /// Timestamps that go backwards yield 0.
    pub fn advance(&mut self, now: f64) -> Option<f64> {
        let last = self.last_time?;
        self.last_time = Some(now);
        Some((now - last).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspended_clock_yields_nothing() {
        let mut clock = FrameClock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.advance(100.0), None);
    }

    #[test]
    fn test_elapsed_between_frames() {
        let mut clock = FrameClock::new();
        clock.resume(1000.0);
        assert_eq!(clock.advance(1016.0), Some(16.0));
        assert_eq!(clock.advance(1050.0), Some(34.0));
        assert_eq!(clock.advance(1040.0), Some(0.0));
    }

    #[test]
    fn test_long_frames_pass_through_by_default() {
        let mut clock = FrameClock::new();
        clock.resume(0.0);
        assert_eq!(clock.advance(2500.0), Some(2500.0));
    }

    #[test]
    fn test_resume_discards_idle_time() {
        let mut clock = FrameClock::new();
        clock.resume(0.0);
        clock.advance(16.0);
        clock.suspend();
        assert_eq!(clock.advance(5000.0), None);
        clock.resume(9000.0);
        assert_eq!(clock.advance(9016.0), Some(16.0));
    }
}
