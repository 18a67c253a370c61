//! Spawn cadence controller
//!
//! Counts elapsed time and reports how many ticks fell due. Changing the
//! interval or deactivating restarts the cadence from zero, so a stale
//! partial interval never leaks into the next one.

/// Repeating timer driven by explicit time steps
#[derive(Debug, Clone)]
pub struct GameLoop {
    interval_ms: f64,
    active: bool,
    elapsed_ms: f64,
}

impl GameLoop {
    /// Inactive loop with the given cadence
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            active: false,
            elapsed_ms: 0.0,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Time accumulated toward the next tick
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Reschedule at a new cadence; no-op if unchanged
    pub fn set_interval(&mut self, interval_ms: f64) {
        if interval_ms != self.interval_ms {
            self.interval_ms = interval_ms;
            self.elapsed_ms = 0.0;
        }
    }

    /// Start or stop ticking. Stopping drops any partially elapsed interval.
    pub fn set_active(&mut self, active: bool) {
        if active != self.active {
            self.active = active;
            self.elapsed_ms = 0.0;
        }
    }

    /// Advance by `dt_ms` and return the number of ticks that fell due
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.active || self.interval_ms <= 0.0 || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }

        self.elapsed_ms += dt_ms;
        let ticks = (self.elapsed_ms / self.interval_ms).floor();
        self.elapsed_ms -= ticks * self.interval_ms;
        ticks as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_delta_is_inert() {
        let mut lp = GameLoop::new(100.0);
        lp.set_active(true);
        assert_eq!(lp.advance(f64::NAN), 0);
        assert_eq!(lp.elapsed_ms(), 0.0);
        assert_eq!(lp.advance(100.0), 1);
    }

    #[test]
    fn test_inactive_never_ticks() {
        let mut lp = GameLoop::new(100.0);
        assert_eq!(lp.advance(1_000.0), 0);
        assert_eq!(lp.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_ticks_at_cadence() {
        let mut lp = GameLoop::new(100.0);
        lp.set_active(true);
        assert_eq!(lp.advance(99.0), 0);
        assert_eq!(lp.advance(1.0), 1);
        assert_eq!(lp.advance(250.0), 2);
        assert_eq!(lp.elapsed_ms(), 50.0);
    }

    #[test]
    fn test_interval_change_restarts_cadence() {
        let mut lp = GameLoop::new(100.0);
        lp.set_active(true);
        assert_eq!(lp.advance(90.0), 0);
        lp.set_interval(50.0);
        assert_eq!(lp.elapsed_ms(), 0.0);
        assert_eq!(lp.advance(40.0), 0);
        assert_eq!(lp.advance(10.0), 1);
    }

    #[test]
    fn test_same_interval_keeps_progress() {
        let mut lp = GameLoop::new(100.0);
        lp.set_active(true);
        lp.advance(90.0);
        lp.set_interval(100.0);
        assert_eq!(lp.advance(10.0), 1);
    }

    #[test]
    fn test_deactivate_drops_pending_tick() {
        let mut lp = GameLoop::new(100.0);
        lp.set_active(true);
        lp.advance(99.0);
        lp.set_active(false);
        assert_eq!(lp.advance(500.0), 0);
        lp.set_active(true);
        assert_eq!(lp.advance(1.0), 0);
    }

    #[test]
    fn test_degenerate_interval_is_inert() {
        let mut lp = GameLoop::new(0.0);
        lp.set_active(true);
        assert_eq!(lp.advance(100.0), 0);
    }
}
