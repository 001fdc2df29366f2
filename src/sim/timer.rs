//! Fixed-rate spawn trigger
//!
//! Driven by elapsed wall-clock milliseconds from the host, independent of
//! the frame tick. Only one schedule exists at a time: `reschedule` drops the
//! period in progress and starts counting from zero.

/// Longest gap a single `advance` accounts for (caps catch-up after a tab stall)
pub const MAX_ADVANCE_MS: f64 = 250.0;

/// Smallest accepted period
const MIN_PERIOD_MS: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    period_ms: f64,
    elapsed_ms: f64,
}

impl SpawnTimer {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms: period_ms.max(MIN_PERIOD_MS),
            elapsed_ms: 0.0,
        }
    }

    /// Timer that fires `rate` times per second
    pub fn for_rate(rate: u32) -> Self {
        Self::new(period_for_rate(rate))
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Cancel the current schedule and restart with a new period
    pub fn reschedule(&mut self, period_ms: f64) {
        self.period_ms = period_ms.max(MIN_PERIOD_MS);
        self.elapsed_ms = 0.0;
    }

    /// Advance by `elapsed_ms` and return how many times the timer fired
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !(elapsed_ms > 0.0) {
            return 0;
        }
        if elapsed_ms > MAX_ADVANCE_MS {
            log::debug!("Spawn timer skipped {:.0} ms stall", elapsed_ms - MAX_ADVANCE_MS);
        }
        self.elapsed_ms += elapsed_ms.min(MAX_ADVANCE_MS);

        let due = (self.elapsed_ms / self.period_ms).floor();
        self.elapsed_ms -= due * self.period_ms;
        due as u32
    }
}

/// Period in ms for `rate` firings per second
pub fn period_for_rate(rate: u32) -> f64 {
    1000.0 / rate.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Count firings over `window_ms` with a host ticking every 10 ms
    fn count_fires(timer: &mut SpawnTimer, window_ms: u32) -> u32 {
        (0..window_ms / 10).map(|_| timer.advance(10.0)).sum()
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = SpawnTimer::for_rate(1);
        assert_eq!(timer.advance(999.0), 0);
        assert_eq!(timer.advance(1.0), 1);
        assert_eq!(timer.advance(500.0), 0);
        assert_eq!(timer.advance(500.0), 1);
    }

    #[test]
    fn test_rate_change_scales_fire_count() {
        let mut timer = SpawnTimer::for_rate(1);
        let slow = count_fires(&mut timer, 6000);
        assert_eq!(slow, 6);

        timer.reschedule(period_for_rate(3));
        assert!((timer.period_ms() - 1000.0 / 3.0).abs() < 1e-9);
        let fast = count_fires(&mut timer, 6000);
        assert!((17..=18).contains(&fast), "got {fast}");
    }

    #[test]
    fn test_reschedule_restarts_period() {
        let mut timer = SpawnTimer::for_rate(1);
        assert_eq!(timer.advance(900.0), 0);
        timer.reschedule(period_for_rate(2));
        // The 900 ms already elapsed must not carry over
        assert_eq!(timer.advance(400.0), 0);
        assert_eq!(timer.advance(100.0), 1);
    }

    #[test]
    fn test_ignores_non_positive_elapsed() {
        let mut timer = SpawnTimer::for_rate(10);
        assert_eq!(timer.advance(0.0), 0);
        assert_eq!(timer.advance(-50.0), 0);
        assert_eq!(timer.advance(f64::NAN), 0);
        assert_eq!(timer.advance(100.0), 1);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut timer = SpawnTimer::for_rate(10);
        // A minute-long stall only counts as MAX_ADVANCE_MS
        assert_eq!(timer.advance(60_000.0), 2);
    }

    #[test]
    fn test_high_rate_keeps_up_at_frame_rate() {
        for (rate, fps) in [(600, 60.0), (600, 30.0), (1000, 60.0)] {
            let mut timer = SpawnTimer::for_rate(rate);
            let frame_ms = 1000.0 / fps;
            let fired: u32 = (0..fps as u32).map(|_| timer.advance(frame_ms)).sum();
            assert!(fired + 1 >= rate && fired <= rate, "rate {rate} at {fps} fps fired {fired}");
        }
    }
}
