//! Fixed-rate cadence for the control loop.
//!
//! Deadlines advance by exactly one period per tick, so rounding in the
//! sleep never accumulates into drift.  A tick that runs past the next
//! deadline counts as an overrun; the schedule then restarts from "now"
//! instead of firing a burst of late ticks to catch up.
//!
//! ```text
//!  t0        t0+P      t0+2P     t0+3P
//!  │ tick ░░ │ tick ░░ │ tick ░░░░░░│░░ overrun → resync
//! ```

use std::time::{Duration, Instant};

use log::warn;

pub struct PeriodicScheduler {
    period: Duration,
    next_deadline: Instant,
    ticks: u64,
    overruns: u64,
}

impl PeriodicScheduler {
    /// First deadline is one period after `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_deadline: now + period,
            ticks: 0,
            overruns: 0,
        }
    }

    /// Call after finishing a tick.  Returns how long to sleep before the
    /// next one, or `None` if the tick overran and the next one is due now.
    pub fn next_sleep(&mut self, now: Instant) -> Option<Duration> {
        self.ticks += 1;
        if now <= self.next_deadline {
            let sleep = self.next_deadline - now;
            self.next_deadline += self.period;
            return Some(sleep);
        }

        self.overruns += 1;
        let late = now - self.next_deadline;
        warn!(
            "Control tick {} overran by {:.1} ms ({} overruns total)",
            self.ticks,
            late.as_secs_f64() * 1e3,
            self.overruns
        );
        self.next_deadline = now + self.period;
        None
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Duration = Duration::from_millis(20);

    #[test]
    fn on_time_ticks_sleep_until_deadline() {
        let t0 = Instant::now();
        let mut s = PeriodicScheduler::new(P, t0);

        assert_eq!(s.next_sleep(t0 + Duration::from_millis(5)), Some(Duration::from_millis(15)));
        // Deadline moved to t0 + 40ms regardless of how long the sleep took.
        assert_eq!(s.next_sleep(t0 + Duration::from_millis(22)), Some(Duration::from_millis(18)));
        assert_eq!(s.ticks(), 2);
        assert_eq!(s.overruns(), 0);
    }

    #[test]
    fn exact_deadline_is_not_an_overrun() {
        let t0 = Instant::now();
        let mut s = PeriodicScheduler::new(P, t0);
        assert_eq!(s.next_sleep(t0 + P), Some(Duration::ZERO));
        assert_eq!(s.overruns(), 0);
    }

    #[test]
    fn overrun_is_counted_and_resyncs() {
        let t0 = Instant::now();
        let mut s = PeriodicScheduler::new(P, t0);

        let late = t0 + Duration::from_millis(75);
        assert_eq!(s.next_sleep(late), None);
        assert_eq!(s.overruns(), 1);

        // No burst: the next deadline is one period after the late tick.
        assert_eq!(s.next_sleep(late + Duration::from_millis(3)), Some(Duration::from_millis(17)));
        assert_eq!(s.overruns(), 1);
        assert_eq!(s.ticks(), 2);
    }
}
