//! Tick scheduling for drift and recalculation
//!
//! `UpdateCycle` is a pure accumulator: callers feed it elapsed time and it
//! reports how many ticks of each kind became due. Tests drive it by hand;
//! [`super::BackgroundCycle`] drives it from wall-clock time.

use std::time::Duration;
use tracing::warn;

/// Most ticks of one kind reported by a single [`UpdateCycle::advance`]
///
/// Overdue ticks past this are dropped, so a long stall (or a huge `dt`)
/// catches up with a bounded burst instead of replaying every missed tick.
pub const MAX_CATCH_UP_TICKS: u32 = 120;

/// Ticks that became due during one [`UpdateCycle::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleTicks {
    /// Drift ticks due
    pub drift: u32,
    /// Recalculation ticks due
    pub recalculation: u32,
}

impl CycleTicks {
    /// Whether nothing became due
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drift == 0 && self.recalculation == 0
    }
}

/// Fixed-interval accumulator for the two repeating ticks
#[derive(Debug, Clone)]
pub struct UpdateCycle {
    drift_interval: Duration,
    recalculation_interval: Duration,
    since_drift: Duration,
    since_recalculation: Duration,
}

impl UpdateCycle {
    /// Create a cycle; a zero interval never fires
    #[must_use]
    pub fn new(drift_interval: Duration, recalculation_interval: Duration) -> Self {
        Self {
            drift_interval,
            recalculation_interval,
            since_drift: Duration::ZERO,
            since_recalculation: Duration::ZERO,
        }
    }

    /// Account for `dt` of elapsed time
    pub fn advance(&mut self, dt: Duration) -> CycleTicks {
        CycleTicks {
            drift: accumulate(&mut self.since_drift, self.drift_interval, dt),
            recalculation: accumulate(
                &mut self.since_recalculation,
                self.recalculation_interval,
                dt,
            ),
        }
    }

    /// Time until the next drift tick, `None` if drift is disabled
    #[must_use]
    pub fn until_next_drift(&self) -> Option<Duration> {
        (!self.drift_interval.is_zero()).then(|| self.drift_interval - self.since_drift)
    }

    /// Forget accumulated time
    pub fn reset(&mut self) {
        self.since_drift = Duration::ZERO;
        self.since_recalculation = Duration::ZERO;
    }
}

fn accumulate(elapsed: &mut Duration, interval: Duration, dt: Duration) -> u32 {
    if interval.is_zero() {
        return 0;
    }
    let total = elapsed.saturating_add(dt).as_nanos();
    let period = interval.as_nanos();
    *elapsed = Duration::from_nanos((total % period) as u64);

    let due = total / period;
    if due > u128::from(MAX_CATCH_UP_TICKS) {
        warn!(
            "{} ticks overdue at {:?} interval, running {} and skipping the rest",
            due, interval, MAX_CATCH_UP_TICKS
        );
        return MAX_CATCH_UP_TICKS;
    }
    u32::try_from(due).unwrap_or(MAX_CATCH_UP_TICKS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> UpdateCycle {
        UpdateCycle::new(Duration::from_secs(30), Duration::from_secs(300))
    }

    #[test]
    fn test_ticks_fire_on_interval() {
        let mut cycle = cycle();
        assert!(cycle.advance(Duration::from_secs(29)).is_empty());
        assert_eq!(
            cycle.advance(Duration::from_secs(1)),
            CycleTicks {
                drift: 1,
                recalculation: 0
            }
        );
    }

    #[test]
    fn test_large_step_fires_multiple_ticks() {
        let mut cycle = cycle();
        let ticks = cycle.advance(Duration::from_secs(610));
        assert_eq!(ticks.drift, 20);
        assert_eq!(ticks.recalculation, 2);
        assert_eq!(cycle.until_next_drift(), Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut cycle = cycle();
        let mut drift = 0;
        for _ in 0..10 {
            drift += cycle.advance(Duration::from_secs(7)).drift;
        }
        // 70 s elapsed
        assert_eq!(drift, 2);
    }

    #[test]
    fn test_zero_interval_never_fires() {
        let mut cycle = UpdateCycle::new(Duration::ZERO, Duration::from_secs(1));
        let ticks = cycle.advance(Duration::from_secs(5));
        assert_eq!(ticks.drift, 0);
        assert_eq!(ticks.recalculation, 5);
        assert_eq!(cycle.until_next_drift(), None);
    }

    #[test]
    fn test_huge_step_is_capped() {
        let mut cycle = cycle();
        let ticks = cycle.advance(Duration::from_secs(30 * 20_000_000));
        assert_eq!(ticks.drift, MAX_CATCH_UP_TICKS);
        assert_eq!(ticks.recalculation, MAX_CATCH_UP_TICKS);
        // The remainder still lines up with the interval
        assert_eq!(cycle.until_next_drift(), Some(Duration::from_secs(30)));

        let ticks = cycle.advance(Duration::from_secs(Duration::MAX.as_secs()));
        assert_eq!(ticks.drift, MAX_CATCH_UP_TICKS);
    }

    #[test]
    fn test_reset() {
        let mut cycle = cycle();
        cycle.advance(Duration::from_secs(25));
        cycle.reset();
        assert!(cycle.advance(Duration::from_secs(25)).is_empty());
    }
}
