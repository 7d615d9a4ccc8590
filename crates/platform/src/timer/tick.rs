use crate::host::TickSource;

/// Converts a free-running tick counter into a count of events at an
/// arbitrary frequency.
///
/// The remainder is carried in units of `1 / requested_hz` base ticks, so the
/// total number of events returned over any sequence of polls is always
/// `floor(elapsed * requested_hz / base_hz)`.
#[derive(Debug, Clone)]
pub struct TickAccumulator {
    base_hz: u32,
    last_interval_tick: u64,
    accumulated_remainder: u64,
}

impl TickAccumulator {
    pub fn new(base_hz: u32) -> Self {
        Self::starting_at(base_hz, 0)
    }

    pub fn starting_at(base_hz: u32, tick: u64) -> Self {
        assert!(base_hz > 0, "base tick frequency must be non-zero");
        Self {
            base_hz,
            last_interval_tick: tick,
            accumulated_remainder: 0,
        }
    }

    pub fn for_source<S: TickSource + ?Sized>(source: &S) -> Self {
        Self::starting_at(source.frequency(), source.ticks())
    }

    pub fn base_hz(&self) -> u32 {
        self.base_hz
    }

    pub fn poll<S: TickSource + ?Sized>(&mut self, source: &S, requested_hz: u32) -> u64 {
        debug_assert_eq!(source.frequency(), self.base_hz);
        self.advance_to(source.ticks(), requested_hz)
    }

    pub fn advance_to(&mut self, now: u64, requested_hz: u32) -> u64 {
        debug_assert!(requested_hz > 0, "requested frequency must be non-zero");
        debug_assert!(
            requested_hz <= self.base_hz,
            "requested frequency {} exceeds base frequency {}",
            requested_hz,
            self.base_hz
        );

        let delta = now.saturating_sub(self.last_interval_tick);
        self.last_interval_tick = now;

        let base = self.base_hz as u128;
        let scaled = delta as u128 * requested_hz as u128 + self.accumulated_remainder as u128;
        self.accumulated_remainder = (scaled % base) as u64;

        (scaled / base) as u64
    }

    pub fn last_tick(&self) -> u64 {
        self.last_interval_tick
    }

    pub fn set_last_tick(&mut self, tick: u64) {
        self.last_interval_tick = tick;
    }

    pub fn remainder(&self) -> u64 {
        self.accumulated_remainder
    }

    /// Restart timing at `tick`, discarding any partial event.
    pub fn resync(&mut self, tick: u64) {
        self.last_interval_tick = tick;
        self.accumulated_remainder = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualClock;

    #[test]
    fn one_to_one_has_no_remainder() {
        let clock = ManualClock::new(1000);
        let mut acc = TickAccumulator::for_source(&clock);

        for step in [1, 7, 16, 250, 3] {
            clock.advance(step);
            assert_eq!(acc.poll(&clock, 1000), step);
            assert_eq!(acc.remainder(), 0);
        }
    }

    #[test]
    fn uneven_frequency_sums_exactly() {
        let mut acc = TickAccumulator::new(1000);

        let mut total = 0;
        let mut now = 0;
        while now < 10_000 {
            now += 16;
            total += acc.advance_to(now, 60);
        }

        assert_eq!(now, 10_000);
        assert_eq!(total, 600);
    }

    #[test]
    fn remainder_stays_below_period() {
        let mut acc = TickAccumulator::new(1000);
        let mut now = 0;

        for step in [3u64, 17, 1, 29, 100, 0, 4, 61] {
            now += step;
            acc.advance_to(now, 35);
            assert!(acc.remainder() < 1000);
        }
    }

    #[test]
    fn drift_is_bounded_by_one_block_under_irregular_polls() {
        let mut acc = TickAccumulator::new(1000);
        let steps = [1u64, 2, 33, 5, 90, 14, 14, 14, 71, 8, 400, 3, 27];

        let mut now = 0;
        let mut total = 0;
        for step in steps.iter().cycle().take(500) {
            now += step;
            total += acc.advance_to(now, 70);

            // total * (1000 / 70) compared against now, kept in integers.
            let consumed = total * 1000;
            let elapsed = now * 70;
            assert!(consumed <= elapsed);
            assert!(elapsed - consumed < 1000);
        }
    }

    #[test]
    fn last_tick_override() {
        let mut acc = TickAccumulator::new(1000);
        acc.advance_to(500, 1000);
        assert_eq!(acc.last_tick(), 500);

        acc.set_last_tick(900);
        assert_eq!(acc.advance_to(1000, 1000), 100);
    }

    #[test]
    fn resync_drops_partial_event() {
        let mut acc = TickAccumulator::new(1000);
        assert_eq!(acc.advance_to(10, 60), 0);
        assert_eq!(acc.remainder(), 600);

        acc.resync(10);
        assert_eq!(acc.remainder(), 0);
        assert_eq!(acc.advance_to(26, 60), 0);
        assert_eq!(acc.advance_to(27, 60), 1);
    }
}
