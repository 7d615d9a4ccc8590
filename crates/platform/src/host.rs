//! Host kernel capabilities consumed by the platform layer.

use std::cell::Cell;
use std::time::{Duration, Instant};

pub const DEFAULT_TICK_HZ: u32 = 1000;

pub trait TickSource {
    /// Monotonic, non-decreasing tick count.
    fn ticks(&self) -> u64;

    /// Ticks per second.
    fn frequency(&self) -> u32;
}

pub trait Pause {
    fn pause(&self);
}

#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
    frequency: u32,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_HZ)
    }
}

impl MonotonicClock {
    pub fn new(frequency: u32) -> Self {
        assert!(frequency > 0, "tick frequency must be non-zero");
        Self {
            start: Instant::now(),
            frequency,
        }
    }
}

impl TickSource for MonotonicClock {
    fn ticks(&self) -> u64 {
        let nanos = self.start.elapsed().as_nanos();
        (nanos * self.frequency as u128 / 1_000_000_000) as u64
    }

    fn frequency(&self) -> u32 {
        self.frequency
    }
}

/// A tick counter advanced by hand. Used for deterministic drivers and tests.
#[derive(Debug)]
pub struct ManualClock {
    ticks: Cell<u64>,
    frequency: u32,
}

impl ManualClock {
    pub fn new(frequency: u32) -> Self {
        assert!(frequency > 0, "tick frequency must be non-zero");
        Self {
            ticks: Cell::new(0),
            frequency,
        }
    }

    pub fn advance(&self, ticks: u64) {
        self.ticks.set(self.ticks.get() + ticks);
    }

    pub fn set(&self, ticks: u64) {
        debug_assert!(ticks >= self.ticks.get(), "tick counter went backwards");
        self.ticks.set(ticks);
    }
}

impl TickSource for ManualClock {
    fn ticks(&self) -> u64 {
        self.ticks.get()
    }

    fn frequency(&self) -> u32 {
        self.frequency
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThreadPause {
    duration: Duration,
}

impl Default for ThreadPause {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1),
        }
    }
}

impl ThreadPause {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Pause for ThreadPause {
    fn pause(&self) {
        if self.duration.is_zero() {
            std::thread::yield_now();
        } else {
            std::thread::sleep(self.duration);
        }
    }
}
