use super::tick::TickAccumulator;
use crate::host::TickSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

impl TimerId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

struct PeriodicTimer {
    id: TimerId,
    hz: u32,
    accumulator: TickAccumulator,
    handler: Box<dyn FnMut()>,
}

/// Emulates the periodic timer interrupts legacy engines install, one
/// accumulator per registered handler.
pub struct TimerService {
    base_hz: u32,
    timers: Vec<PeriodicTimer>,
    next_id: u32,
}

impl TimerService {
    pub fn new(base_hz: u32) -> Self {
        assert!(base_hz > 0, "base tick frequency must be non-zero");
        Self {
            base_hz,
            timers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn register<F>(&mut self, hz: u32, now: u64, handler: F) -> TimerId
    where
        F: FnMut() + 'static,
    {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        log::debug!("Registered timer {} at {} Hz", id.0, hz);

        self.timers.push(PeriodicTimer {
            id,
            hz,
            accumulator: TickAccumulator::starting_at(self.base_hz, now),
            handler: Box::new(handler),
        });
        id
    }

    pub fn unregister(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        before != self.timers.len()
    }

    /// Fires every handler once per elapsed period. Returns the total number of
    /// handler invocations.
    pub fn service(&mut self, now: u64) -> u64 {
        let mut fired = 0;
        for timer in &mut self.timers {
            let events = timer.accumulator.advance_to(now, timer.hz);
            for _ in 0..events {
                (timer.handler)();
            }
            fired += events;
        }
        fired
    }

    pub fn service_source<S: TickSource + ?Sized>(&mut self, source: &S) -> u64 {
        self.service(source.ticks())
    }

    pub fn resync(&mut self, now: u64) {
        for timer in &mut self.timers {
            timer.accumulator.resync(now);
        }
    }

    pub fn frequency(&self, id: TimerId) -> Option<u32> {
        self.timers.iter().find(|t| t.id == id).map(|t| t.hz)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
