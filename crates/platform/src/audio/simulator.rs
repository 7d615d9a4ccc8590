use super::format::SampleFormat;
use super::ring::RingChunk;
use super::sink::{AudioSink, Submit};

/// Models a host audio driver: a bounded queue that drains at the sample rate
/// as host ticks go by.
///
/// Queue sizes count ring entries. A stereo sink plays two entries per frame,
/// so it drains twice as many entries per tick as a mono one.
#[derive(Debug, Clone)]
pub struct SimulatedSink {
    sample_rate: u32,
    format: SampleFormat,
    base_hz: u32,
    max_queued: usize,
    queued: usize,
    last_tick: u64,
    drain_remainder: u64,
    played: u64,
    underruns: u64,
    recorded: Option<Vec<i16>>,
}

impl SimulatedSink {
    pub fn new(sample_rate: u32, format: SampleFormat, base_hz: u32, max_queued: usize) -> Self {
        assert!(base_hz > 0, "base tick frequency must be non-zero");
        Self {
            sample_rate,
            format,
            base_hz,
            max_queued,
            queued: 0,
            last_tick: 0,
            drain_remainder: 0,
            played: 0,
            underruns: 0,
            recorded: None,
        }
    }

    /// Keep a copy of every accepted sample.
    pub fn recording(mut self) -> Self {
        self.recorded = Some(Vec::new());
        self
    }

    pub fn drain_to(&mut self, now: u64) {
        let delta = now.saturating_sub(self.last_tick);
        self.last_tick = now;

        let base = self.base_hz as u128;
        let scaled = delta as u128 * self.sample_rate as u128 + self.drain_remainder as u128;
        self.drain_remainder = (scaled % base) as u64;
        let wanted = (scaled / base) as usize * self.format.channels();

        let drained = wanted.min(self.queued);
        if drained < wanted && self.played > 0 {
            self.underruns += 1;
            log::debug!("Audio underrun: wanted {} samples, had {}", wanted, drained);
        }
        self.queued -= drained;
        self.played += drained as u64;
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }

    pub fn queued(&self) -> usize {
        self.queued
    }

    pub fn free(&self) -> usize {
        self.max_queued - self.queued
    }

    pub fn played(&self) -> u64 {
        self.played
    }

    pub fn bytes_played(&self) -> u64 {
        self.played * self.format.bytes_per_sample() as u64
    }

    pub fn underruns(&self) -> u64 {
        self.underruns
    }

    pub fn recorded(&self) -> &[i16] {
        self.recorded.as_deref().unwrap_or(&[])
    }
}

impl AudioSink for SimulatedSink {
    fn submit(&mut self, format: SampleFormat, chunk: RingChunk<'_>) -> Submit {
        debug_assert_eq!(format, self.format, "sink opened with a different format");
        if chunk.len() > self.free() {
            return Submit::WouldBlock;
        }
        self.queued += chunk.len();
        if let Some(recorded) = &mut self.recorded {
            chunk.copy_to(recorded);
        }
        Submit::Accepted
    }
}
