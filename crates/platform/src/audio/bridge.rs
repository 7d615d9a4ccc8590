use super::AudioError;
use super::format::SampleFormat;
use super::ring::RingBuffer;
use super::sink::AudioSink;

pub const DEFAULT_QUANTUM: usize = 512;

#[derive(Debug, Clone, Default)]
pub struct AudioStats {
    pub pumps: u64,
    pub quanta_submitted: u64,
    pub samples_submitted: u64,
    pub declined: u64,
}

/// Keeps a [`RingBuffer`] flowing into a non-blocking [`AudioSink`].
///
/// Each `pump` submits whole quanta from the write cursor until the sink
/// reports [`WouldBlock`](crate::Submit::WouldBlock) or the cursor wraps past
/// the end of the ring, so one call never submits more than
/// `capacity / quantum` quanta.
#[derive(Debug, Clone)]
pub struct AudioRingBridge {
    quantum: usize,
    format: SampleFormat,
    stats: AudioStats,
}

impl Default for AudioRingBridge {
    fn default() -> Self {
        Self::new(DEFAULT_QUANTUM, SampleFormat::default())
    }
}

impl AudioRingBridge {
    pub fn new(quantum: usize, format: SampleFormat) -> Self {
        Self {
            quantum,
            format,
            stats: AudioStats::default(),
        }
    }

    pub fn quantum(&self) -> usize {
        self.quantum
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }

    pub fn stats(&self) -> &AudioStats {
        &self.stats
    }

    pub fn check_ring(&self, ring: &RingBuffer) -> Result<(), AudioError> {
        check_alignment(ring.capacity(), self.quantum)
    }

    /// Returns the number of quanta the sink accepted.
    pub fn pump<S: AudioSink + ?Sized>(
        &mut self,
        ring: &mut RingBuffer,
        sink: &mut S,
    ) -> Result<usize, AudioError> {
        if let Err(e) = self.check_ring(ring) {
            log::error!("Refusing to pump audio: {}", e);
            return Err(e);
        }

        self.stats.pumps += 1;

        let max_quanta = ring.capacity() / self.quantum;
        let mut accepted = 0;
        while accepted < max_quanta {
            let chunk = ring.chunk_at_cursor(self.quantum);
            if !sink.submit(self.format, chunk).is_accepted() {
                self.stats.declined += 1;
                break;
            }

            accepted += 1;
            if ring.advance(self.quantum) {
                break;
            }
        }

        self.stats.quanta_submitted += accepted as u64;
        self.stats.samples_submitted += (accepted * self.quantum) as u64;

        if accepted > 0 {
            log::trace!(
                "Pumped {} quanta, cursor now {}",
                accepted,
                ring.write_cursor()
            );
        }

        Ok(accepted)
    }
}

pub fn check_alignment(capacity: usize, quantum: usize) -> Result<(), AudioError> {
    if quantum == 0 || capacity == 0 || capacity % quantum != 0 {
        return Err(AudioError::Misaligned { capacity, quantum });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::ring::RingChunk;
    use crate::audio::sink::Submit;

    struct Unlimited {
        chunks: Vec<(usize, usize, usize)>,
    }

    impl AudioSink for Unlimited {
        fn submit(&mut self, _format: SampleFormat, chunk: RingChunk<'_>) -> Submit {
            self.chunks
                .push((chunk.start(), chunk.len(), chunk.ring_capacity()));
            Submit::Accepted
        }
    }

    struct Full;

    impl AudioSink for Full {
        fn submit(&mut self, _format: SampleFormat, _chunk: RingChunk<'_>) -> Submit {
            Submit::WouldBlock
        }
    }

    #[test]
    fn wraps_from_1792() {
        let mut ring = RingBuffer::new(2048);
        ring.set_write_cursor(1792).unwrap();
        let mut bridge = AudioRingBridge::new(512, SampleFormat::MONO_S16);

        let mut sink = Unlimited { chunks: Vec::new() };
        let accepted = bridge.pump(&mut ring, &mut sink).unwrap();

        assert_eq!(accepted, 1);
        assert_eq!(sink.chunks, vec![(1792, 512, 2048)]);
        assert_eq!(ring.write_cursor(), 256);
    }

    #[test]
    fn fills_to_end_of_ring_when_sink_has_room() {
        let mut ring = RingBuffer::new(2048);
        let mut bridge = AudioRingBridge::new(512, SampleFormat::MONO_S16);

        let mut sink = Unlimited { chunks: Vec::new() };
        assert_eq!(bridge.pump(&mut ring, &mut sink).unwrap(), 4);

        let starts: Vec<usize> = sink.chunks.iter().map(|c| c.0).collect();
        assert_eq!(starts, vec![0, 512, 1024, 1536]);
        assert_eq!(ring.write_cursor(), 0);
        assert_eq!(ring.total_submitted(), 2048);
    }

    #[test]
    fn stops_when_sink_declines() {
        struct OneShot(bool);

        impl AudioSink for OneShot {
            fn submit(&mut self, _format: SampleFormat, _chunk: RingChunk<'_>) -> Submit {
                if std::mem::replace(&mut self.0, false) {
                    Submit::Accepted
                } else {
                    Submit::WouldBlock
                }
            }
        }

        let mut ring = RingBuffer::new(2048);
        let mut bridge = AudioRingBridge::new(512, SampleFormat::MONO_S16);

        assert_eq!(bridge.pump(&mut ring, &mut OneShot(true)).unwrap(), 1);
        assert_eq!(ring.write_cursor(), 512);
        assert_eq!(bridge.stats().declined, 1);
    }

    #[test]
    fn backpressure_is_not_an_error() {
        let mut ring = RingBuffer::new(1024);
        let mut bridge = AudioRingBridge::new(256, SampleFormat::MONO_S16);

        assert_eq!(bridge.pump(&mut ring, &mut Full).unwrap(), 0);
        assert_eq!(ring.write_cursor(), 0);
        assert_eq!(ring.total_submitted(), 0);
    }

    #[test]
    fn misaligned_ring_is_rejected_before_submitting() {
        let mut ring = RingBuffer::new(1000);
        let mut bridge = AudioRingBridge::new(256, SampleFormat::MONO_S16);
        let mut sink = Unlimited { chunks: Vec::new() };

        let err = bridge.pump(&mut ring, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            AudioError::Misaligned {
                capacity: 1000,
                quantum: 256
            }
        ));
        assert!(sink.chunks.is_empty());
        assert!(check_alignment(1024, 0).is_err());
    }
}
