use retroport::{RingBuffer, SampleFormat};

/// Stand-in for an engine's software mixer: keeps the unsent part of the ring
/// filled with a square wave of continuous phase. Stereo output is written as
/// interleaved frames with the same value on both channels.
#[derive(Debug, Clone)]
pub struct SquareWave {
    half_period: u64,
    channels: u64,
    amplitude: i16,
    mixed_until: u64,
}

impl SquareWave {
    pub fn new(sample_rate: u32, format: SampleFormat, tone_hz: u32, amplitude: i16) -> Self {
        let half_period = (sample_rate as u64 / (2 * tone_hz.max(1) as u64)).max(1);
        Self {
            half_period,
            channels: format.channels() as u64,
            amplitude,
            mixed_until: 0,
        }
    }

    fn sample_at(&self, index: u64) -> i16 {
        let frame = index / self.channels;
        if (frame / self.half_period) % 2 == 0 {
            self.amplitude
        } else {
            -self.amplitude
        }
    }

    /// Mixes every sample from the last mixed position up to one full ring
    /// ahead of what has been submitted.
    pub fn fill(&mut self, ring: &mut RingBuffer) {
        let capacity = ring.capacity() as u64;
        if capacity == 0 {
            return;
        }

        let submitted = ring.total_submitted();
        let cursor = ring.write_cursor() as u64;
        let end = submitted + capacity;
        let start = self.mixed_until.max(submitted);

        for index in start..end {
            let sample = self.sample_at(index);
            let pos = (cursor + (index - submitted)) % capacity;
            ring.samples_mut()[pos as usize] = sample;
        }
        self.mixed_until = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_whole_ring_ahead_of_cursor() {
        let mut ring = RingBuffer::new(64);
        let mut mixer = SquareWave::new(800, SampleFormat::MONO_S16, 100, 1000);
        mixer.fill(&mut ring);

        let samples = ring.samples();
        assert!(samples[..4].iter().all(|&s| s == 1000));
        assert!(samples[4..8].iter().all(|&s| s == -1000));
        assert!(samples[8..12].iter().all(|&s| s == 1000));
    }

    #[test]
    fn second_fill_only_touches_new_region() {
        let mut ring = RingBuffer::new(64);
        let mut mixer = SquareWave::new(800, SampleFormat::MONO_S16, 100, 1000);
        mixer.fill(&mut ring);

        ring.samples_mut()[0] = 7;
        mixer.fill(&mut ring);
        assert_eq!(ring.samples()[0], 7);
    }

    #[test]
    fn stereo_writes_interleaved_frames() {
        let mut ring = RingBuffer::new(64);
        let mut mixer = SquareWave::new(800, SampleFormat::STEREO_S16, 100, 1000);
        mixer.fill(&mut ring);

        let samples = ring.samples();
        assert!(samples[..8].iter().all(|&s| s == 1000));
        assert!(samples[8..16].iter().all(|&s| s == -1000));
        assert!(samples.chunks_exact(2).all(|frame| frame[0] == frame[1]));
    }
}
