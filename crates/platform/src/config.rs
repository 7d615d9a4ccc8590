use crate::audio::{AudioError, DEFAULT_QUANTUM, SampleFormat, check_alignment};
use crate::host::DEFAULT_TICK_HZ;

pub const DEFAULT_SAMPLE_RATE: u32 = 11025;
pub const DEFAULT_RING_CAPACITY: usize = 2048;

#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub quantum: usize,
    pub ring_capacity: usize,
    pub sample_rate: u32,
    pub format: SampleFormat,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            ring_capacity: DEFAULT_RING_CAPACITY,
            sample_rate: DEFAULT_SAMPLE_RATE,
            format: SampleFormat::MONO_S16,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub tick_hz: u32,
    pub audio: AudioConfig,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            tick_hz: DEFAULT_TICK_HZ,
            audio: AudioConfig::default(),
        }
    }
}

impl PlatformConfig {
    pub fn validate(&self) -> Result<(), AudioError> {
        let audio = &self.audio;
        check_alignment(audio.ring_capacity, audio.quantum)?;

        let channels = audio.format.channels();
        if audio.quantum % channels != 0 {
            return Err(AudioError::SplitFrame {
                quantum: audio.quantum,
                channels,
            });
        }
        Ok(())
    }
}
