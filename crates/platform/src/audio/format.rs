use bitflags::bitflags;

bitflags! {
    /// Sample layout tag passed to the host with every submission.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SampleFormat: u8 {
        const STEREO = 1 << 0;
        const BITS_16 = 1 << 1;
        const SIGNED = 1 << 2;
    }
}

impl SampleFormat {
    pub const MONO_S16: Self = Self::BITS_16.union(Self::SIGNED);
    pub const STEREO_S16: Self = Self::MONO_S16.union(Self::STEREO);

    pub fn channels(self) -> usize {
        if self.contains(Self::STEREO) { 2 } else { 1 }
    }

    pub fn bytes_per_sample(self) -> usize {
        if self.contains(Self::BITS_16) { 2 } else { 1 }
    }
}

impl Default for SampleFormat {
    fn default() -> Self {
        Self::MONO_S16
    }
}
