use super::format::SampleFormat;
use super::ring::RingChunk;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
    Accepted,
    /// The sink has no room right now. Not an error.
    WouldBlock,
}

impl Submit {
    pub fn is_accepted(self) -> bool {
        self == Submit::Accepted
    }
}

/// Non-blocking audio submission primitive provided by the host.
pub trait AudioSink {
    fn submit(&mut self, format: SampleFormat, chunk: RingChunk<'_>) -> Submit;
}

impl<T: AudioSink + ?Sized> AudioSink for &mut T {
    fn submit(&mut self, format: SampleFormat, chunk: RingChunk<'_>) -> Submit {
        (**self).submit(format, chunk)
    }
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn submit(&mut self, format: SampleFormat, chunk: RingChunk<'_>) -> Submit {
        (**self).submit(format, chunk)
    }
}
