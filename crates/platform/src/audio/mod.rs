mod bridge;
mod format;
mod ring;
mod simulator;
mod sink;

pub use bridge::{AudioRingBridge, AudioStats, DEFAULT_QUANTUM, check_alignment};
pub use format::SampleFormat;
pub use ring::{RingBuffer, RingChunk};
pub use simulator::SimulatedSink;
pub use sink::{AudioSink, Submit};

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("ring capacity {capacity} is not a non-zero multiple of quantum {quantum}")]
    Misaligned { capacity: usize, quantum: usize },
    #[error("write cursor {cursor} outside ring of {capacity} samples")]
    CursorOutOfRange { cursor: usize, capacity: usize },
    #[error("quantum {quantum} does not hold whole {channels}-channel frames")]
    SplitFrame { quantum: usize, channels: usize },
}
