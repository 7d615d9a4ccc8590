pub mod audio;
pub mod config;
pub mod host;
pub mod net;
pub mod stream;
pub mod timer;

pub use audio::{
    AudioError, AudioRingBridge, AudioSink, AudioStats, RingBuffer, RingChunk, SampleFormat,
    SimulatedSink, Submit,
};
pub use config::{AudioConfig, PlatformConfig};
pub use host::{DEFAULT_TICK_HZ, ManualClock, MonotonicClock, Pause, ThreadPause, TickSource};
pub use net::{
    CMD_GET, CMD_SEND, CommandDispatcher, CommandError, LoopbackTransport, NetCommand, NetConfig,
    Transport, TransportStats,
};
pub use stream::{StreamError, StreamingCache};
pub use timer::{TickAccumulator, TimerId, TimerService};
