mod service;
mod tick;

pub use service::{TimerId, TimerService};
pub use tick::TickAccumulator;
