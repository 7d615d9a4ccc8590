use std::path::PathBuf;

use retroport::PlatformConfig;

#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub platform: PlatformConfig,
    pub game_hz: u32,
    pub music_hz: u32,
    pub tone_hz: u32,
    pub sink_queue: usize,
    pub stream: Option<PathBuf>,
    pub stream_window: usize,
    pub stall_ticks: u64,
    pub max_frames: Option<u64>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            platform: PlatformConfig::default(),
            game_hz: 35,
            music_hz: 140,
            tone_hz: 440,
            sink_queue: 4096,
            stream: None,
            stream_window: 4096,
            stall_ticks: 250,
            max_frames: None,
        }
    }
}
