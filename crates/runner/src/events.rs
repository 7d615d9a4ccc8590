use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum RunnerEvent {
    StreamOpened { path: PathBuf },
    StreamFinished { bytes: u64 },
    Resynced { stalled_ticks: u64 },
    Error { message: String },
}
