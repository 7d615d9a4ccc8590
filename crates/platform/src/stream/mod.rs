mod cache;

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

pub use cache::StreamingCache;

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to allocate a {requested} byte stream window")]
    Alloc {
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}
