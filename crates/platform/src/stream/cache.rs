use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use super::StreamError;

/// Serves fixed-size windows of a sequential source from one reused buffer.
///
/// Windows that run past the end of the source are zero-filled. Read errors
/// other than EOF are handled the same way: legacy decoders consuming these
/// windows have no recovery path of their own.
pub struct StreamingCache {
    source: Option<Box<dyn Read + Send>>,
    path: Option<PathBuf>,
    buffer: Vec<u8>,
    position: u64,
    grow_count: u32,
}

impl Default for StreamingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamingCache {
    pub fn new() -> Self {
        Self {
            source: None,
            path: None,
            buffer: Vec::new(),
            position: 0,
            grow_count: 0,
        }
    }

    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<(), StreamError> {
        self.close();

        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StreamError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Opened stream {}", path.display());
        self.source = Some(Box::new(BufReader::new(file)));
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn open_reader<R: Read + Send + 'static>(&mut self, reader: R) {
        self.close();
        self.source = Some(Box::new(reader));
    }

    /// Releases the current source. The working buffer is kept.
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            match &self.path {
                Some(path) => log::debug!("Closed stream {}", path.display()),
                None => log::debug!("Closed stream"),
            }
        }
        self.path = None;
        self.position = 0;
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Bytes consumed from the current source.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn working_capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn grow_count(&self) -> u32 {
        self.grow_count
    }

    /// Returns the next `len` bytes, zero-padded past the end of the source.
    /// The slice is valid until the next call.
    ///
    /// If the buffer cannot grow to `len` the previous buffer is kept and
    /// nothing is read.
    pub fn next(&mut self, len: usize) -> Result<&[u8], StreamError> {
        if self.buffer.len() < len {
            // Old contents are irrelevant to the next window, so no copy.
            let mut grown = Vec::new();
            grown
                .try_reserve_exact(len)
                .map_err(|source| StreamError::Alloc {
                    requested: len,
                    source,
                })?;
            grown.resize(len, 0);
            self.buffer = grown;
            self.grow_count += 1;
            log::debug!("Stream buffer grown to {} bytes", len);
        }

        let mut filled = 0;
        if let Some(source) = &mut self.source {
            while filled < len {
                match source.read(&mut self.buffer[filled..len]) {
                    Ok(0) => break,
                    Ok(n) => filled += n,
                    Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        log::warn!("Stream read failed, treating as end of stream: {}", e);
                        break;
                    }
                }
            }
        }

        self.buffer[filled..len].fill(0);
        self.position += filled as u64;

        Ok(&self.buffer[..len])
    }
}
