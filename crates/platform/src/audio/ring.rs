use super::AudioError;

/// Application-owned circular sample buffer, the software stand-in for a
/// sound card's DMA region.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    samples: Vec<i16>,
    write_cursor: usize,
    total_submitted: u64,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0; capacity],
            write_cursor: 0,
            total_submitted: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    pub fn set_write_cursor(&mut self, cursor: usize) -> Result<(), AudioError> {
        if cursor >= self.capacity() {
            return Err(AudioError::CursorOutOfRange {
                cursor,
                capacity: self.capacity(),
            });
        }
        self.write_cursor = cursor;
        Ok(())
    }

    pub fn total_submitted(&self) -> u64 {
        self.total_submitted
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [i16] {
        &mut self.samples
    }

    /// Writes `data` starting at `offset`, wrapping at capacity.
    pub fn write_wrapped(&mut self, offset: usize, data: &[i16]) {
        let capacity = self.capacity();
        if capacity == 0 {
            return;
        }
        for (i, &sample) in data.iter().enumerate() {
            self.samples[(offset + i) % capacity] = sample;
        }
    }

    pub(crate) fn chunk_at_cursor(&self, len: usize) -> RingChunk<'_> {
        RingChunk {
            ring: &self.samples,
            start: self.write_cursor,
            len,
        }
    }

    /// Moves the cursor forward, returning true if it wrapped.
    pub(crate) fn advance(&mut self, len: usize) -> bool {
        let capacity = self.capacity();
        self.write_cursor += len;
        self.total_submitted += len as u64;
        if self.write_cursor >= capacity {
            self.write_cursor -= capacity;
            true
        } else {
            false
        }
    }
}

/// A window of `len` samples starting at `start`, wrapping at the ring's
/// capacity.
#[derive(Debug, Clone, Copy)]
pub struct RingChunk<'a> {
    ring: &'a [i16],
    start: usize,
    len: usize,
}

impl<'a> RingChunk<'a> {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn ring_capacity(&self) -> usize {
        self.ring.len()
    }

    pub fn wraps(&self) -> bool {
        self.start + self.len > self.ring.len()
    }

    /// The chunk as at most two contiguous slices, in playback order.
    pub fn as_slices(&self) -> (&'a [i16], &'a [i16]) {
        let capacity = self.ring.len();
        let end = self.start + self.len;
        if end <= capacity {
            (&self.ring[self.start..end], &[])
        } else {
            (&self.ring[self.start..], &self.ring[..end - capacity])
        }
    }

    pub fn iter(self) -> impl Iterator<Item = i16> + 'a {
        let (head, tail) = self.as_slices();
        head.iter().chain(tail.iter()).copied()
    }

    pub fn copy_to(&self, out: &mut Vec<i16>) {
        let (head, tail) = self.as_slices();
        out.extend_from_slice(head);
        out.extend_from_slice(tail);
    }
}
