#[cfg(feature = "heap-record-buffer")]
use alloc::vec::Vec;

use super::{Delimiters, Fill, Record};
use crate::error::SetupError;
use crate::source::ByteSource;

/// Smallest usable capacity: one payload byte plus the reserved sentinel slot.
pub const MIN_CAPACITY: usize = 2;

/// A fixed-capacity byte buffer that folds a byte stream into records.
///
/// `RecordBuffer` is the tokenizer state machine. Bytes are appended until the
/// terminator arrives; the first separator splits the record into a command
/// and a parameter. Both are handed out as slices into the owned storage, so a
/// view can never outlive a [`reset`](Self::reset).
///
/// Storage layout while a record is ready:
///
/// ```text
/// [ command bytes | 0 | parameter bytes | 0 | ... ]
///   0 .. split      ^split  split+1 .. len  ^len
/// ```
///
/// One byte of the capacity is always kept free for the sentinel written at
/// `len`, so at most `capacity - 1` bytes of a record are kept.
///
/// # Type Parameters
/// - `N`: Storage ceiling. The runtime capacity is chosen at construction and
///   never exceeds `N`.
pub struct RecordBuffer<const N: usize> {
    #[cfg(feature = "heap-record-buffer")]
    storage: Vec<u8>,
    #[cfg(not(feature = "heap-record-buffer"))]
    storage: [u8; N],
    capacity: usize,
    length: usize,
    split: Option<usize>,
    ready: bool,
    overrun: bool,
    discarding: bool,
}

impl<const N: usize> RecordBuffer<N> {
    /// Creates an empty buffer holding records of up to `capacity - 1` bytes.
    ///
    /// Fails if `capacity` is below [`MIN_CAPACITY`], larger than `N`, or (with
    /// the `heap-record-buffer` feature) if the allocation is refused.
    ///
    /// # Example
    /// ```
    /// let buf = RecordBuffer::<32>::with_capacity(16)?;
    /// assert_eq!(buf.capacity(), 16);
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, SetupError> {
        if capacity < MIN_CAPACITY {
            return Err(SetupError::CapacityTooSmall {
                requested: capacity,
                minimum: MIN_CAPACITY,
            });
        }
        if capacity > N {
            return Err(SetupError::CapacityExceedsStorage {
                requested: capacity,
                available: N,
            });
        }

        #[cfg(feature = "heap-record-buffer")]
        let storage = {
            let mut storage = Vec::new();
            storage
                .try_reserve_exact(capacity)
                .map_err(|_| SetupError::AllocationFailed {
                    requested: capacity,
                })?;
            storage.resize(capacity, 0);
            storage
        };
        #[cfg(not(feature = "heap-record-buffer"))]
        let storage = [0u8; N];

        Ok(Self {
            storage,
            capacity,
            length: 0,
            split: None,
            ready: false,
            overrun: false,
            discarding: false,
        })
    }

    /// Drains `source` until a record completes or the source runs dry.
    ///
    /// Never blocks and never consumes bytes past the terminator of the
    /// record it completes; those stay in the source for the next pass.
    pub fn fill<S: ByteSource + ?Sized>(&mut self, source: &mut S, delimiters: Delimiters) -> Fill {
        while source.has_bytes() {
            if self.push(source.read_byte(), delimiters) {
                return Fill::Completed;
            }
        }
        if self.ready { Fill::Held } else { Fill::Pending }
    }

    /// Applies one byte to the state machine.
    ///
    /// Returns `true` if this byte completed a record.
    ///
    /// - While the tail of an overrun record is being discarded, bytes are
    ///   dropped up to and including the next terminator.
    /// - A byte arriving while a record is ready discards that record first.
    /// - Separators and terminators before the first payload byte are ignored.
    /// - The first separator marks the split; later ones are payload.
    /// - The terminator closes the record.
    /// - A payload byte that does not fit closes the record as an overrun and
    ///   starts discarding the rest of it.
    /// - A record of exactly `capacity - 1` bytes followed by its terminator
    ///   is not an overrun.
    pub fn push(&mut self, byte: u8, delimiters: Delimiters) -> bool {
        if self.discarding {
            if byte == delimiters.terminator {
                self.discarding = false;
            }
            return false;
        }

        if self.ready {
            self.reset();
        }

        if self.length == 0 && (byte == delimiters.separator || byte == delimiters.terminator) {
            return false;
        }

        if byte == delimiters.terminator {
            self.close(false);
            return true;
        }

        if self.length + 1 >= self.capacity {
            self.close(true);
            self.discarding = true;
            return true;
        }

        if byte == delimiters.separator && self.split.is_none() {
            self.split = Some(self.length);
            self.storage[self.length] = 0;
        } else {
            self.storage[self.length] = byte;
        }
        self.length += 1;
        false
    }

    fn close(&mut self, overrun: bool) {
        if self.split.is_none() {
            self.split = Some(self.length);
        }
        self.storage[self.length] = 0;
        self.ready = true;
        self.overrun = overrun;
    }

    /// Clears the current record and zeroes the storage.
    ///
    /// An overrun tail that is still being discarded stays discarded.
    pub fn reset(&mut self) {
        self.storage[..self.capacity].fill(0);
        self.length = 0;
        self.split = None;
        self.ready = false;
        self.overrun = false;
    }

    /// Returns `true` if a complete record occupies the buffer.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Returns `true` if the ready record was truncated.
    pub fn is_overrun(&self) -> bool {
        self.ready && self.overrun
    }

    /// Returns `true` while the tail of an overrun record is being dropped.
    pub fn is_discarding(&self) -> bool {
        self.discarding
    }

    /// Number of bytes accumulated for the current record, separator included.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Offset of the separator, if one has been seen in the current record.
    /// Equals [`len`](Self::len) once a record without separator is ready.
    pub fn split_index(&self) -> Option<usize> {
        self.split
    }

    /// Command bytes of the ready record; empty while no record is ready.
    pub fn command_bytes(&self) -> &[u8] {
        match (self.ready, self.split) {
            (true, Some(split)) => &self.storage[..split],
            _ => &[],
        }
    }

    /// Parameter bytes of the ready record; empty without separator.
    pub fn parameter_bytes(&self) -> &[u8] {
        match (self.ready, self.split) {
            (true, Some(split)) if split < self.length => &self.storage[split + 1..self.length],
            _ => &[],
        }
    }

    pub fn command(&self) -> &str {
        text(self.command_bytes())
    }

    pub fn parameter(&self) -> &str {
        text(self.parameter_bytes())
    }

    /// The ready record, if any.
    pub fn record(&self) -> Option<Record<'_>> {
        self.ready.then(|| Record {
            command: self.command(),
            parameter: self.parameter(),
            overrun: self.overrun,
        })
    }
}

// Non-UTF-8 input is cut at the first invalid sequence.
fn text(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    }
}

// ==================== TESTS =======================
