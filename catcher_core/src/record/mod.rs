//! Records and the buffer that assembles them.

mod buffer;

pub use buffer::{MIN_CAPACITY, RecordBuffer};

use crate::config::{DEFAULT_SEPARATOR, DEFAULT_TERMINATOR};

/// The two framing characters of the stream.
///
/// If both are set to the same byte, the terminator wins and records never
/// carry a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Delimiters {
    /// Splits the command from its parameter (first occurrence only).
    pub separator: u8,
    /// Ends a record.
    pub terminator: u8,
}

impl Delimiters {
    pub const fn new(separator: u8, terminator: u8) -> Self {
        Self {
            separator,
            terminator,
        }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR, DEFAULT_TERMINATOR)
    }
}

/// A borrowed view of a completed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'r> {
    pub command: &'r str,
    /// Empty when the record had no separator.
    pub parameter: &'r str,
    /// Set when the record was cut short because it did not fit the buffer.
    pub overrun: bool,
}

/// Outcome of one [`RecordBuffer::fill`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fill {
    /// No record is ready; a partial record may be buffered.
    Pending,
    /// A record became ready during this pass.
    Completed,
    /// A record was already ready and no new payload byte arrived.
    Held,
}

impl Fill {
    /// Whether a record is ready after the pass.
    pub fn is_ready(self) -> bool {
        !matches!(self, Fill::Pending)
    }
}
