//! Incremental tokenizer for line-oriented serial commands.
//!
//! Bytes arriving from a character transport are folded into a fixed-capacity
//! buffer until a terminator completes a record. The first separator splits
//! the record into a command and a parameter, and every registered listener
//! is notified once per record:
//!
//! ```text
//! "led on\n"  ->  notify("led", "on")
//! "reset\n"   ->  notify("reset", "")
//! ```
//!
//! The crate is `no_std` and allocation free by default. It is meant for a
//! single-threaded cooperative loop that calls [`CommandCatcher::poll`] as
//! often as it can; no call ever blocks.
//!
//! # Features
//! - `std`: `ByteSource` for `VecDeque<u8>`.
//! - `heap-record-buffer`: record storage is allocated on the heap at setup.
//! - `embedded-io`: [`IoSource`](source::IoSource) adapter for UART peripherals.
//! - `tracing` / `defmt`: ready-made diagnostic sinks.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "heap-record-buffer")]
extern crate alloc;

pub mod catcher;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod listener;
pub mod record;
pub mod source;

pub use catcher::{CommandCatcher, DefaultCatcher};
pub use diagnostics::{Diagnostics, NoDiagnostics};
pub use error::SetupError;
pub use listener::{CommandListener, Listener, ListenerFn, ListenerRegistry};
pub use record::{Delimiters, Fill, Record, RecordBuffer};
pub use source::{ByteSource, SliceSource};
