#![no_std]

/// Storage ceiling of the record buffer, in bytes.
pub const RECORD_STORAGE: usize = 32;

/// Runtime record capacity; one byte is reserved for the terminator.
pub const RECORD_CAPACITY: usize = 24;

/// Listener ceiling and runtime listener limit.
pub const MAX_LISTENERS: usize = 4;

pub const SEPARATOR: u8 = b' ';
pub const TERMINATOR: u8 = b'\n';

/// Capacity of router error messages.
pub const MESSAGE_SIZE: usize = 48;

/// Bytes released by the simulated line per tick.
pub const LINE_BURST: usize = 5;
