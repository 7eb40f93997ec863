//! Defaults matching the classic serial command catcher.

/// Record capacity used by [`DefaultCatcher`](crate::DefaultCatcher).
pub const DEFAULT_CAPACITY: usize = 16;

/// Listener ceiling used by [`DefaultCatcher`](crate::DefaultCatcher).
pub const DEFAULT_MAX_LISTENERS: usize = 4;

pub const DEFAULT_SEPARATOR: u8 = b' ';
pub const DEFAULT_TERMINATOR: u8 = b'\n';
