//! Byte sources polled by the tokenizer.
//!
//! A [`ByteSource`] is the character-oriented transport (a UART, a USB CDC
//! endpoint, a test script). Both operations must return immediately: the
//! tokenizer only consumes what is already available and never waits.
//!
//! If bytes are delivered from an interrupt, the source itself is responsible
//! for synchronising the producer side. The tokenizer treats it as a plain
//! non-blocking queue.

use heapless::Deque;

/// Non-blocking, polled byte transport.
pub trait ByteSource {
    /// Returns `true` if at least one byte can be read without waiting.
    fn has_bytes(&mut self) -> bool;

    /// Reads the next byte.
    ///
    /// Only called after [`has_bytes`](Self::has_bytes) returned `true`.
    fn read_byte(&mut self) -> u8;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn has_bytes(&mut self) -> bool {
        (**self).has_bytes()
    }

    fn read_byte(&mut self) -> u8 {
        (**self).read_byte()
    }
}

/// Fixed-capacity ring buffer, typically filled from a receive interrupt.
impl<const N: usize> ByteSource for Deque<u8, N> {
    fn has_bytes(&mut self) -> bool {
        !self.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.pop_front().unwrap_or_default()
    }
}

#[cfg(feature = "std")]
impl ByteSource for std::collections::VecDeque<u8> {
    fn has_bytes(&mut self) -> bool {
        !self.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.pop_front().unwrap_or_default()
    }
}

/// A source that replays a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Number of bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

impl ByteSource for SliceSource<'_> {
    fn has_bytes(&mut self) -> bool {
        self.pos < self.bytes.len()
    }

    fn read_byte(&mut self) -> u8 {
        let byte = self.bytes.get(self.pos).copied().unwrap_or_default();
        self.pos += 1;
        byte
    }
}

/// Adapter for `embedded-io` peripherals.
///
/// `has_bytes` asks the peripheral whether a read would complete immediately
/// and, if so, latches one byte. Transport errors are reported as "no bytes
/// available"; the next poll asks again.
#[cfg(feature = "embedded-io")]
pub struct IoSource<R> {
    inner: R,
    latched: Option<u8>,
}

#[cfg(feature = "embedded-io")]
impl<R> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            latched: None,
        }
    }

    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "embedded-io")]
impl<R> ByteSource for IoSource<R>
where
    R: embedded_io::Read + embedded_io::ReadReady,
{
    fn has_bytes(&mut self) -> bool {
        if self.latched.is_none() && self.inner.read_ready().unwrap_or(false) {
            let mut byte = [0u8; 1];
            if let Ok(1) = self.inner.read(&mut byte) {
                self.latched = Some(byte[0]);
            }
        }
        self.latched.is_some()
    }

    fn read_byte(&mut self) -> u8 {
        self.latched.take().unwrap_or_default()
    }
}

// ==================== TESTS =======================

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<S: ByteSource>(mut source: S) -> std::vec::Vec<u8> {
        let mut out = std::vec::Vec::new();
        while source.has_bytes() {
            out.push(source.read_byte());
        }
        out
    }

    #[test]
    fn test_slice_source_replays_bytes() {
        let mut source = SliceSource::new(b"AB");
        assert_eq!(source.remaining(), 2);
        assert!(source.has_bytes());
        assert_eq!(source.read_byte(), b'A');
        assert_eq!(source.remaining(), 1);
        assert_eq!(drain(&mut source), b"B");
        assert!(!source.has_bytes());
    }

    #[test]
    fn test_deque_source_is_fifo() {
        let mut queue: Deque<u8, 8> = Deque::new();
        for b in b"xyz" {
            queue.push_back(*b).unwrap();
        }
        assert_eq!(drain(&mut queue), b"xyz");
        assert!(!queue.has_bytes());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_vecdeque_source() {
        let queue: std::collections::VecDeque<u8> = b"ok\n".iter().copied().collect();
        assert_eq!(drain(queue), b"ok\n");
    }

    #[cfg(feature = "embedded-io")]
    mod io {
        use super::super::*;

        struct Uart {
            rx: &'static [u8],
            ready: bool,
        }

        impl embedded_io::ErrorType for Uart {
            type Error = core::convert::Infallible;
        }

        impl embedded_io::Read for Uart {
            fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
                let n = buf.len().min(self.rx.len());
                buf[..n].copy_from_slice(&self.rx[..n]);
                self.rx = &self.rx[n..];
                Ok(n)
            }
        }

        impl embedded_io::ReadReady for Uart {
            fn read_ready(&mut self) -> Result<bool, Self::Error> {
                Ok(self.ready && !self.rx.is_empty())
            }
        }

        #[test]
        fn test_io_source_latches_one_byte() {
            let mut source = IoSource::new(Uart {
                rx: b"hi",
                ready: true,
            });
            assert!(source.has_bytes());
            // asking twice must not consume a second byte
            assert!(source.has_bytes());
            assert_eq!(source.read_byte(), b'h');
            assert_eq!(source.read_byte(), 0);
            assert!(source.has_bytes());
            assert_eq!(source.read_byte(), b'i');
            assert!(!source.has_bytes());
        }

        #[test]
        fn test_io_source_respects_read_ready() {
            let mut source = IoSource::new(Uart {
                rx: b"x",
                ready: false,
            });
            assert!(!source.has_bytes());
            source.inner_mut().ready = true;
            assert!(source.has_bytes());
            assert_eq!(source.read_byte(), b'x');
        }
    }
}
