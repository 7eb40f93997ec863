use catcher_core::ByteSource;

/// A serial line replaying a script, a few bytes per tick.
///
/// Bytes only become readable after [`tick`](SimulatedLine::tick), which
/// mimics a UART filling its receive buffer between two polls.
pub struct SimulatedLine {
    script: &'static [u8],
    pos: usize,
    available: usize,
    burst: usize,
}

impl SimulatedLine {
    pub fn new(script: &'static [u8], burst: usize) -> Self {
        Self {
            script,
            pos: 0,
            available: 0,
            burst: burst.max(1),
        }
    }

    /// Releases the next burst of bytes.
    pub fn tick(&mut self) {
        let left = self.script.len() - self.pos - self.available;
        self.available += left.min(self.burst);
    }

    pub fn is_drained(&self) -> bool {
        self.pos >= self.script.len()
    }
}

impl ByteSource for SimulatedLine {
    fn has_bytes(&mut self) -> bool {
        self.available > 0
    }

    fn read_byte(&mut self) -> u8 {
        let byte = self.script.get(self.pos).copied().unwrap_or_default();
        self.pos += 1;
        self.available = self.available.saturating_sub(1);
        byte
    }
}

// ==================== TESTS =======================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_released_per_tick() {
        let mut line = SimulatedLine::new(b"abcdefg", 3);
        assert!(!line.has_bytes());

        line.tick();
        let mut got = Vec::new();
        while line.has_bytes() {
            got.push(line.read_byte());
        }
        assert_eq!(got, b"abc");

        line.tick();
        line.tick();
        while line.has_bytes() {
            got.push(line.read_byte());
        }
        assert_eq!(got, b"abcdefg");
        assert!(line.is_drained());

        line.tick();
        assert!(!line.has_bytes());
    }
}
