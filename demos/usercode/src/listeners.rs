use std::cell::Cell;

use catcher_core::CommandListener;

/// Free function listener, traces every record.
pub fn trace_record(command: &str, param: &str) {
    println!("[trace] cmd='{}' param='{}'", command, param);
}

/// Object listener that counts the records it has seen.
#[derive(Debug, Default)]
pub struct Tracer {
    seen: Cell<usize>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> usize {
        self.seen.get()
    }
}

impl CommandListener for Tracer {
    fn notify(&self, command: &str, param: &str) {
        let n = self.seen.get() + 1;
        self.seen.set(n);
        println!("[tracer #{}] cmd='{}' param='{}'", n, command, param);
    }
}

// ==================== TESTS =======================
