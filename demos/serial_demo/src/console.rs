use catcher_core::{Diagnostics, Record, SetupError};

/// Prints catcher events to stdout.
#[derive(Debug, Default)]
pub struct ConsoleDiagnostics {
    pub overruns: usize,
}

impl Diagnostics for ConsoleDiagnostics {
    fn setup_failed(&mut self, error: &SetupError) {
        println!("❌ setup failed: {}", error);
    }

    fn record_ready(&mut self, record: &Record<'_>) {
        println!("📥 '{}' '{}'", record.command, record.parameter);
    }

    fn overrun(&mut self, capacity: usize) {
        self.overruns += 1;
        println!("❗ record longer than {} bytes, truncated", capacity - 1);
    }

    fn listener_rejected(&mut self, limit: usize) {
        println!("❗ listener dropped, limit is {}", limit);
    }
}
