//! Injected diagnostic sink.
//!
//! The catcher reports what happens to it through a [`Diagnostics`]
//! implementation chosen by the owner. Every method has a no-op default, so a
//! sink only implements the events it cares about.
//!
//! | Sink | Feature | Output |
//! |------|---------|--------|
//! | [`NoDiagnostics`] | - | nothing |
//! | `TracingDiagnostics` | `tracing` | `tracing` events |
//! | `DefmtDiagnostics` | `defmt` | `defmt` log frames |

use crate::error::SetupError;
use crate::record::Record;

pub trait Diagnostics {
    /// Setup failed; the catcher stays inert.
    fn setup_failed(&mut self, _error: &SetupError) {}

    /// A record is about to be dispatched.
    fn record_ready(&mut self, _record: &Record<'_>) {}

    /// A record exceeded the buffer and was truncated.
    fn overrun(&mut self, _capacity: usize) {}

    /// A listener was dropped because the registry is full.
    fn listener_rejected(&mut self, _limit: usize) {}

    /// The current record was closed.
    fn closed(&mut self) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn setup_failed(&mut self, error: &SetupError) {
        (**self).setup_failed(error);
    }

    fn record_ready(&mut self, record: &Record<'_>) {
        (**self).record_ready(record);
    }

    fn overrun(&mut self, capacity: usize) {
        (**self).overrun(capacity);
    }

    fn listener_rejected(&mut self, limit: usize) {
        (**self).listener_rejected(limit);
    }

    fn closed(&mut self) {
        (**self).closed();
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {}

#[cfg(feature = "tracing")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

#[cfg(feature = "tracing")]
impl Diagnostics for TracingDiagnostics {
    fn setup_failed(&mut self, error: &SetupError) {
        tracing::error!("command catcher setup failed: {}", error);
    }

    fn record_ready(&mut self, record: &Record<'_>) {
        tracing::debug!(
            command = record.command,
            parameter = record.parameter,
            overrun = record.overrun,
            "record ready"
        );
    }

    fn overrun(&mut self, capacity: usize) {
        tracing::warn!("record exceeded {} bytes, truncated", capacity - 1);
    }

    fn listener_rejected(&mut self, limit: usize) {
        tracing::warn!("listener dropped, registry holds {} entries", limit);
    }

    fn closed(&mut self) {
        tracing::trace!("record closed");
    }
}

#[cfg(feature = "defmt")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DefmtDiagnostics;

#[cfg(feature = "defmt")]
impl Diagnostics for DefmtDiagnostics {
    fn setup_failed(&mut self, error: &SetupError) {
        defmt::error!("command catcher setup failed: {}", error);
    }

    fn record_ready(&mut self, record: &Record<'_>) {
        defmt::debug!(
            "record ready: {=str} / {=str} (overrun={=bool})",
            record.command,
            record.parameter,
            record.overrun
        );
    }

    fn overrun(&mut self, capacity: usize) {
        defmt::warn!("record exceeded {} bytes, truncated", capacity - 1);
    }

    fn listener_rejected(&mut self, limit: usize) {
        defmt::warn!("listener dropped, registry holds {} entries", limit);
    }

    fn closed(&mut self) {
        defmt::trace!("record closed");
    }
}
