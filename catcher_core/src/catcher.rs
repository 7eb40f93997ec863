//! The polling facade tying a byte source, a record buffer and the listeners
//! together.

use crate::config::{DEFAULT_CAPACITY, DEFAULT_MAX_LISTENERS};
use crate::diagnostics::{Diagnostics, NoDiagnostics};
use crate::error::SetupError;
use crate::listener::{CommandListener, Listener, ListenerFn, ListenerRegistry};
use crate::record::{Delimiters, Fill, Record, RecordBuffer};
use crate::source::ByteSource;

/// Receives `(command, parameter)` records from a serial byte stream.
///
/// `CommandCatcher` is driven by an external loop calling [`poll`](Self::poll).
/// Each call reads whatever bytes the source has, and when a record completes
/// every registered listener is notified exactly once. Records can also be
/// consumed pull-style with `poll(false)`, [`is_ready`](Self::is_ready),
/// [`command`](Self::command), [`parameter`](Self::parameter) and
/// [`close`](Self::close).
///
/// Until [`setup`](Self::setup) succeeds the catcher is inert: polling and
/// the accessors do nothing.
///
/// # Type Parameters
/// - `S`: Byte source.
/// - `N`: Record storage ceiling in bytes.
/// - `L`: Listener ceiling.
/// - `D`: Diagnostic sink, [`NoDiagnostics`] by default.
///
/// # Example
/// ```
/// let mut catcher: DefaultCatcher<'_, SliceSource<'_>> = CommandCatcher::new();
/// catcher.add_function(on_command);
/// catcher.setup(SliceSource::new(b"led on\n"), 16, 4)?;
/// catcher.poll(true);
/// ```
pub struct CommandCatcher<'a, S, const N: usize, const L: usize, D = NoDiagnostics> {
    source: Option<S>,
    buffer: Option<RecordBuffer<N>>,
    delimiters: Delimiters,
    listeners: ListenerRegistry<'a, L>,
    diagnostics: D,
}

/// A catcher with the classic sizing: 16 byte records, four listeners.
pub type DefaultCatcher<'a, S, D = NoDiagnostics> =
    CommandCatcher<'a, S, { DEFAULT_CAPACITY }, { DEFAULT_MAX_LISTENERS }, D>;

impl<'a, S: ByteSource, const N: usize, const L: usize> CommandCatcher<'a, S, N, L> {
    pub fn new() -> Self {
        Self::with_diagnostics(NoDiagnostics)
    }
}

impl<'a, S: ByteSource, const N: usize, const L: usize> Default for CommandCatcher<'a, S, N, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: ByteSource, const N: usize, const L: usize, D: Diagnostics> CommandCatcher<'a, S, N, L, D> {
    /// Creates an inert catcher reporting to `diagnostics`.
    pub fn with_diagnostics(diagnostics: D) -> Self {
        Self {
            source: None,
            buffer: None,
            delimiters: Delimiters::default(),
            listeners: ListenerRegistry::new(),
            diagnostics,
        }
    }

    /// Attaches the byte source and sizes the record buffer.
    ///
    /// `capacity` bytes are reserved per record, one of them for the
    /// terminator, and at most `max_listeners` listeners (never more than `L`)
    /// are accepted.
    ///
    /// Calling `setup` again replaces the source and discards any partial
    /// record; registered listeners are kept. On failure the catcher is left
    /// inert and every later `poll` is a no-op.
    pub fn setup(&mut self, source: S, capacity: usize, max_listeners: usize) -> Result<(), SetupError> {
        self.source = Some(source);
        self.buffer = None;
        self.listeners.set_limit(max_listeners);

        match RecordBuffer::with_capacity(capacity) {
            Ok(buffer) => {
                self.buffer = Some(buffer);
                Ok(())
            }
            Err(error) => {
                self.diagnostics.setup_failed(&error);
                Err(error)
            }
        }
    }

    /// Returns `true` once `setup` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.buffer.is_some()
    }

    /// Sets the command/parameter separator. Applies to the record in progress.
    pub fn set_separator(&mut self, separator: u8) {
        self.delimiters.separator = separator;
    }

    /// Sets the record terminator. Applies to the record in progress.
    pub fn set_terminator(&mut self, terminator: u8) {
        self.delimiters.terminator = terminator;
    }

    pub fn set_delimiters(&mut self, delimiters: Delimiters) {
        self.delimiters = delimiters;
    }

    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// Adds a listener. Listeners beyond the limit are silently dropped.
    ///
    /// Listeners may be registered before `setup`.
    pub fn register(&mut self, listener: Listener<'a>) {
        if !self.listeners.register(listener) {
            self.diagnostics.listener_rejected(self.listeners.limit());
        }
    }

    /// Adds a free function listener.
    pub fn add_function(&mut self, listener: ListenerFn) {
        self.register(Listener::Function(listener));
    }

    /// Adds an object listener.
    pub fn add_listener(&mut self, listener: &'a dyn CommandListener) {
        self.register(Listener::Object(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Runs one accumulation/dispatch cycle.
    ///
    /// Reads available bytes until a record completes. A completed record is
    /// dispatched to every listener once; with `auto_close` it is then
    /// discarded, otherwise it stays readable until [`close`](Self::close) or
    /// until the next incoming byte replaces it.
    pub fn poll(&mut self, auto_close: bool) {
        let (Some(source), Some(buffer)) = (self.source.as_mut(), self.buffer.as_mut()) else {
            return;
        };

        if buffer.fill(source, self.delimiters) != Fill::Completed {
            return;
        }

        if let Some(record) = buffer.record() {
            if record.overrun {
                self.diagnostics.overrun(buffer.capacity());
            }
            self.diagnostics.record_ready(&record);
            self.listeners.dispatch_all(record.command, record.parameter);
        }

        if auto_close {
            buffer.reset();
            self.diagnostics.closed();
        }
    }

    /// Discards the current record, complete or not.
    pub fn close(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.reset();
            self.diagnostics.closed();
        }
    }

    /// Returns `true` if a record is waiting to be read.
    pub fn is_ready(&self) -> bool {
        self.buffer.as_ref().is_some_and(RecordBuffer::is_ready)
    }

    /// Returns `true` if the ready record was truncated to fit the buffer.
    pub fn is_overrun(&self) -> bool {
        self.buffer.as_ref().is_some_and(RecordBuffer::is_overrun)
    }

    /// The command of the ready record, or `""`.
    pub fn command(&self) -> &str {
        self.buffer.as_ref().map_or("", RecordBuffer::command)
    }

    /// The parameter of the ready record, or `""`.
    pub fn parameter(&self) -> &str {
        self.buffer.as_ref().map_or("", RecordBuffer::parameter)
    }

    pub fn record(&self) -> Option<Record<'_>> {
        self.buffer.as_ref().and_then(RecordBuffer::record)
    }

    /// The attached source, e.g. to push bytes into a software queue.
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut D {
        &mut self.diagnostics
    }
}

// ==================== TESTS =======================
