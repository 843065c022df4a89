//! Outward-facing log sink.
//!
//! The completion source reports progress (initialisation, per-file tag
//! counts, tagger diagnostics) through a [`CompletionLog`]. Hosts decide
//! where the messages go; by default they are forwarded to `tracing`.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

/// Fire-and-forget message sink.
///
/// Implementations must not block for long and must not fail.
pub trait CompletionLog {
    /// Records one message.
    fn log(&self, message: &str);
}

impl<T: CompletionLog + ?Sized> CompletionLog for &T {
    fn log(&self, message: &str) {
        (**self).log(message);
    }
}

impl<T: CompletionLog + ?Sized> CompletionLog for Arc<T> {
    fn log(&self, message: &str) {
        (**self).log(message);
    }
}

/// Forwards messages to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl CompletionLog for TracingLog {
    fn log(&self, message: &str) {
        info!("{}", message);
    }
}

/// Buffers messages in memory so a host can drain them later.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MemoryLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all buffered messages.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Removes and returns all buffered messages.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }
}

impl CompletionLog for MemoryLog {
    fn log(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_log_shares_buffer_between_clones() {
        let log = MemoryLog::new();
        let handle = log.clone();

        log.log("one");
        handle.log("two");

        assert_eq!(log.messages(), vec!["one", "two"]);
        assert_eq!(handle.drain(), vec!["one", "two"]);
        assert!(log.messages().is_empty());
    }

    #[test]
    fn test_log_through_references() {
        fn emit(sink: impl CompletionLog, message: &str) {
            sink.log(message);
        }

        let log = MemoryLog::new();
        let shared: Arc<dyn CompletionLog> = Arc::new(log.clone());

        emit(&log, "by ref");
        emit(shared, "by arc");

        assert_eq!(log.messages(), vec!["by ref", "by arc"]);
    }
}
