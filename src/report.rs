//! Event sinks for pipeline progress messages
//!
//! Pipeline stages report through an injected [`EventSink`] instead of the
//! global logger, so a run can be observed (and tested) without touching
//! process-wide logging state.

use log::Level;
use std::sync::Mutex;

/// Receiver for progress and diagnostic messages emitted by pipeline stages
pub trait EventSink: Send + Sync {
    /// Record a single message at the given level
    fn emit(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }
}

/// Sink that forwards every event to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, level: Level, message: &str) {
        log::log!(level, "{}", message);
    }
}

/// Sink that keeps every event in memory
///
/// # Example
/// ```
/// use tabmerge::report::{EventSink, RecordingSink};
///
/// let sink = RecordingSink::new();
/// sink.warn("Cannot rename non-existent: [\"zip\"]");
/// assert!(sink.contains(log::Level::Warn, "zip"));
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(Level, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events in emission order
    pub fn events(&self) -> Vec<(Level, String)> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages recorded at exactly `level`
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    /// True if any message at `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.messages(level).iter().any(|m| m.contains(needle))
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, level: Level, message: &str) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push((level, message.to_string()));
    }
}
