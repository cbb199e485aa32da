//! In-memory capture sink for tests

use parking_lot::Mutex;
use std::sync::Arc;

use crate::core::{DynError, Severity, Sink};

/// One captured event, exactly as the dispatcher handed it over.
#[derive(Clone)]
pub struct CapturedEvent {
    pub severity: Severity,
    pub tag: String,
    pub message: String,
    pub error: Option<DynError>,
}

impl std::fmt::Debug for CapturedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedEvent")
            .field("severity", &self.severity)
            .field("tag", &self.tag)
            .field("message", &self.message)
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .finish()
    }
}

/// A sink that records every event it receives.
///
/// Cloning shares the underlying buffer, so a test can keep one clone and
/// hand the other to the config builder.
#[derive(Clone)]
pub struct MemorySink {
    name: String,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::with_name("memory")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of everything captured so far.
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn emit(&self, severity: Severity, tag: &str, message: &str, error: Option<&DynError>) {
        self.events.lock().push(CapturedEvent {
            severity,
            tag: tag.to_string(),
            message: message.to_string(),
            error: error.cloned(),
        });
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_and_clear() {
        let sink = MemorySink::new();
        sink.emit(Severity::Info, "Tag", "message", None);
        sink.emit(Severity::Error, "Tag", "another", None);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.events()[1].severity, Severity::Error);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_clones_share_buffer() {
        let sink = MemorySink::new();
        let observer = sink.clone();
        sink.emit(Severity::Debug, "T", "m", None);
        assert_eq!(observer.len(), 1);
    }
}
