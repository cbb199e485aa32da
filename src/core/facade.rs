//! The facade: logger cache, config replacement and multi-sink dispatch

use parking_lot::RwLock;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::config::Config;
use super::formatter::Formatted;
use super::logger::Logger;
use super::severity::Severity;
use super::sink::Sink;
use super::source::ConfigSource;
use super::tag::encode_tag;

/// Application-lifetime logging context.
///
/// Owns the current [`Config`] snapshot and the logger-handle cache, and
/// fans events out to the configured sinks. There is no process-wide
/// instance; callers construct one and pass it (or logger handles obtained
/// from it) to the code that logs, which keeps tests isolated.
///
/// # Example
/// ```
/// use taglog::prelude::*;
/// use taglog::sinks::MemorySink;
///
/// let capture = MemorySink::new();
/// let facade = Facade::new(
///     Config::builder()
///         .global_threshold(Severity::Debug)
///         .sink(capture.clone())
///         .build(),
/// );
///
/// let logger = facade.logger("com.example.Server");
/// logger.info_with("listening on port {}", vec![LogValue::from(8080u32)]);
///
/// assert_eq!(capture.events()[0].message, "listening on port 8080");
/// ```
#[derive(Clone)]
pub struct Facade {
    shared: Arc<FacadeShared>,
}

pub(crate) struct FacadeShared {
    config: RwLock<Arc<Config>>,
    /// Bumped on every config replacement; logger handles use it to detect
    /// stale threshold snapshots.
    epoch: AtomicU64,
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
}

impl Facade {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            shared: Arc::new(FacadeShared {
                config: RwLock::new(Arc::new(config)),
                epoch: AtomicU64::new(0),
                loggers: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Construct from a config source.
    pub fn from_source(source: &dyn ConfigSource) -> crate::core::error::Result<Self> {
        Ok(Self::new(source.load()?))
    }

    /// Get or create the handle for `name`.
    ///
    /// Idempotent and safe under races: two threads creating the same name
    /// simultaneously both get a valid handle, and exactly one instance is
    /// published for subsequent lookups.
    pub fn logger(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.shared.loggers.read().get(name) {
            return Arc::clone(logger);
        }

        let created = Arc::new(Logger::new(name.to_string(), Arc::clone(&self.shared)));
        let mut loggers = self.shared.loggers.write();
        // First writer wins; a racing loser's instance is discarded.
        Arc::clone(loggers.entry(name.to_string()).or_insert(created))
    }

    /// Replace the whole config snapshot atomically.
    ///
    /// Concurrent dispatches keep using whichever snapshot they already
    /// captured; cached logger thresholds are re-derived on their next call.
    pub fn replace_config(&self, config: Config) {
        *self.shared.config.write() = Arc::new(config);
        self.shared.epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// Append a sink to the current config.
    ///
    /// The sink receives its effective tag pattern before it becomes
    /// visible to dispatch, like sinks attached at build time. Implemented
    /// as a snapshot replacement, so it is safe to call while other threads
    /// dispatch.
    pub fn register_sink<S: Sink + 'static>(&self, mut sink: S) {
        let mut guard = self.shared.config.write();
        let mut next = (**guard).clone();
        let pattern = next.pattern_for(sink.name()).clone();
        sink.set_tag_pattern(pattern);
        next.push_sink(Arc::new(sink));
        *guard = Arc::new(next);
        self.shared.epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// Current config snapshot.
    pub fn config(&self) -> Arc<Config> {
        self.shared.current_config()
    }
}

impl Default for Facade {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl FacadeShared {
    pub(crate) fn current_config(&self) -> Arc<Config> {
        Arc::clone(&self.config.read())
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Fan a formatted event out to every sink.
    ///
    /// Each sink gets a tag encoded from its own effective pattern, and each
    /// emit is isolated: a panicking sink is reported to stderr and the
    /// remaining sinks still receive the event.
    pub(crate) fn dispatch(&self, severity: Severity, logger_name: &str, formatted: Formatted) {
        let Some(message) = formatted.message else {
            // Null payloads are never dispatched.
            return;
        };

        let config = self.current_config();
        for sink in config.sinks() {
            let pattern = config.pattern_for(sink.name());
            let tag = encode_tag(pattern, severity, logger_name, None);

            let emit_result = catch_unwind(AssertUnwindSafe(|| {
                sink.emit(severity, &tag, &message, formatted.error.as_ref())
            }));

            if let Err(panic_info) = emit_result {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                };
                eprintln!(
                    "[taglog] sink '{}' panicked: {}. Other sinks continue to function.",
                    sink.name(),
                    panic_msg
                );
            }
        }
    }
}
