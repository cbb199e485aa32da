//! Named logger handles

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use super::facade::FacadeShared;
use super::formatter;
use super::severity::Severity;
use super::value::LogValue;

/// A handle bound to one logger name.
///
/// Handles are created by [`Facade::logger`](super::facade::Facade::logger)
/// and cached, one per distinct name. A handle owns nothing but its name and
/// an advisory threshold snapshot; the snapshot is re-derived whenever the
/// facade's config is replaced, so handles never serve stale thresholds.
pub struct Logger {
    name: String,
    shared: Arc<FacadeShared>,
    cached_epoch: AtomicU64,
    cached_threshold: AtomicU8,
}

macro_rules! leveled {
    ($severity:expr, $plain:ident, $with:ident, $err:ident) => {
        #[inline]
        pub fn $plain(&self, message: &str) {
            self.log($severity, Some(message), Vec::new());
        }

        /// Template form; arguments substitute into `{}` placeholders.
        #[inline]
        pub fn $with(&self, template: &str, args: Vec<LogValue>) {
            self.log($severity, Some(template), args);
        }

        /// Message plus an error value.
        #[inline]
        pub fn $err<E>(&self, message: &str, error: E)
        where
            E: std::error::Error + Send + Sync + 'static,
        {
            self.log($severity, Some(message), vec![LogValue::error(error)]);
        }
    };
}

impl Logger {
    pub(crate) fn new(name: String, shared: Arc<FacadeShared>) -> Self {
        let epoch = shared.epoch();
        let threshold = shared.current_config().threshold_for(&name);
        Self {
            name,
            shared,
            cached_epoch: AtomicU64::new(epoch),
            cached_threshold: AtomicU8::new(threshold as u8),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effective threshold, re-resolved after a config replacement.
    pub fn threshold(&self) -> Severity {
        let epoch = self.shared.epoch();
        if self.cached_epoch.load(Ordering::Acquire) == epoch {
            return Severity::from_ordinal(self.cached_threshold.load(Ordering::Acquire));
        }

        let threshold = self.shared.current_config().threshold_for(&self.name);
        self.cached_threshold
            .store(threshold as u8, Ordering::Release);
        self.cached_epoch.store(epoch, Ordering::Release);
        threshold
    }

    /// True when an event at `severity` would be emitted.
    #[inline]
    pub fn loggable(&self, severity: Severity) -> bool {
        severity.passes(self.threshold())
    }

    /// The general entry point all leveled calls reduce to.
    ///
    /// A `None` template renders no message, and events without a message
    /// are never dispatched, even when an error argument was supplied.
    pub fn log(&self, severity: Severity, template: Option<&str>, args: Vec<LogValue>) {
        if !self.loggable(severity) {
            return;
        }

        let formatted = formatter::format(template, args);
        self.shared.dispatch(severity, &self.name, formatted);
    }

    /// Log an error value without a message.
    pub fn caught<E>(&self, severity: Severity, error: E)
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.log(severity, None, vec![LogValue::error(error)]);
    }

    leveled!(Severity::Error, error, error_with, error_err);
    leveled!(Severity::Warn, warn, warn_with, warn_err);
    leveled!(Severity::Info, info, info_with, info_err);
    leveled!(Severity::Debug, debug, debug_with, debug_err);
    leveled!(Severity::Trace, trace, trace_with, trace_err);
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("threshold", &self.threshold())
            .finish()
    }
}
