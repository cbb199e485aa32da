//! Crash-reporter sink
//!
//! Forwards events to a crash reporting backend through two callbacks: a
//! breadcrumb callback that receives every loggable event as a compact
//! `L/tag message` line, and an error callback that receives the error
//! values attached to events. The callbacks are the integration seam; the
//! sink itself stays free of any vendor SDK.

use std::sync::Arc;

use crate::core::{DynError, Severity, Sink};

type BreadcrumbFn = dyn Fn(String) + Send + Sync;
type ErrorFn = dyn Fn(&DynError) + Send + Sync;

pub struct ReportSink {
    breadcrumb: Arc<BreadcrumbFn>,
    error: Option<Arc<ErrorFn>>,
    /// Events less severe than this are not recorded as breadcrumbs.
    minimum: Severity,
}

impl ReportSink {
    pub fn new<F>(breadcrumb: F) -> Self
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        Self {
            breadcrumb: Arc::new(breadcrumb),
            error: None,
            minimum: Severity::Info,
        }
    }

    /// Also forward attached error values to `callback`.
    #[must_use]
    pub fn with_error_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&DynError) + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(callback));
        self
    }

    /// Only record breadcrumbs at or above `minimum`.
    #[must_use]
    pub fn with_minimum(mut self, minimum: Severity) -> Self {
        self.minimum = minimum;
        self
    }
}

impl Sink for ReportSink {
    fn emit(&self, severity: Severity, tag: &str, message: &str, error: Option<&DynError>) {
        if severity.passes(self.minimum) {
            (self.breadcrumb)(format!("{}/{} {}", severity.letter(), tag, message));
        }

        if let (Some(callback), Some(error)) = (&self.error, error) {
            callback(error);
        }
    }

    fn name(&self) -> &str {
        "report"
    }
}

impl std::fmt::Debug for ReportSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportSink")
            .field("minimum", &self.minimum)
            .field("has_error_callback", &self.error.is_some())
            .finish()
    }
}
