//! Sink trait for event destinations

use super::severity::Severity;
use super::tag::TagPattern;
use super::value::DynError;

/// An event destination.
///
/// Sinks receive fully rendered events: a severity, an encoded tag, the
/// formatted message text and an optional error value. `emit` is invoked on
/// the calling thread and must tolerate concurrent calls; a sink that panics
/// is isolated by the dispatcher and never affects other sinks or the
/// caller.
pub trait Sink: Send + Sync {
    fn emit(&self, severity: Severity, tag: &str, message: &str, error: Option<&DynError>);

    /// Invoked once at config build time when a pattern override targets
    /// this sink. Most sinks don't care about their pattern and keep the
    /// default no-op.
    fn set_tag_pattern(&mut self, _pattern: TagPattern) {}

    /// Stable identity used to match per-sink tag pattern overrides.
    fn name(&self) -> &str;
}
