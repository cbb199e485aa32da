//! Immutable configuration snapshots
//!
//! A [`Config`] is built once and never mutated; runtime reconfiguration
//! replaces the whole snapshot atomically. Threshold resolution is an exact
//! name match against the override table, falling back to the global
//! default; there is no prefix matching.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::severity::Severity;
use super::sink::Sink;
use super::tag::{TagPattern, TagStyle};

#[derive(Clone)]
pub struct Config {
    global_threshold: Severity,
    tag_style: TagStyle,
    global_pattern: TagPattern,
    thresholds: HashMap<String, Severity>,
    sink_patterns: HashMap<String, TagPattern>,
    sinks: Vec<Arc<dyn Sink>>,
}

impl Config {
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Effective threshold for a logger name: exact-match override else the
    /// global default.
    pub fn threshold_for(&self, logger_name: &str) -> Severity {
        self.thresholds
            .get(logger_name)
            .copied()
            .unwrap_or(self.global_threshold)
    }

    /// Effective tag pattern for a sink: per-sink override else the global
    /// pattern.
    pub fn pattern_for(&self, sink_name: &str) -> &TagPattern {
        self.sink_patterns
            .get(sink_name)
            .unwrap_or(&self.global_pattern)
    }

    pub fn global_threshold(&self) -> Severity {
        self.global_threshold
    }

    pub fn tag_style(&self) -> TagStyle {
        self.tag_style
    }

    pub fn global_pattern(&self) -> &TagPattern {
        &self.global_pattern
    }

    /// Registered sinks, in registration order.
    pub fn sinks(&self) -> &[Arc<dyn Sink>] {
        &self.sinks
    }

    pub(crate) fn push_sink(&mut self, sink: Arc<dyn Sink>) {
        self.sinks.push(sink);
    }
}

impl Default for Config {
    fn default() -> Self {
        ConfigBuilder::new().build()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink_names: Vec<&str> = self.sinks.iter().map(|s| s.name()).collect();
        f.debug_struct("Config")
            .field("global_threshold", &self.global_threshold)
            .field("tag_style", &self.tag_style)
            .field("global_pattern", &self.global_pattern)
            .field("thresholds", &self.thresholds)
            .field("sink_patterns", &self.sink_patterns)
            .field("sinks", &sink_names)
            .finish()
    }
}

/// Builder for constructing a [`Config`] with a fluent API
///
/// # Example
/// ```
/// use taglog::prelude::*;
///
/// let config = Config::builder()
///     .global_threshold(Severity::Debug)
///     .tag_style(TagStyle::Short)
///     .threshold("com.example.Chatty", Severity::Warn)
///     .build();
/// assert_eq!(config.threshold_for("com.example.Chatty"), Severity::Warn);
/// assert_eq!(config.threshold_for("anything.else"), Severity::Debug);
/// ```
pub struct ConfigBuilder {
    global_threshold: Severity,
    tag_style: TagStyle,
    global_pattern: Option<TagPattern>,
    thresholds: HashMap<String, Severity>,
    sink_patterns: HashMap<String, String>,
    sinks: Vec<Box<dyn Sink>>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            global_threshold: Severity::Info,
            tag_style: TagStyle::Short,
            global_pattern: None,
            thresholds: HashMap::new(),
            sink_patterns: HashMap::new(),
            sinks: Vec::new(),
        }
    }

    /// Set the global default threshold (default: `Info`).
    #[must_use = "builder methods return a new value"]
    pub fn global_threshold(mut self, severity: Severity) -> Self {
        self.global_threshold = severity;
        self
    }

    /// Set the tag style (default: `Short`). Also determines the fallback
    /// pattern when no global pattern is given.
    #[must_use = "builder methods return a new value"]
    pub fn tag_style(mut self, style: TagStyle) -> Self {
        self.tag_style = style;
        self
    }

    /// Set the global tag pattern. A malformed pattern is recovered to the
    /// style's default at build time, never propagated.
    #[must_use = "builder methods return a new value"]
    pub fn global_pattern(mut self, pattern: &str) -> Self {
        self.global_pattern = Some(TagPattern::parse_lenient(pattern, self.tag_style));
        self
    }

    /// Add a per-logger threshold override (exact name match).
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, logger_name: impl Into<String>, severity: Severity) -> Self {
        self.thresholds.insert(logger_name.into(), severity);
        self
    }

    /// Add a sink. Sinks receive events in the order they were added.
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Override the tag pattern for the sink with the given name.
    #[must_use = "builder methods return a new value"]
    pub fn sink_pattern(
        mut self,
        sink_name: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        self.sink_patterns.insert(sink_name.into(), pattern.into());
        self
    }

    /// Build the immutable snapshot.
    ///
    /// Pattern overrides are validated here (with recovery to the style
    /// default) and pushed into their sinks via `set_tag_pattern`.
    pub fn build(self) -> Config {
        let style = self.tag_style;
        let global_pattern = self
            .global_pattern
            .unwrap_or_else(|| style.default_pattern());

        let sink_patterns: HashMap<String, TagPattern> = self
            .sink_patterns
            .into_iter()
            .map(|(name, raw)| (name, TagPattern::parse_lenient(&raw, style)))
            .collect();

        let mut sinks: Vec<Arc<dyn Sink>> = Vec::with_capacity(self.sinks.len());
        for mut sink in self.sinks {
            let pattern = sink_patterns
                .get(sink.name())
                .unwrap_or(&global_pattern)
                .clone();
            sink.set_tag_pattern(pattern);
            sinks.push(Arc::from(sink));
        }

        Config {
            global_threshold: self.global_threshold,
            tag_style: style,
            global_pattern,
            thresholds: self.thresholds,
            sink_patterns,
            sinks,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::DynError;

    struct NullSink;

    impl Sink for NullSink {
        fn emit(&self, _: Severity, _: &str, _: &str, _: Option<&DynError>) {}

        fn name(&self) -> &str {
            "null"
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.global_threshold(), Severity::Info);
        assert_eq!(config.tag_style(), TagStyle::Short);
        assert_eq!(config.global_pattern().as_str(), "%n");
        assert!(config.sinks().is_empty());
    }

    #[test]
    fn test_threshold_exact_match_only() {
        let config = Config::builder()
            .global_threshold(Severity::Info)
            .threshold("com.example.Repo", Severity::Trace)
            .build();

        assert_eq!(config.threshold_for("com.example.Repo"), Severity::Trace);
        // No prefix matching: the child name falls back to the global.
        assert_eq!(config.threshold_for("com.example.Repo.Inner"), Severity::Info);
        assert_eq!(config.threshold_for("com.example"), Severity::Info);
    }

    #[test]
    fn test_sink_pattern_override() {
        let config = Config::builder()
            .sink(NullSink)
            .sink_pattern("null", "%l/%n")
            .build();

        assert_eq!(config.pattern_for("null").as_str(), "%l/%n");
        assert_eq!(config.pattern_for("other").as_str(), "%n");
    }

    #[test]
    fn test_malformed_override_recovers_to_style_default() {
        let config = Config::builder()
            .tag_style(TagStyle::Long)
            .sink(NullSink)
            .sink_pattern("null", "%n %N")
            .build();

        assert_eq!(config.pattern_for("null").as_str(), "%N");
    }

    #[test]
    fn test_sink_order_preserved() {
        struct Named(&'static str);
        impl Sink for Named {
            fn emit(&self, _: Severity, _: &str, _: &str, _: Option<&DynError>) {}
            fn name(&self) -> &str {
                self.0
            }
        }

        let config = Config::builder()
            .sink(Named("first"))
            .sink(Named("second"))
            .sink(Named("third"))
            .build();

        let names: Vec<&str> = config.sinks().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
