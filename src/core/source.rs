//! Config sources
//!
//! The facade only ever consumes an already-materialized [`Config`]; how it
//! was produced is a loader concern behind the [`ConfigSource`] trait. The
//! bundled sources cover a statically known config, a JSON document and
//! environment variables. Sources produce thresholds, styles and patterns;
//! sinks are constructed by the application and attached to the returned
//! builder.
//!
//! Value-level problems inside a source (unknown severity or style names,
//! malformed patterns) recover to documented defaults so a bad entry never
//! prevents the facade from coming up; only document-level failures (I/O,
//! syntax) surface as errors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::config::{Config, ConfigBuilder};
use super::error::{FacadeError, Result};
use super::severity::Severity;
use super::tag::TagStyle;

pub trait ConfigSource {
    fn load(&self) -> Result<Config>;
}

/// A source wrapping a statically known config, e.g. one produced by a
/// build-time generation step.
pub struct StaticConfigSource {
    config: Config,
}

impl StaticConfigSource {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigSource for StaticConfigSource {
    fn load(&self) -> Result<Config> {
        Ok(self.config.clone())
    }
}

/// On-disk JSON document shape.
///
/// ```json
/// {
///   "level": "DEBUG",
///   "tagstyle": "SHORT",
///   "pattern": "%l/%n",
///   "loggers": { "com.example.Chatty": "WARN" },
///   "sinks": { "console": "%N" }
/// }
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigDoc {
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    tagstyle: Option<String>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    loggers: HashMap<String, String>,
    #[serde(default)]
    sinks: HashMap<String, String>,
}

/// Loads config from a JSON document.
pub struct JsonConfigSource {
    document: String,
}

impl JsonConfigSource {
    pub fn from_str(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let document = std::fs::read_to_string(path)?;
        Ok(Self { document })
    }

    /// Parse into a builder so the application can attach sinks before
    /// building.
    pub fn builder(&self) -> Result<ConfigBuilder> {
        let doc: ConfigDoc = serde_json::from_str(&self.document)?;
        Ok(apply_doc(doc))
    }
}

impl ConfigSource for JsonConfigSource {
    fn load(&self) -> Result<Config> {
        Ok(self.builder()?.build())
    }
}

fn apply_doc(doc: ConfigDoc) -> ConfigBuilder {
    let mut builder = ConfigBuilder::new();

    if let Some(style) = doc.tagstyle.as_deref() {
        builder = builder.tag_style(TagStyle::parse_lenient(style));
    }
    if let Some(level) = doc.level.as_deref() {
        builder = builder.global_threshold(Severity::parse_lenient(level));
    }
    if let Some(pattern) = doc.pattern.as_deref() {
        builder = builder.global_pattern(pattern);
    }
    for (name, level) in doc.loggers {
        builder = builder.threshold(name, Severity::parse_lenient(&level));
    }
    for (sink, pattern) in doc.sinks {
        builder = builder.sink_pattern(sink, pattern);
    }

    builder
}

/// Loads config from environment variables.
///
/// With the default prefix `TAGLOG`, recognized variables are
/// `TAGLOG_LEVEL`, `TAGLOG_TAGSTYLE`, `TAGLOG_PATTERN` and `TAGLOG_LEVELS`
/// (comma-separated `logger=LEVEL` overrides).
pub struct EnvConfigSource {
    prefix: String,
}

impl EnvConfigSource {
    pub fn new() -> Self {
        Self::with_prefix("TAGLOG")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn builder(&self) -> Result<ConfigBuilder> {
        let mut builder = ConfigBuilder::new();

        if let Ok(style) = std::env::var(format!("{}_TAGSTYLE", self.prefix)) {
            builder = builder.tag_style(TagStyle::parse_lenient(&style));
        }
        if let Ok(level) = std::env::var(format!("{}_LEVEL", self.prefix)) {
            builder = builder.global_threshold(Severity::parse_lenient(&level));
        }
        if let Ok(pattern) = std::env::var(format!("{}_PATTERN", self.prefix)) {
            builder = builder.global_pattern(&pattern);
        }

        let levels_var = format!("{}_LEVELS", self.prefix);
        if let Ok(overrides) = std::env::var(&levels_var) {
            for entry in overrides.split(',') {
                let entry = entry.trim();
                if entry.is_empty() {
                    continue;
                }
                let Some((name, level)) = entry.split_once('=') else {
                    return Err(FacadeError::invalid_env_entry(&levels_var, entry));
                };
                builder = builder.threshold(name.trim(), Severity::parse_lenient(level.trim()));
            }
        }

        Ok(builder)
    }
}

impl Default for EnvConfigSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for EnvConfigSource {
    fn load(&self) -> Result<Config> {
        Ok(self.builder()?.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_source_full_document() {
        let source = JsonConfigSource::from_str(
            r#"{
                "level": "DEBUG",
                "tagstyle": "LONG",
                "loggers": { "com.example.Chatty": "WARN" },
                "sinks": { "console": "%l/%n" }
            }"#,
        );

        let config = source.load().unwrap();
        assert_eq!(config.global_threshold(), Severity::Debug);
        assert_eq!(config.tag_style(), TagStyle::Long);
        assert_eq!(config.global_pattern().as_str(), "%N");
        assert_eq!(config.threshold_for("com.example.Chatty"), Severity::Warn);
        assert_eq!(config.pattern_for("console").as_str(), "%l/%n");
    }

    #[test]
    fn test_json_source_empty_document_uses_defaults() {
        let config = JsonConfigSource::from_str("{}").load().unwrap();
        assert_eq!(config.global_threshold(), Severity::Info);
        assert_eq!(config.tag_style(), TagStyle::Short);
    }

    #[test]
    fn test_json_source_bad_values_recover() {
        let source = JsonConfigSource::from_str(
            r#"{
                "level": "LOUD",
                "tagstyle": "CIRCULAR",
                "loggers": { "a.B": "quiet" }
            }"#,
        );

        let config = source.load().unwrap();
        assert_eq!(config.global_threshold(), Severity::Info);
        assert_eq!(config.tag_style(), TagStyle::Short);
        assert_eq!(config.threshold_for("a.B"), Severity::Info);
    }

    #[test]
    fn test_json_source_syntax_error_surfaces() {
        let result = JsonConfigSource::from_str("{ not json").load();
        assert!(matches!(result, Err(FacadeError::JsonError(_))));
    }

    #[test]
    fn test_static_source_round_trips() {
        let config = Config::builder().global_threshold(Severity::Trace).build();
        let loaded = StaticConfigSource::new(config).load().unwrap();
        assert_eq!(loaded.global_threshold(), Severity::Trace);
    }
}
