//! Core facade types: severity, formatting, tags, config and dispatch

pub mod config;
pub mod error;
pub mod facade;
pub mod formatter;
pub mod logger;
pub mod severity;
pub mod sink;
pub mod source;
pub mod tag;
pub mod value;

pub use config::{Config, ConfigBuilder};
pub use error::{FacadeError, Result};
pub use facade::Facade;
pub use formatter::{Formatted, RENDER_FAILURE_MARKER};
pub use logger::Logger;
pub use severity::Severity;
pub use sink::Sink;
pub use source::{ConfigSource, EnvConfigSource, JsonConfigSource, StaticConfigSource};
pub use tag::{encode_tag, TagPattern, TagStyle};
pub use value::{DynError, LogValue, SharedList};
