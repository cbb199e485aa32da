//! # Taglog
//!
//! A tag-oriented logging facade with per-logger severity thresholds,
//! `{}` template formatting and multi-sink dispatch.
//!
//! ## Features
//!
//! - **Named loggers**: cached handles keyed by dotted component names
//! - **Severity thresholds**: a global threshold plus per-logger overrides
//! - **Template formatting**: `{}` placeholders with escapes, array
//!   expansion and cycle protection
//! - **Tag patterns**: tags rendered from `%n`/`%N`/`%m`/`%t`/`%T`/`%l`
//!   tokens, per sink if needed
//! - **Multiple sinks**: console, in-memory capture and crash-report
//!   forwarding, with per-sink fault isolation
//! - **Config sources**: build in code, or load from JSON or environment
//!   variables
//!
//! ## Quick start
//!
//! ```rust
//! use taglog::prelude::*;
//! use taglog::sinks::ConsoleSink;
//!
//! let facade = Facade::new(
//!     Config::builder()
//!         .global_threshold(Severity::Debug)
//!         .tag_style(TagStyle::Short)
//!         .sink(ConsoleSink::new())
//!         .build(),
//! );
//!
//! let logger = facade.logger("com.example.Server");
//! logger.info("starting up");
//! taglog::info!(logger, "listening on port {}", 8080);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub use crate::core::{
    encode_tag, Config, ConfigBuilder, ConfigSource, DynError, EnvConfigSource, Facade,
    FacadeError, Formatted, JsonConfigSource, LogValue, Logger, Result, Severity, SharedList,
    Sink, StaticConfigSource, TagPattern, TagStyle, RENDER_FAILURE_MARKER,
};

/// Common imports for facade users.
pub mod prelude {
    pub use crate::core::{
        Config, ConfigBuilder, ConfigSource, DynError, EnvConfigSource, Facade, FacadeError,
        JsonConfigSource, LogValue, Logger, Result, Severity, Sink, StaticConfigSource,
        TagPattern, TagStyle,
    };
}
