//! Basic usage: one console sink, leveled calls and template formatting.
//!
//! Run with: `cargo run --example basic_usage`

use taglog::prelude::*;
use taglog::sinks::ConsoleSink;

fn main() {
    let facade = Facade::new(
        Config::builder()
            .global_threshold(Severity::Debug)
            .tag_style(TagStyle::Short)
            .sink(ConsoleSink::new())
            .build(),
    );

    let logger = facade.logger("com.example.demo.Startup");

    logger.info("application starting");
    taglog::info!(logger, "loaded {} plugins in {}ms", 4, 87);
    taglog::debug!(logger, "search paths: {}", "/usr/lib", "/opt/lib");

    // Below the Debug threshold, so this one is dropped.
    logger.trace("not emitted");

    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.json missing");
    logger.warn_err("falling back to default settings", err);

    logger.info("done");
}
