//! Multiple sinks with per-sink tag patterns and runtime reconfiguration.
//!
//! Run with: `cargo run --example multi_sink`

use taglog::prelude::*;
use taglog::sinks::{ConsoleSink, ReportSink};

fn main() {
    let facade = Facade::new(
        Config::builder()
            .global_threshold(Severity::Info)
            .threshold("com.example.demo.Chatty", Severity::Warn)
            .sink(ConsoleSink::new())
            .sink(ReportSink::new(|line| println!("[breadcrumb] {line}")).with_minimum(Severity::Warn))
            .sink_pattern("console", "%l/%N")
            .build(),
    );

    let worker = facade.logger("com.example.demo.Worker");
    let chatty = facade.logger("com.example.demo.Chatty");

    worker.info("processing batch");
    chatty.info("suppressed by the per-logger override");
    chatty.warn("loud enough to pass");

    // Tighten the global threshold at runtime; handles pick it up on their
    // next call.
    facade.replace_config(
        Config::builder()
            .global_threshold(Severity::Error)
            .sink(ConsoleSink::new())
            .build(),
    );

    worker.info("now suppressed");
    worker.error("errors still flow");
}
