//! Built-in sinks

pub mod console;
pub mod memory;
pub mod report;

pub use console::ConsoleSink;
pub use memory::{CapturedEvent, MemorySink};
pub use report::ReportSink;
