//! Convenience macros
//!
//! Each macro takes a logger handle, a `{}` template and any number of
//! arguments; arguments are converted through [`LogValue::from`] so plain
//! numbers, strings and booleans work directly.
//!
//! [`LogValue::from`]: crate::LogValue

/// Log at an explicit severity.
///
/// # Example
/// ```
/// use taglog::prelude::*;
/// use taglog::sinks::MemorySink;
///
/// let capture = MemorySink::new();
/// let facade = Facade::new(Config::builder().sink(capture.clone()).build());
/// let logger = facade.logger("com.example.Job");
///
/// taglog::log!(logger, Severity::Info, "processed {} of {}", 3, 10);
/// assert_eq!(capture.events()[0].message, "processed 3 of 10");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log(
            $severity,
            ::std::option::Option::Some($template),
            vec![$($crate::LogValue::from($arg)),*],
        )
    };
}

/// Log at [`Severity::Error`](crate::Severity::Error).
#[macro_export]
macro_rules! error {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Error, $template $(, $arg)*)
    };
}

/// Log at [`Severity::Warn`](crate::Severity::Warn).
#[macro_export]
macro_rules! warn {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Warn, $template $(, $arg)*)
    };
}

/// Log at [`Severity::Info`](crate::Severity::Info).
#[macro_export]
macro_rules! info {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Info, $template $(, $arg)*)
    };
}

/// Log at [`Severity::Debug`](crate::Severity::Debug).
#[macro_export]
macro_rules! debug {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Debug, $template $(, $arg)*)
    };
}

/// Log at [`Severity::Trace`](crate::Severity::Trace).
#[macro_export]
macro_rules! trace {
    ($logger:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Trace, $template $(, $arg)*)
    };
}
