//! Tag styles, tag patterns and tag encoding
//!
//! A tag pattern is a short template carrying at most one of each recognized
//! token. Encoding replaces the first occurrence of every token in a single
//! pass over the original pattern, so replacement text is never rescanned
//! for nested tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{FacadeError, Result};
use super::severity::Severity;

/// Short logger name (last path segment): `%n`
pub const TOKEN_NAME_SHORT: &str = "%n";
/// Full logger name: `%N`
pub const TOKEN_NAME_LONG: &str = "%N";
/// Calling method name, best effort: `%m`
pub const TOKEN_METHOD: &str = "%m";
/// Thread name if not the main thread: `%t`
pub const TOKEN_THREAD_IF_NOT_MAIN: &str = "%t";
/// Thread name unconditionally: `%T`
pub const TOKEN_THREAD_ALWAYS: &str = "%T";
/// Severity letter: `%l`
pub const TOKEN_SEVERITY_LETTER: &str = "%l";

/// How logger names are displayed in tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum TagStyle {
    /// Short name, capped at the device-log tag limit by console sinks.
    Restricted,
    #[default]
    Short,
    Long,
    /// Full name plus the calling method in brackets.
    Full,
}

impl TagStyle {
    pub fn to_str(&self) -> &'static str {
        match self {
            TagStyle::Restricted => "RESTRICTED",
            TagStyle::Short => "SHORT",
            TagStyle::Long => "LONG",
            TagStyle::Full => "FULL",
        }
    }

    /// The tag pattern implied by this style when none is configured.
    pub fn default_pattern(&self) -> TagPattern {
        let pattern = match self {
            TagStyle::Restricted | TagStyle::Short => "%n",
            TagStyle::Long => "%N",
            TagStyle::Full => "%N[%m]",
        };
        TagPattern::new(pattern).expect("built-in patterns are valid")
    }

    /// Parse with recovery: unknown names fall back to the default (`Short`).
    pub fn parse_lenient(s: &str) -> TagStyle {
        s.parse().unwrap_or_else(|_| {
            eprintln!("[taglog] invalid tag style '{}', using default (SHORT)", s);
            TagStyle::Short
        })
    }
}

impl fmt::Display for TagStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for TagStyle {
    type Err = FacadeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "RESTRICTED" => Ok(TagStyle::Restricted),
            "SHORT" => Ok(TagStyle::Short),
            "LONG" => Ok(TagStyle::Long),
            "FULL" => Ok(TagStyle::Full),
            _ => Err(FacadeError::invalid_tag_style(s)),
        }
    }
}

/// A validated tag pattern.
///
/// Validation enforces the cardinality rules: each token at most once, and
/// exactly one of the two logger-name tokens present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern(String);

const ALL_TOKENS: [&str; 6] = [
    TOKEN_NAME_SHORT,
    TOKEN_NAME_LONG,
    TOKEN_METHOD,
    TOKEN_THREAD_IF_NOT_MAIN,
    TOKEN_THREAD_ALWAYS,
    TOKEN_SEVERITY_LETTER,
];

impl TagPattern {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();

        for token in ALL_TOKENS {
            if pattern.matches(token).count() > 1 {
                return Err(FacadeError::malformed_pattern(
                    pattern.clone(),
                    format!("token {token} appears more than once"),
                ));
            }
        }

        let has_short = pattern.contains(TOKEN_NAME_SHORT);
        let has_long = pattern.contains(TOKEN_NAME_LONG);
        if has_short == has_long {
            let message = if has_short {
                "both logger name tokens present"
            } else {
                "missing logger name token"
            };
            return Err(FacadeError::malformed_pattern(pattern, message));
        }

        Ok(TagPattern(pattern))
    }

    /// Parse with recovery: a malformed pattern falls back to the style's
    /// default instead of failing the config build.
    pub fn parse_lenient(pattern: &str, style: TagStyle) -> TagPattern {
        TagPattern::new(pattern).unwrap_or_else(|e| {
            eprintln!("[taglog] {}, using default for style {}", e, style);
            style.default_pattern()
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encode a tag from a pattern for one event.
///
/// `owning_type` overrides the name the logger-name tokens are derived from,
/// for loggers created on behalf of a wrapping type. Unknown `%x` sequences
/// and duplicate tokens are left untouched.
pub fn encode_tag(
    pattern: &TagPattern,
    severity: Severity,
    logger_name: &str,
    owning_type: Option<&str>,
) -> String {
    let name_source = owning_type.unwrap_or(logger_name);
    let raw = pattern.as_str();
    let mut out = String::with_capacity(raw.len() + 16);
    let mut replaced = [false; ALL_TOKENS.len()];

    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let token = chars.peek().copied().and_then(match_token);
        match token {
            Some(index) if !replaced[index] => {
                replaced[index] = true;
                append_replacement(&mut out, index, severity, name_source);
                chars.next();
            }
            _ => {
                // Unknown or repeated token: leave the raw text alone.
                out.push(c);
            }
        }
    }

    out
}

fn match_token(c: char) -> Option<usize> {
    match c {
        'n' => Some(0),
        'N' => Some(1),
        'm' => Some(2),
        't' => Some(3),
        'T' => Some(4),
        'l' => Some(5),
        _ => None,
    }
}

fn append_replacement(out: &mut String, index: usize, severity: Severity, name: &str) {
    match index {
        0 => out.push_str(short_name(name)),
        1 => out.push_str(name),
        2 => out.push_str(&calling_method_name().unwrap_or_default()),
        3 => {
            if !on_main_thread() {
                out.push_str(&thread_name());
            }
        }
        4 => out.push_str(&thread_name()),
        5 => out.push(severity.letter()),
        _ => unreachable!("token indices are fixed"),
    }
}

/// Last dot-separated segment of a qualified name, trimmed.
pub fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name).trim()
}

fn thread_name() -> String {
    std::thread::current()
        .name()
        .map(str::to_string)
        .unwrap_or_default()
}

fn on_main_thread() -> bool {
    std::thread::current().name() == Some("main")
}

/// Best-effort name of the first method outside this crate on the current
/// call stack.
///
/// Walks the captured backtrace outward: frames inside this crate mark the
/// facade region, and the first frame after it that belongs to neither this
/// crate nor the runtime's own plumbing is the caller. Returns `None` when
/// symbols are unavailable (stripped builds) or no such frame exists; the
/// `%m` token then renders empty.
pub fn calling_method_name() -> Option<String> {
    let backtrace = std::backtrace::Backtrace::force_capture();
    let rendered = backtrace.to_string();

    let crate_marker = concat!(env!("CARGO_CRATE_NAME"), "::");
    let mut found_local = false;

    for line in rendered.lines() {
        let trimmed = line.trim_start();
        // Frame lines look like "12: path::to::function"; location lines
        // ("at src/...") are skipped.
        let Some((frame_no, symbol)) = trimmed.split_once(": ") else {
            continue;
        };
        if frame_no.parse::<u32>().is_err() {
            continue;
        }

        let is_local = symbol.contains(crate_marker);
        if is_local {
            found_local = true;
        } else if found_local && !is_runtime_frame(symbol) {
            return extract_method_name(symbol);
        }
    }

    None
}

fn is_runtime_frame(symbol: &str) -> bool {
    symbol.starts_with("std::")
        || symbol.starts_with("core::")
        || symbol.starts_with("alloc::")
        || symbol.starts_with("__rust")
        || symbol.starts_with("rust_begin_unwind")
}

fn extract_method_name(symbol: &str) -> Option<String> {
    let mut segments: Vec<&str> = symbol.split("::").collect();

    // Drop a trailing mangling hash ("h" + 16 hex digits) if present.
    if let Some(last) = segments.last() {
        if last.len() == 17
            && last.starts_with('h')
            && last[1..].chars().all(|c| c.is_ascii_hexdigit())
        {
            segments.pop();
        }
    }

    while let Some(last) = segments.last() {
        if *last == "{{closure}}" {
            segments.pop();
        } else {
            break;
        }
    }

    segments.last().map(|s| s.trim().to_string())
}
