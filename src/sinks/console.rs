//! Console sink
//!
//! Writes events to stdout/stderr in a device-log style, with the classic
//! console constraints: control characters are scrubbed, oversize messages
//! are written in bounded chunks, and with restricted tags enabled the tag
//! is shortened to the 23-character device limit.

use chrono::Utc;
use std::borrow::Cow;
use std::io::Write;

#[cfg(feature = "console")]
use colored::Colorize;

use crate::core::{DynError, Severity, Sink};

/// Messages at or above this many bytes are written in multiple chunks.
pub const MAX_MESSAGE_LENGTH: usize = 4000;

/// Maximum tag length enforced when restricted tags are enabled.
pub const MAX_TAG_LENGTH: usize = 23;

/// Placeholder for a collapsed name segment, and the leading marker of a
/// tail-truncated tag.
const COLLAPSE_MARKER: char = '*';
const COLLAPSE_STR: &str = "*";

pub struct ConsoleSink {
    use_colors: bool,
    restricted_tags: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            restricted_tags: false,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Enforce the 23-character tag limit. Pair this with
    /// [`TagStyle::Restricted`](crate::core::TagStyle::Restricted).
    #[must_use]
    pub fn with_restricted_tags(mut self, restricted: bool) -> Self {
        self.restricted_tags = restricted;
        self
    }

    fn write_line(&self, severity: Severity, tag: &str, chunk: &str) {
        let timestamp = Utc::now().format("%m-%d %H:%M:%S%.3f");
        let label = format!("{}/{}", severity.letter(), tag);
        let label = self.colorize(severity, label);
        let line = format!("{timestamp} {label}: {chunk}");

        // Errors go to stderr, everything else to stdout.
        if severity == Severity::Error {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    #[cfg(feature = "console")]
    fn colorize(&self, severity: Severity, label: String) -> String {
        if self.use_colors {
            label.color(severity.color_code()).to_string()
        } else {
            label
        }
    }

    #[cfg(not(feature = "console"))]
    fn colorize(&self, _severity: Severity, label: String) -> String {
        label
    }

    fn write_error(&self, severity: Severity, error: &DynError) {
        let mut line = format!("  caused by: {error}");
        let mut source = error.source();
        while let Some(cause) = source {
            line.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }

        if severity == Severity::Error {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, severity: Severity, tag: &str, message: &str, error: Option<&DynError>) {
        let sanitized_tag = sanitize(tag);
        let tag: Cow<'_, str> = if self.restricted_tags {
            restrict_tag(&sanitized_tag)
        } else {
            Cow::Borrowed(sanitized_tag.as_ref())
        };

        let message = sanitize(message);
        for chunk in chunk_message(&message) {
            self.write_line(severity, &tag, chunk);
        }

        if let Some(error) = error {
            self.write_error(severity, error);
        }

        let _ = std::io::stdout().flush();
    }

    fn name(&self) -> &str {
        "console"
    }
}

/// Scrub control characters: anything below the printable threshold except
/// newline becomes a space, and runs of newlines collapse so no two adjacent
/// newline characters survive.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    let needs_work =
        text.chars().any(|c| c < ' ' && c != '\n') || text.contains("\n\n");
    if !needs_work {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut last_was_newline = false;
    for c in text.chars() {
        if c == '\n' {
            if !last_was_newline {
                out.push('\n');
            }
            last_was_newline = true;
        } else {
            out.push(if c < ' ' { ' ' } else { c });
            last_was_newline = false;
        }
    }
    Cow::Owned(out)
}

/// Split an oversize message into chunks no larger than
/// [`MAX_MESSAGE_LENGTH`] bytes, breaking on newlines first and then on
/// char boundaries within a line. Messages under the limit pass through as a
/// single chunk. Order follows the original text.
pub fn chunk_message(message: &str) -> Vec<&str> {
    if message.len() < MAX_MESSAGE_LENGTH {
        return vec![message];
    }

    let mut chunks = Vec::new();
    for line in message.split('\n') {
        let mut rest = line;
        while !rest.is_empty() {
            let end = floor_char_boundary(rest, MAX_MESSAGE_LENGTH);
            chunks.push(&rest[..end]);
            rest = &rest[end..];
        }
    }
    chunks
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Shorten a tag to at most [`MAX_TAG_LENGTH`] characters.
///
/// Leading dot-separated segments collapse to single placeholder characters
/// (single-character segments kept as-is), each followed by its dot; the
/// trailing segment is the most specific one and is appended verbatim. If
/// even the collapsed form would overflow, the last segment alone is used,
/// tail-truncated with a leading marker if it is itself too long. A tag
/// already at or under the limit is returned untouched.
pub fn restrict_tag(tag: &str) -> Cow<'_, str> {
    if tag.len() <= MAX_TAG_LENGTH {
        return Cow::Borrowed(tag);
    }

    let segments: Vec<&str> = tag.split('.').collect();
    let Some((last, leading)) = segments.split_last() else {
        return Cow::Borrowed(tag);
    };

    let mut out = String::with_capacity(MAX_TAG_LENGTH);
    for segment in leading {
        let piece: &str = if segment.chars().count() == 1 {
            segment
        } else {
            COLLAPSE_STR
        };
        if out.len() + piece.len() + 1 > MAX_TAG_LENGTH {
            return Cow::Owned(last_segment_fallback(last));
        }
        out.push_str(piece);
        out.push('.');
    }

    if out.len() + last.len() > MAX_TAG_LENGTH {
        return Cow::Owned(last_segment_fallback(last));
    }
    out.push_str(last);
    Cow::Owned(out)
}

fn last_segment_fallback(last: &str) -> String {
    if last.len() <= MAX_TAG_LENGTH {
        return last.to_string();
    }

    let mut start = last.len() - (MAX_TAG_LENGTH - 1);
    while !last.is_char_boundary(start) {
        start += 1;
    }
    format!("{COLLAPSE_MARKER}{}", &last[start..])
}
