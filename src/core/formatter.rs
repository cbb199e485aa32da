//! Template message formatting
//!
//! Renders a `{}` placeholder template against a list of [`LogValue`]
//! arguments. An error value in last argument position is extracted rather
//! than substituted, escape sequences suppress substitution, lists expand to
//! `[a, b, c]` recursively with cycle protection, and a single-placeholder
//! template given multiple arguments expands them as one list. A formatting
//! failure never aborts the logging call.

use std::panic::{catch_unwind, AssertUnwindSafe};

use super::value::{DynError, LogValue};

const PLACEHOLDER: &str = "{}";
const ESCAPE: u8 = b'\\';

/// Marker substituted when an argument's own rendering fails or panics.
pub const RENDER_FAILURE_MARKER: &str = "[RENDER FAILED]";

/// Marker substituted for a list already on the current render stack.
const CYCLE_MARKER: &str = "...";

/// Result of one formatting pass: the rendered message (`None` means "do not
/// emit") and the extracted error value, if any.
#[derive(Debug, Clone)]
pub struct Formatted {
    pub message: Option<String>,
    pub error: Option<DynError>,
}

/// Format `template` against `args`.
///
/// `template == None` yields a `None` message (callers treat it as a no-op),
/// while a trailing error argument is still extracted and propagated so that
/// bare-error calls reach the sinks' error channel.
pub fn format(template: Option<&str>, mut args: Vec<LogValue>) -> Formatted {
    let error = extract_error(&mut args);

    let Some(template) = template else {
        return Formatted { message: None, error };
    };

    if args.is_empty() {
        return Formatted {
            message: Some(template.to_string()),
            error,
        };
    }

    // A single placeholder fed multiple arguments means the call site passed
    // a natural argument list through one slot; expand it as a list.
    if count_placeholders(template) == 1 && args.len() > 1 {
        args = vec![LogValue::List(args)];
    }

    let message = substitute(template, &args);
    Formatted {
        message: Some(message),
        error,
    }
}

/// Pull a trailing error value out of the argument list.
fn extract_error(args: &mut Vec<LogValue>) -> Option<DynError> {
    if let Some(LogValue::Error(_)) = args.last() {
        match args.pop() {
            Some(LogValue::Error(e)) => Some(e),
            _ => unreachable!("last element checked above"),
        }
    } else {
        None
    }
}

fn count_placeholders(template: &str) -> usize {
    let mut count = 0;
    let mut i = 0;
    while let Some(offset) = template[i..].find(PLACEHOLDER) {
        count += 1;
        i += offset + PLACEHOLDER.len();
    }
    count
}

fn substitute(template: &str, args: &[LogValue]) -> String {
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len() + 50);
    let mut stack: Vec<*const ()> = Vec::new();

    let mut i = 0;
    let mut arg = 0;
    while arg < args.len() {
        let Some(offset) = template[i..].find(PLACEHOLDER) else {
            if i == 0 {
                // No placeholders at all; the template is the message.
                return template.to_string();
            }
            out.push_str(&template[i..]);
            return out;
        };
        let j = i + offset;

        if j > 0 && bytes[j - 1] == ESCAPE {
            if j >= 2 && bytes[j - 2] == ESCAPE {
                // Double escape cancels: keep one backslash, substitute.
                out.push_str(&template[i..j - 1]);
                append_value(&mut out, &args[arg], &mut stack);
                i = j + PLACEHOLDER.len();
                arg += 1;
            } else {
                // Escaped placeholder: literal '{', the '}' follows as plain
                // text, and the argument is given back to the next slot.
                out.push_str(&template[i..j - 1]);
                out.push('{');
                i = j + 1;
            }
        } else {
            out.push_str(&template[i..j]);
            append_value(&mut out, &args[arg], &mut stack);
            i = j + PLACEHOLDER.len();
            arg += 1;
        }
    }

    // Leftover placeholders (more slots than arguments) stay literal.
    out.push_str(&template[i..]);
    out
}

/// Append the deep string rendering of one value.
///
/// `stack` holds the identities of shared lists currently being rendered;
/// re-entering one renders the cycle marker instead of recursing.
fn append_value(out: &mut String, value: &LogValue, stack: &mut Vec<*const ()>) {
    use std::fmt::Write;

    match value {
        LogValue::Null => out.push_str("null"),
        LogValue::Bool(v) => {
            let _ = write!(out, "{v}");
        }
        LogValue::Int(v) => {
            let _ = write!(out, "{v}");
        }
        LogValue::Uint(v) => {
            let _ = write!(out, "{v}");
        }
        LogValue::Float(v) => {
            let _ = write!(out, "{v}");
        }
        LogValue::Str(v) => out.push_str(v),
        LogValue::Display(v) => append_displayable(out, v.as_ref()),
        LogValue::Error(e) => append_displayable(out, e.as_ref()),
        LogValue::List(items) => append_list(out, items, stack),
        LogValue::Shared(list) => {
            let identity = std::sync::Arc::as_ptr(list) as *const ();
            if stack.contains(&identity) {
                out.push_str(CYCLE_MARKER);
                return;
            }
            stack.push(identity);
            let items = list.read();
            append_list(out, &items, stack);
            drop(items);
            stack.pop();
        }
    }
}

fn append_list(out: &mut String, items: &[LogValue], stack: &mut Vec<*const ()>) {
    out.push('[');
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        append_value(out, item, stack);
    }
    out.push(']');
}

/// Render an arbitrary displayable object without letting it break the call.
fn append_displayable<T: std::fmt::Display + ?Sized>(out: &mut String, value: &T) {
    let rendered = catch_unwind(AssertUnwindSafe(|| {
        use std::fmt::Write;
        let mut buffer = String::new();
        match write!(buffer, "{value}") {
            Ok(()) => Some(buffer),
            Err(_) => None,
        }
    }));

    match rendered {
        Ok(Some(text)) => out.push_str(&text),
        _ => {
            eprintln!("[taglog] argument rendering failed, substituting marker");
            out.push_str(RENDER_FAILURE_MARKER);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[test]
    fn test_null_template_is_noop_signal() {
        let result = format(None, vec![LogValue::from(1), LogValue::from(2)]);
        assert!(result.message.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_null_template_still_extracts_error() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let result = format(None, vec![LogValue::error(err)]);
        assert!(result.message.is_none());
        assert_eq!(result.error.unwrap().to_string(), "boom");
    }

    #[test]
    fn test_no_args_returns_template_verbatim() {
        let result = format(Some("hello {} world"), vec![]);
        assert_eq!(result.message.unwrap(), "hello {} world");
    }

    #[test]
    fn test_no_placeholders_ignores_args() {
        let result = format(
            Some("no placeholders"),
            vec![LogValue::from("a"), LogValue::from("b")],
        );
        assert_eq!(result.message.unwrap(), "no placeholders");
    }

    #[test]
    fn test_basic_substitution() {
        let result = format(
            Some("{} and {}"),
            vec![LogValue::from("x"), LogValue::from("y")],
        );
        assert_eq!(result.message.unwrap(), "x and y");
    }

    #[test]
    fn test_null_argument_renders_literal() {
        let result = format(Some("value: {}"), vec![LogValue::Null]);
        assert_eq!(result.message.unwrap(), "value: null");
    }

    #[test]
    fn test_trailing_text_after_last_placeholder() {
        let result = format(Some("{} tail"), vec![LogValue::from(7)]);
        assert_eq!(result.message.unwrap(), "7 tail");
    }

    #[test]
    fn test_extra_args_silently_ignored() {
        let result = format(
            Some("only {} here and {} there"),
            vec![
                LogValue::from(1),
                LogValue::from(2),
                LogValue::from(3),
            ],
        );
        assert_eq!(result.message.unwrap(), "only 1 here and 2 there");
    }

    #[test]
    fn test_unmatched_placeholders_stay_literal() {
        let result = format(Some("{} {} {}"), vec![LogValue::from("a")]);
        assert_eq!(result.message.unwrap(), "a {} {}");
    }

    #[test]
    fn test_escaped_placeholder_gives_back_argument() {
        // The escaped slot must not consume "x"; the following placeholder does.
        let result = format(Some("a \\{} {}"), vec![LogValue::from("x")]);
        assert_eq!(result.message.unwrap(), "a {} x");
    }

    #[test]
    fn test_escaped_placeholder_alone() {
        let result = format(Some("literal \\{}"), vec![LogValue::from("x")]);
        assert_eq!(result.message.unwrap(), "literal {}");
    }

    #[test]
    fn test_double_escape_substitutes() {
        let result = format(Some("path \\\\{} end"), vec![LogValue::from("x")]);
        assert_eq!(result.message.unwrap(), "path \\x end");
    }

    #[test]
    fn test_error_extraction() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let result = format(
            Some("failed after {} retries"),
            vec![LogValue::from(3), LogValue::error(err)],
        );
        assert_eq!(result.message.unwrap(), "failed after 3 retries");
        assert_eq!(result.error.unwrap().to_string(), "disk on fire");
    }

    #[test]
    fn test_error_in_substitution_position_renders() {
        // An error that is not the last argument is an ordinary argument.
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let result = format(
            Some("{} while {}"),
            vec![LogValue::error(err), LogValue::from("saving")],
        );
        assert_eq!(result.message.unwrap(), "boom while saving");
    }

    #[test]
    fn test_list_expansion() {
        let list = LogValue::List(vec![
            LogValue::from(1),
            LogValue::from(2),
            LogValue::from(3),
        ]);
        let result = format(Some("{}"), vec![list]);
        assert_eq!(result.message.unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn test_nested_list_expansion() {
        let inner = LogValue::List(vec![LogValue::from("a"), LogValue::from("b")]);
        let list = LogValue::List(vec![LogValue::from(1), inner]);
        let result = format(Some("{}"), vec![list]);
        assert_eq!(result.message.unwrap(), "[1, [a, b]]");
    }

    // The single-placeholder/multi-argument wrap rule is a deliberately
    // surprising corner inherited from existing call sites: the whole
    // remaining argument list expands through the one slot.
    #[test]
    fn test_single_placeholder_wraps_multiple_args() {
        let result = format(
            Some("{}"),
            vec![
                LogValue::from(1),
                LogValue::from(2),
                LogValue::from(3),
            ],
        );
        assert_eq!(result.message.unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn test_wrap_rule_applies_after_error_extraction() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "late");
        let result = format(
            Some("{}"),
            vec![LogValue::from(1), LogValue::from(2), LogValue::error(err)],
        );
        assert_eq!(result.message.unwrap(), "[1, 2]");
        assert!(result.error.is_some());
    }

    #[test]
    fn test_cyclic_shared_list_renders_marker() {
        let shared = LogValue::shared(vec![LogValue::from(1)]);
        shared.write().push(LogValue::Shared(shared.clone()));
        shared.write().push(LogValue::from(2));

        let result = format(Some("{}"), vec![LogValue::Shared(shared)]);
        assert_eq!(result.message.unwrap(), "[1, ..., 2]");
    }

    #[test]
    fn test_shared_list_mentioned_twice_is_not_a_cycle() {
        // The same list in two sibling positions is fine; only re-entry on
        // the active render stack is a cycle.
        let shared = LogValue::shared(vec![LogValue::from(9)]);
        let result = format(
            Some("{} {}"),
            vec![
                LogValue::Shared(shared.clone()),
                LogValue::Shared(shared),
            ],
        );
        assert_eq!(result.message.unwrap(), "[9] [9]");
    }

    struct Panicky;

    impl fmt::Display for Panicky {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("display blew up");
        }
    }

    #[test]
    fn test_panicking_display_substitutes_marker() {
        let result = format(
            Some("value: {}"),
            vec![LogValue::display(Panicky)],
        );
        assert_eq!(
            result.message.unwrap(),
            format!("value: {RENDER_FAILURE_MARKER}")
        );
    }

    struct Erroring;

    impl fmt::Display for Erroring {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_failing_display_substitutes_marker() {
        let result = format(Some("{}"), vec![LogValue::display(Erroring)]);
        assert_eq!(result.message.unwrap(), RENDER_FAILURE_MARKER);
    }
}
