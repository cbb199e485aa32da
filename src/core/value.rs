//! Argument values accepted by the leveled logging calls
//!
//! Rust has no heterogeneous varargs, so call sites hand the formatter a
//! `Vec<LogValue>` (usually built by the logging macros). The variants cover
//! the shapes the template formatter distinguishes: scalars, arbitrary
//! displayable objects, nestable lists, shared lists (which may be cyclic)
//! and error values.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Error value carried alongside a rendered message.
pub type DynError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// A list that can be referenced from several places, including itself.
/// The formatter detects cycles through these and renders `...` instead of
/// recursing forever.
pub type SharedList = Arc<RwLock<Vec<LogValue>>>;

#[derive(Clone)]
pub enum LogValue {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    /// Any displayable object; rendered lazily and defensively by the formatter.
    Display(Arc<dyn fmt::Display + Send + Sync>),
    List(Vec<LogValue>),
    Shared(SharedList),
    /// An error value; in last argument position it is extracted from the
    /// message instead of being substituted.
    Error(DynError),
}

impl LogValue {
    /// Wrap any displayable object.
    pub fn display<T: fmt::Display + Send + Sync + 'static>(value: T) -> Self {
        LogValue::Display(Arc::new(value))
    }

    /// Wrap an error value.
    pub fn error<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        LogValue::Error(Arc::new(error))
    }

    /// Create a new shared list.
    pub fn shared(items: Vec<LogValue>) -> SharedList {
        Arc::new(RwLock::new(items))
    }
}

impl fmt::Debug for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::Null => write!(f, "Null"),
            LogValue::Bool(v) => write!(f, "Bool({v})"),
            LogValue::Int(v) => write!(f, "Int({v})"),
            LogValue::Uint(v) => write!(f, "Uint({v})"),
            LogValue::Float(v) => write!(f, "Float({v})"),
            LogValue::Str(v) => write!(f, "Str({v:?})"),
            LogValue::Display(_) => write!(f, "Display(..)"),
            LogValue::List(items) => f.debug_tuple("List").field(items).finish(),
            LogValue::Shared(_) => write!(f, "Shared(..)"),
            LogValue::Error(e) => write!(f, "Error({e})"),
        }
    }
}

impl From<bool> for LogValue {
    fn from(v: bool) -> Self {
        LogValue::Bool(v)
    }
}

impl From<i32> for LogValue {
    fn from(v: i32) -> Self {
        LogValue::Int(v.into())
    }
}

impl From<i64> for LogValue {
    fn from(v: i64) -> Self {
        LogValue::Int(v)
    }
}

impl From<u32> for LogValue {
    fn from(v: u32) -> Self {
        LogValue::Uint(v.into())
    }
}

impl From<u64> for LogValue {
    fn from(v: u64) -> Self {
        LogValue::Uint(v)
    }
}

impl From<usize> for LogValue {
    fn from(v: usize) -> Self {
        LogValue::Uint(v as u64)
    }
}

impl From<f32> for LogValue {
    fn from(v: f32) -> Self {
        LogValue::Float(v.into())
    }
}

impl From<f64> for LogValue {
    fn from(v: f64) -> Self {
        LogValue::Float(v)
    }
}

impl From<&str> for LogValue {
    fn from(v: &str) -> Self {
        LogValue::Str(v.to_string())
    }
}

impl From<String> for LogValue {
    fn from(v: String) -> Self {
        LogValue::Str(v)
    }
}

impl From<char> for LogValue {
    fn from(v: char) -> Self {
        LogValue::Str(v.to_string())
    }
}

impl From<Vec<LogValue>> for LogValue {
    fn from(items: Vec<LogValue>) -> Self {
        LogValue::List(items)
    }
}

impl From<SharedList> for LogValue {
    fn from(list: SharedList) -> Self {
        LogValue::Shared(list)
    }
}

impl From<DynError> for LogValue {
    fn from(error: DynError) -> Self {
        LogValue::Error(error)
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => LogValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scalars() {
        assert!(matches!(LogValue::from(1i32), LogValue::Int(1)));
        assert!(matches!(LogValue::from(1u64), LogValue::Uint(1)));
        assert!(matches!(LogValue::from(true), LogValue::Bool(true)));
        assert!(matches!(LogValue::from("x"), LogValue::Str(_)));
        assert!(matches!(LogValue::from(None::<i32>), LogValue::Null));
    }

    #[test]
    fn test_error_wrapping() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let value = LogValue::error(err);
        assert!(matches!(value, LogValue::Error(_)));
    }
}
