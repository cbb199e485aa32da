//! Severity levels and threshold comparison

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{FacadeError, Result};

/// Event severity, most severe first.
///
/// The discriminant order is the threshold order: an event passes a
/// threshold when its severity is at least as severe, i.e. its ordinal is
/// not larger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Severity {
    Error = 0,
    Warn = 1,
    #[default]
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 5] = [
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
        }
    }

    /// Single-letter code used in tags and breadcrumb lines.
    pub fn letter(&self) -> char {
        match self {
            Severity::Error => 'E',
            Severity::Warn => 'W',
            Severity::Info => 'I',
            Severity::Debug => 'D',
            Severity::Trace => 'T',
        }
    }

    /// Numeric priority on the device-log scale (trace lowest).
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Trace => 2,
            Severity::Debug => 3,
            Severity::Info => 4,
            Severity::Warn => 5,
            Severity::Error => 6,
        }
    }

    /// True when an event at this severity passes `threshold`.
    #[inline]
    pub fn passes(&self, threshold: Severity) -> bool {
        (*self as u8) <= (threshold as u8)
    }

    /// Inverse of the discriminant cast. Out-of-range values clamp to the
    /// least severe level.
    pub fn from_ordinal(ordinal: u8) -> Severity {
        match ordinal {
            0 => Severity::Error,
            1 => Severity::Warn,
            2 => Severity::Info,
            3 => Severity::Debug,
            _ => Severity::Trace,
        }
    }

    /// Parse with recovery: unknown names fall back to the default (`Info`).
    pub fn parse_lenient(s: &str) -> Severity {
        s.parse().unwrap_or_else(|_| {
            eprintln!("[taglog] invalid severity '{}', using default (INFO)", s);
            Severity::Info
        })
    }

    /// Color name for terminal output.
    #[cfg(feature = "console")]
    pub fn color_code(&self) -> &'static str {
        match self {
            Severity::Error => "red",
            Severity::Warn => "yellow",
            Severity::Info => "green",
            Severity::Debug => "cyan",
            Severity::Trace => "white",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = FacadeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(Severity::Error),
            "WARN" | "WARNING" => Ok(Severity::Warn),
            "INFO" => Ok(Severity::Info),
            "DEBUG" => Ok(Severity::Debug),
            "TRACE" | "VERBOSE" => Ok(Severity::Trace),
            _ => Err(FacadeError::invalid_severity(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_ordering() {
        assert!(Severity::Error.passes(Severity::Error));
        assert!(Severity::Error.passes(Severity::Trace));
        assert!(Severity::Warn.passes(Severity::Info));
        assert!(!Severity::Debug.passes(Severity::Info));
        assert!(!Severity::Trace.passes(Severity::Error));
    }

    #[test]
    fn test_every_severity_passes_itself() {
        for severity in Severity::ALL {
            assert!(severity.passes(severity));
        }
    }

    #[test]
    fn test_priorities_increase_with_severity() {
        assert_eq!(Severity::Trace.priority(), 2);
        assert_eq!(Severity::Error.priority(), 6);
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0].priority() > pair[1].priority());
        }
    }

    #[test]
    fn test_letters() {
        let letters: String = Severity::ALL.iter().map(Severity::letter).collect();
        assert_eq!(letters, "EWIDT");
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!("VERBOSE".parse::<Severity>().unwrap(), Severity::Trace);
        assert_eq!("info".parse::<Severity>().unwrap(), Severity::Info);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("LOUD".parse::<Severity>().is_err());
    }

    #[test]
    fn test_parse_lenient_falls_back() {
        assert_eq!(Severity::parse_lenient("nonsense"), Severity::Info);
        assert_eq!(Severity::parse_lenient("error"), Severity::Error);
    }

    #[test]
    fn test_ordinal_round_trip() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_ordinal(severity as u8), severity);
        }
        assert_eq!(Severity::from_ordinal(200), Severity::Trace);
    }

    #[test]
    fn test_display_round_trip() {
        for severity in Severity::ALL {
            let parsed: Severity = severity.to_string().parse().unwrap();
            assert_eq!(parsed, severity);
        }
    }

    #[test]
    fn test_serde_round_trip() {
        for severity in Severity::ALL {
            let json = serde_json::to_string(&severity).unwrap();
            let back: Severity = serde_json::from_str(&json).unwrap();
            assert_eq!(back, severity);
        }
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(Severity::default(), Severity::Info);
    }
}
