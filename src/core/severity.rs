//! Severity definitions

use super::error::{LoggerError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Severity {
    /// Every severity in ascending order.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Parse configuration text such as `"info"` or `"WARN"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_log_dispatcher::Severity;
    ///
    /// assert_eq!(Severity::parse("warn").unwrap(), Severity::Warn);
    /// assert!(Severity::parse("loud").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        text.parse()
    }

    /// True when a message of this severity passes `threshold`.
    #[inline]
    pub fn meets(&self, threshold: Severity) -> bool {
        *self >= threshold
    }

    /// RFC 5424 numeric severity used in the syslog PRI field
    pub fn syslog_code(&self) -> u8 {
        match self {
            Severity::Debug => 7,
            Severity::Info => 6,
            Severity::Warn => 4,
            Severity::Error => 3,
            Severity::Fatal => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARN" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            "FATAL" => Ok(Severity::Fatal),
            _ => Err(LoggerError::invalid_severity(s)),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Severity::parse("debug").unwrap(), Severity::Debug);
        assert_eq!(Severity::parse("Info").unwrap(), Severity::Info);
        assert_eq!(Severity::parse("WARN").unwrap(), Severity::Warn);
        assert_eq!(Severity::parse("eRRoR").unwrap(), Severity::Error);
        assert_eq!(Severity::parse("fAtAl").unwrap(), Severity::Fatal);
    }

    #[test]
    fn test_parse_rejects_unknown_text() {
        for text in [
            "", "trace", "verbose", "inf", "critical", "warning", " error ", "info\n",
        ] {
            let err = Severity::parse(text).unwrap_err();
            assert!(
                matches!(err, LoggerError::InvalidSeverity { .. }),
                "unexpected error for {:?}: {}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_meets_threshold() {
        assert!(Severity::Warn.meets(Severity::Warn));
        assert!(Severity::Error.meets(Severity::Warn));
        assert!(Severity::Fatal.meets(Severity::Debug));
        assert!(!Severity::Info.meets(Severity::Warn));
        assert!(!Severity::Debug.meets(Severity::Info));
    }

    #[test]
    fn test_all_is_ascending() {
        assert!(Severity::ALL.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_syslog_codes() {
        assert_eq!(Severity::Debug.syslog_code(), 7);
        assert_eq!(Severity::Info.syslog_code(), 6);
        assert_eq!(Severity::Warn.syslog_code(), 4);
        assert_eq!(Severity::Error.syslog_code(), 3);
        assert_eq!(Severity::Fatal.syslog_code(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Severity::Info.to_string(), "INFO");
        assert_eq!(format!("{}", Severity::Fatal), "FATAL");
    }
}
