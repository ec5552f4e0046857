//! Construction of backends from configuration

use super::{
    error::{LoggerError, Result},
    logger::Logger,
    severity::Severity,
};
use crate::backends::{ConsoleLogger, SysLogger, UdpLogger};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

pub const CONSOLE_LOGGER_NAME: &str = "console";
pub const SYS_LOGGER_NAME: &str = "syslog";
pub const UDP_LOGGER_NAME: &str = "udp";

/// One backend entry: which backend, and its minimum severity.
///
/// Both fields are kept as text so a list of configs can be deserialized
/// as-is and validated by [`new_logger`].
///
/// ```
/// use rust_log_dispatcher::LogConfig;
///
/// let config = LogConfig::new("console", "info");
/// assert_eq!(config.backend, "console");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub backend: String,
    pub severity: String,
}

impl LogConfig {
    pub fn new(backend: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            severity: severity.into(),
        }
    }
}

/// The supported backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Console,
    Syslog,
    Udp,
}

impl FromStr for BackendKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            CONSOLE_LOGGER_NAME => Ok(BackendKind::Console),
            SYS_LOGGER_NAME | "system-log" => Ok(BackendKind::Syslog),
            UDP_LOGGER_NAME => Ok(BackendKind::Udp),
            _ => Err(LoggerError::unknown_backend(s)),
        }
    }
}

/// Build one backend from `config` without installing it anywhere.
///
/// # Errors
///
/// [`LoggerError::InvalidSeverity`] when the severity text is not
/// recognised, [`LoggerError::UnknownBackend`] when the backend name is
/// not one of `console`, `syslog` or `udp`, or an IO error when the
/// backend's socket cannot be created.
pub fn new_logger(config: &LogConfig) -> Result<Arc<dyn Logger>> {
    let threshold = Severity::parse(&config.severity)?;

    let logger: Arc<dyn Logger> = match config.backend.parse::<BackendKind>()? {
        BackendKind::Console => Arc::new(ConsoleLogger::new(threshold)),
        BackendKind::Syslog => Arc::new(SysLogger::new(threshold)?),
        BackendKind::Udp => Arc::new(UdpLogger::new(UdpLogger::DEFAULT_ADDR, threshold)?),
    };

    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_logger_per_backend() {
        let logger = new_logger(&LogConfig::new(CONSOLE_LOGGER_NAME, "info")).unwrap();
        assert_eq!(logger.to_string(), "consoleLogger(INFO)");

        let logger = new_logger(&LogConfig::new(SYS_LOGGER_NAME, "warn")).unwrap();
        assert_eq!(logger.to_string(), "sysLogger(WARN)");

        let logger = new_logger(&LogConfig::new(UDP_LOGGER_NAME, "error")).unwrap();
        assert_eq!(logger.to_string(), "udpLogger(ERROR)");
    }

    #[test]
    fn test_unknown_backend() {
        let result = new_logger(&LogConfig::new("SuperDuperLogger", "info"));
        assert!(matches!(result, Err(LoggerError::UnknownBackend { ref name }) if name == "SuperDuperLogger"));
    }

    #[test]
    fn test_invalid_severity() {
        let result = new_logger(&LogConfig::new(CONSOLE_LOGGER_NAME, "chatty"));
        assert!(matches!(result, Err(LoggerError::InvalidSeverity { .. })));
    }

    #[test]
    fn test_backend_names_are_case_insensitive() {
        assert_eq!("Console".parse::<BackendKind>().unwrap(), BackendKind::Console);
        assert_eq!("SYSLOG".parse::<BackendKind>().unwrap(), BackendKind::Syslog);
        assert_eq!("system-log".parse::<BackendKind>().unwrap(), BackendKind::Syslog);
        assert_eq!("udp".parse::<BackendKind>().unwrap(), BackendKind::Udp);
        assert!("file".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_backend_names_outside_fixed_set() {
        for name in ["stdout", "stderr", " console", "udp ", "system log"] {
            let result = new_logger(&LogConfig::new(name, "info"));
            assert!(
                matches!(result, Err(LoggerError::UnknownBackend { .. })),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_severity_outside_fixed_set() {
        for severity in ["warning", " info", "error\n"] {
            let result = new_logger(&LogConfig::new(CONSOLE_LOGGER_NAME, severity));
            assert!(
                matches!(result, Err(LoggerError::InvalidSeverity { .. })),
                "{:?} should be rejected",
                severity
            );
        }
    }

    #[test]
    fn test_threshold_from_config() {
        let logger = new_logger(&LogConfig::new("console", "FATAL")).unwrap();
        assert_eq!(logger.threshold(), Severity::Fatal);
    }
}
