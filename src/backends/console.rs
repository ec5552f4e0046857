//! Console backend

use crate::core::{Logger, Result, Severity, Sink};
use std::fmt;
use std::io::{self, Write};

/// Writes ERROR and FATAL to stderr and everything else to stdout.
///
/// # Example
///
/// ```
/// use rust_log_dispatcher::backends::ConsoleLogger;
/// use rust_log_dispatcher::Severity;
///
/// let logger = ConsoleLogger::new(Severity::Info);
/// assert_eq!(logger.to_string(), "consoleLogger(INFO)");
/// ```
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    threshold: Severity,
}

impl ConsoleLogger {
    pub const NAME: &'static str = "consoleLogger";

    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(Severity::default())
    }
}

impl fmt::Display for ConsoleLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", Self::NAME, self.threshold)
    }
}

impl Logger for ConsoleLogger {
    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn writer(&self, severity: Severity) -> Sink<'_> {
        // Route Error and Fatal levels to stderr, others to stdout
        match severity {
            Severity::Error | Severity::Fatal => Box::new(io::stderr().lock()),
            _ => Box::new(io::stdout().lock()),
        }
    }

    fn flush(&self) -> Result<()> {
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callsite;
    use std::process::Command;

    const CHILD_ENV: &str = "LOG_DISPATCHER_CONSOLE_CHILD";

    #[test]
    fn test_display() {
        assert_eq!(ConsoleLogger::new(Severity::Warn).to_string(), "consoleLogger(WARN)");
        assert_eq!(ConsoleLogger::default().to_string(), "consoleLogger(INFO)");
    }

    #[test]
    fn test_streams_by_severity() {
        if std::env::var_os(CHILD_ENV).is_some() {
            let logger = ConsoleLogger::new(Severity::Info);
            logger.debugf(&callsite!(), format_args!("cache warm")).unwrap();
            logger.infof(&callsite!(), format_args!("listening on {}", 8080)).unwrap();
            logger.warnf(&callsite!(), format_args!("disk at {}%", 90)).unwrap();
            logger.errorf(&callsite!(), format_args!("request failed")).unwrap();
            logger.flush().unwrap();
            return;
        }

        let output = Command::new(std::env::current_exe().unwrap())
            .args([
                "--exact",
                "backends::console::tests::test_streams_by_severity",
                "--nocapture",
                "--quiet",
            ])
            .env(CHILD_ENV, "1")
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let out_lines: Vec<&str> = stdout.lines().collect();
        let info = out_lines.iter().position(|l| *l == "INFO listening on 8080");
        let warn = out_lines.iter().position(|l| *l == "WARN disk at 90%");
        assert!(info.is_some() && info < warn, "stdout: {:?}", stdout);
        assert!(!stdout.contains("DEBUG") && !stdout.contains("ERROR"));

        assert_eq!(stderr, "ERROR request failed\n");
    }
}
