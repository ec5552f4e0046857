//! Logger trait implemented by every backend

use super::{
    caller::{CallSite, CallerInfo},
    error::Result,
    severity::Severity,
};
use chrono::SecondsFormat;
use std::backtrace::Backtrace;
use std::fmt::{self, Write as _};
use std::io::Write;

/// Byte destination returned by [`Logger::writer`].
pub type Sink<'a> = Box<dyn Write + 'a>;

/// A single logging backend with its own severity threshold.
///
/// Implementors provide [`threshold`](Logger::threshold),
/// [`writer`](Logger::writer) and a `Display` of the form
/// `backendName(THRESHOLD)`. The per-severity methods filter against the
/// threshold before doing any work, so a call below it captures no caller
/// info, formats nothing and touches no sink.
///
/// # Example
///
/// ```
/// use rust_log_dispatcher::core::{Logger, Sink};
/// use rust_log_dispatcher::{callsite, Severity};
/// use std::fmt;
///
/// struct Silent;
///
/// impl fmt::Display for Silent {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "silentLogger({})", self.threshold())
///     }
/// }
///
/// impl Logger for Silent {
///     fn threshold(&self) -> Severity {
///         Severity::Error
///     }
///
///     fn writer(&self, _severity: Severity) -> Sink<'_> {
///         Box::new(std::io::sink())
///     }
/// }
///
/// Silent.infof(&callsite!(), format_args!("dropped")).unwrap();
/// ```
pub trait Logger: Send + Sync + fmt::Display {
    /// Minimum severity this backend emits
    fn threshold(&self) -> Severity;

    /// Destination for messages of `severity`
    fn writer(&self, severity: Severity) -> Sink<'_>;

    /// Render a message without performing any I/O
    fn format_message(
        &self,
        severity: Severity,
        caller: &CallerInfo,
        args: fmt::Arguments<'_>,
    ) -> String {
        format_line(severity, caller, args)
    }

    /// Flush buffered output. Called before a fatal exit.
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn enabled(&self, severity: Severity) -> bool {
        severity.meets(self.threshold())
    }

    fn logf(&self, severity: Severity, site: &CallSite, args: fmt::Arguments<'_>) -> Result<()> {
        if !self.enabled(severity) {
            return Ok(());
        }

        let caller = CallerInfo::capture(site);
        let message = self.format_message(severity, &caller, args);
        self.writer(severity).write_all(message.as_bytes())?;
        Ok(())
    }

    #[inline]
    fn debugf(&self, site: &CallSite, args: fmt::Arguments<'_>) -> Result<()> {
        self.logf(Severity::Debug, site, args)
    }

    #[inline]
    fn infof(&self, site: &CallSite, args: fmt::Arguments<'_>) -> Result<()> {
        self.logf(Severity::Info, site, args)
    }

    #[inline]
    fn warnf(&self, site: &CallSite, args: fmt::Arguments<'_>) -> Result<()> {
        self.logf(Severity::Warn, site, args)
    }

    #[inline]
    fn errorf(&self, site: &CallSite, args: fmt::Arguments<'_>) -> Result<()> {
        self.logf(Severity::Error, site, args)
    }

    /// Emit a fatal message. Process termination belongs to the dispatcher.
    #[inline]
    fn fatalf(&self, site: &CallSite, args: fmt::Arguments<'_>) -> Result<()> {
        self.logf(Severity::Fatal, site, args)
    }
}

/// Shared line format: `"<SEVERITY> <message>\n"`.
///
/// FATAL messages keep that exact first line and are followed by the call
/// site and a backtrace of the calling thread.
pub fn format_line(severity: Severity, caller: &CallerInfo, args: fmt::Arguments<'_>) -> String {
    let mut out = format!("{} {}\n", severity, args);

    if severity == Severity::Fatal {
        let _ = writeln!(
            out,
            "    at {} [{}] {}",
            caller.site,
            caller.thread(),
            caller.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        );
        let _ = write!(out, "{}", Backtrace::force_capture());
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}
