//! Local syslog backend
//!
//! Messages are framed with an RFC 3164 header and sent as unix datagrams
//! to the local syslog daemon. Construction never talks to the daemon, so a
//! missing socket only shows up as a write failure at dispatch time.

use crate::core::{Logger, LoggerError, Result, Severity, Sink};
use chrono::Local;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::net::UnixDatagram;

/// Socket paths used by common syslog daemons, in lookup order
pub const SOCKET_PATHS: [&str; 3] = ["/dev/log", "/var/run/syslog", "/var/run/log"];

/// Syslog facility for the PRI field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facility {
    #[default]
    User,
    Daemon,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

impl Facility {
    pub fn code(&self) -> u8 {
        match self {
            Facility::User => 1,
            Facility::Daemon => 3,
            Facility::Local0 => 16,
            Facility::Local1 => 17,
            Facility::Local2 => 18,
            Facility::Local3 => 19,
            Facility::Local4 => 20,
            Facility::Local5 => 21,
            Facility::Local6 => 22,
            Facility::Local7 => 23,
        }
    }

    /// PRI value for a message of `severity` in this facility
    pub fn priority(&self, severity: Severity) -> u8 {
        self.code() * 8 + severity.syslog_code()
    }
}

pub struct SysLogger {
    threshold: Severity,
    facility: Facility,
    tag: String,
    pid: u32,
    socket_path: Option<PathBuf>,
    #[cfg(unix)]
    socket: UnixDatagram,
}

impl SysLogger {
    pub const NAME: &'static str = "sysLogger";

    /// Create a syslog logger using the first socket in [`SOCKET_PATHS`]
    /// that exists.
    ///
    /// # Errors
    ///
    /// Returns error if the local datagram socket cannot be created.
    pub fn new(threshold: Severity) -> Result<Self> {
        let socket_path = SOCKET_PATHS
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf);

        Ok(Self {
            threshold,
            facility: Facility::default(),
            tag: default_tag(),
            pid: std::process::id(),
            socket_path,
            #[cfg(unix)]
            socket: UnixDatagram::unbound()
                .map_err(|e| LoggerError::io_operation("creating syslog socket", "unbound datagram", e))?,
        })
    }

    #[must_use]
    pub fn with_facility(mut self, facility: Facility) -> Self {
        self.facility = facility;
        self
    }

    /// Set the program tag; defaults to the executable name
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Send to `path` instead of the detected daemon socket
    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    pub fn socket_path(&self) -> Option<&Path> {
        self.socket_path.as_deref()
    }

    /// `<PRI>Mmm dd hh:mm:ss TAG[PID]: `
    fn header(&self, severity: Severity) -> String {
        format!(
            "<{}>{} {}[{}]: ",
            self.facility.priority(severity),
            Local::now().format("%b %e %H:%M:%S"),
            self.tag,
            self.pid
        )
    }

    fn send(&self, datagram: &[u8]) -> io::Result<usize> {
        let path = self.socket_path.as_deref().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no syslog socket found")
        })?;
        self.send_to(datagram, path)
    }

    #[cfg(unix)]
    fn send_to(&self, datagram: &[u8], path: &Path) -> io::Result<usize> {
        self.socket.send_to(datagram, path)
    }

    #[cfg(not(unix))]
    fn send_to(&self, _datagram: &[u8], _path: &Path) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "syslog requires unix domain sockets",
        ))
    }
}

fn default_tag() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

impl fmt::Display for SysLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", Self::NAME, self.threshold)
    }
}

impl fmt::Debug for SysLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SysLogger")
            .field("threshold", &self.threshold)
            .field("facility", &self.facility)
            .field("tag", &self.tag)
            .field("socket_path", &self.socket_path)
            .finish()
    }
}

impl Logger for SysLogger {
    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn writer(&self, severity: Severity) -> Sink<'_> {
        Box::new(SyslogSink {
            logger: self,
            severity,
        })
    }
}

/// Frames every `write` as one syslog datagram.
struct SyslogSink<'a> {
    logger: &'a SysLogger,
    severity: Severity,
}

impl Write for SyslogSink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let body = buf.strip_suffix(b"\n").unwrap_or(buf);
        let mut datagram = self.logger.header(self.severity).into_bytes();
        datagram.extend_from_slice(body);

        self.logger.send(&datagram)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
