//! UDP backend for remote collectors
//!
//! Each rendered message is sent as a single datagram. Delivery is
//! best-effort: a failed send is reported to the dispatcher and never
//! retried.

use crate::core::{Logger, LoggerError, Result, Severity, Sink};
use std::fmt;
use std::io::{self, Write};
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

/// Sends log lines to a remote collector over UDP
///
/// # Example
///
/// ```
/// use rust_log_dispatcher::backends::UdpLogger;
/// use rust_log_dispatcher::Severity;
///
/// let logger = UdpLogger::new("127.0.0.1:5140", Severity::Warn).unwrap();
/// assert_eq!(logger.to_string(), "udpLogger(WARN)");
/// ```
#[derive(Debug)]
pub struct UdpLogger {
    socket: UdpSocket,
    remote: SocketAddr,
    threshold: Severity,
}

impl UdpLogger {
    pub const NAME: &'static str = "udpLogger";

    /// Collector address used when building from a [`LogConfig`](crate::LogConfig)
    pub const DEFAULT_ADDR: &'static str = "127.0.0.1:514";

    /// Create a UDP logger targeting `addr`
    ///
    /// # Errors
    ///
    /// Returns error if `addr` does not resolve or the local socket cannot
    /// be bound and connected. No packet is sent during construction.
    pub fn new(addr: &str, threshold: Severity) -> Result<Self> {
        let remote = addr
            .to_socket_addrs()
            .map_err(|e| LoggerError::io_operation("resolving udp collector", addr, e))?
            .next()
            .ok_or_else(|| LoggerError::config(Self::NAME, format!("'{}' resolved to no address", addr)))?;

        let local = if remote.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(local)
            .map_err(|e| LoggerError::io_operation("binding udp socket", local, e))?;
        socket
            .connect(remote)
            .map_err(|e| LoggerError::io_operation("connecting udp socket", remote.to_string(), e))?;

        Ok(Self {
            socket,
            remote,
            threshold,
        })
    }

    pub fn remote(&self) -> SocketAddr {
        self.remote
    }
}

impl fmt::Display for UdpLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", Self::NAME, self.threshold)
    }
}

impl Logger for UdpLogger {
    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn writer(&self, _severity: Severity) -> Sink<'_> {
        Box::new(DatagramSink {
            socket: &self.socket,
        })
    }
}

/// Every `write` becomes one datagram.
struct DatagramSink<'a> {
    socket: &'a UdpSocket,
}

impl Write for DatagramSink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.socket.send(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callsite;
    use std::time::Duration;

    fn collector() -> UdpSocket {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        socket
    }

    #[test]
    fn test_udp_logger_creation() {
        let logger = UdpLogger::new("127.0.0.1:9999", Severity::Error).unwrap();
        assert_eq!(logger.remote(), "127.0.0.1:9999".parse().unwrap());
        assert_eq!(logger.to_string(), "udpLogger(ERROR)");
    }

    #[test]
    fn test_unresolvable_address() {
        let result = UdpLogger::new("not an address", Severity::Info);
        assert!(result.is_err());
    }

    #[test]
    fn test_sends_one_datagram_per_message() {
        let collector = collector();
        let addr = collector.local_addr().unwrap().to_string();
        let logger = UdpLogger::new(&addr, Severity::Info).unwrap();

        logger
            .warnf(&callsite!(), format_args!("disk at {}%", 90))
            .unwrap();

        let mut buf = [0u8; 1024];
        let len = collector.recv(&mut buf).unwrap();
        assert_eq!(&buf[..len], b"WARN disk at 90%\n");
    }

    #[test]
    fn test_below_threshold_sends_nothing() {
        let collector = collector();
        collector
            .set_read_timeout(Some(Duration::from_millis(100)))
            .unwrap();
        let addr = collector.local_addr().unwrap().to_string();
        let logger = UdpLogger::new(&addr, Severity::Error).unwrap();

        logger.infof(&callsite!(), format_args!("ignored")).unwrap();

        let mut buf = [0u8; 64];
        assert!(collector.recv(&mut buf).is_err());
    }
}
