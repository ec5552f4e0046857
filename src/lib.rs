//! # Rust Log Dispatcher
//!
//! A process-wide logging facade that fans each log call out to an ordered
//! chain of backends, each filtered by its own minimum severity.
//!
//! ## Features
//!
//! - **Ordered Fan-out**: every call reaches every installed backend, in install order
//! - **Per-backend Thresholds**: each backend decides on its own whether to emit
//! - **Built-in Backends**: console, local syslog and remote UDP
//! - **Atomic Re-initialization**: a failed config never leaves a half-built chain
//!
//! ## Example
//!
//! ```
//! use rust_log_dispatcher::{init_with_config, infof, warnf, LogConfig};
//!
//! init_with_config(&[
//!     LogConfig::new("console", "info"),
//!     LogConfig::new("udp", "warn"),
//! ])
//! .expect("valid logging config");
//!
//! infof!("hello {}", "world");
//! warnf!("disk at {}%", 90);
//! ```

pub mod backends;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::backends::{ConsoleLogger, Facility, SysLogger, UdpLogger};
    pub use crate::core::{
        global, init, init_with_config, new_logger, CallSite, CallerInfo, DispatchMetrics,
        Dispatcher, LogConfig, Logger, LoggerError, Result, Severity, Sink,
    };
    pub use crate::{debugf, errorf, fatalf, infof, logf, warnf};
}

pub use crate::backends::{ConsoleLogger, Facility, SysLogger, UdpLogger};
pub use crate::core::{
    global, init, init_with_config, new_logger, BackendKind, CallSite, CallerInfo,
    DispatchMetrics, Dispatcher, ExitHandler, LogConfig, Logger, LoggerError, Result, Severity,
    Sink, CONSOLE_LOGGER_NAME, FATAL_EXIT_CODE, SYS_LOGGER_NAME, UDP_LOGGER_NAME,
};
