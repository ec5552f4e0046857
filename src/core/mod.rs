//! Core dispatcher types and traits

pub mod caller;
pub mod dispatcher;
pub mod error;
pub mod factory;
pub mod logger;
pub mod metrics;
pub mod severity;

pub use caller::{CallSite, CallerInfo};
pub use dispatcher::{global, init, init_with_config, Dispatcher, ExitHandler, FATAL_EXIT_CODE};
pub use error::{LoggerError, Result};
pub use factory::{
    new_logger, BackendKind, LogConfig, CONSOLE_LOGGER_NAME, SYS_LOGGER_NAME, UDP_LOGGER_NAME,
};
pub use logger::{format_line, Logger, Sink};
pub use metrics::DispatchMetrics;
pub use severity::Severity;
