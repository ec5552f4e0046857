//! Backend implementations

pub mod console;
pub mod syslog;
pub mod udp;

pub use console::ConsoleLogger;
pub use syslog::{Facility, SysLogger};
pub use udp::UdpLogger;

pub use crate::core::Logger;
