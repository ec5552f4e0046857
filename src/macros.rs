//! printf-style logging macros.
//!
//! Each macro captures its call site, formats with `format_args!` and
//! broadcasts to the process-wide [`Dispatcher`](crate::Dispatcher).
//! Prefix the arguments with `in <dispatcher>,` to target another instance.
//!
//! # Examples
//!
//! ```
//! use rust_log_dispatcher::prelude::*;
//! use rust_log_dispatcher::{infof, warnf};
//!
//! // Global dispatcher
//! infof!("Server started");
//!
//! // Explicit dispatcher
//! let dispatcher = Dispatcher::new();
//! dispatcher.init_with_config(&[LogConfig::new("console", "warn")]).unwrap();
//! warnf!(in dispatcher, "Retry attempt {} of {}", 3, 5);
//! ```

/// Log a message at a runtime severity.
///
/// ```
/// # use rust_log_dispatcher::prelude::*;
/// use rust_log_dispatcher::logf;
/// let dispatcher = Dispatcher::new();
/// logf!(in dispatcher, Severity::Info, "Simple message");
/// logf!(Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! logf {
    (in $dispatcher:expr, $severity:expr, $($arg:tt)+) => {
        $dispatcher.logf($severity, &$crate::callsite!(), format_args!($($arg)+))
    };
    ($severity:expr, $($arg:tt)+) => {
        $crate::logf!(in $crate::global(), $severity, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debugf {
    (in $dispatcher:expr, $($arg:tt)+) => {
        $crate::logf!(in $dispatcher, $crate::Severity::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::logf!($crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// ```
/// use rust_log_dispatcher::infof;
/// infof!("Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! infof {
    (in $dispatcher:expr, $($arg:tt)+) => {
        $crate::logf!(in $dispatcher, $crate::Severity::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::logf!($crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warnf {
    (in $dispatcher:expr, $($arg:tt)+) => {
        $crate::logf!(in $dispatcher, $crate::Severity::Warn, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::logf!($crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! errorf {
    (in $dispatcher:expr, $($arg:tt)+) => {
        $crate::logf!(in $dispatcher, $crate::Severity::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::logf!($crate::Severity::Error, $($arg)+)
    };
}

/// Log a fatal message, then terminate.
///
/// On the process-wide dispatcher this exits with status 1 once every
/// installed backend has been written to and flushed. Nothing happens
/// before the dispatcher is initialized.
///
/// ```no_run
/// use rust_log_dispatcher::fatalf;
/// fatalf!("Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatalf {
    (in $dispatcher:expr, $($arg:tt)+) => {
        $crate::logf!(in $dispatcher, $crate::Severity::Fatal, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::logf!($crate::Severity::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Dispatcher, Severity};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_logf_macro() {
        let dispatcher = Dispatcher::new();
        dispatcher.init(Vec::new());
        logf!(in dispatcher, Severity::Info, "Test message");
        logf!(in dispatcher, Severity::Info, "Formatted: {}", 42);
        assert_eq!(dispatcher.metrics().dispatched(), 2);
    }

    #[test]
    fn test_severity_macros() {
        let dispatcher = Dispatcher::new();
        dispatcher.init(Vec::new());
        debugf!(in dispatcher, "Count: {}", 5);
        infof!(in dispatcher, "Items: {}", 100);
        warnf!(in dispatcher, "Retry {} of {}", 1, 3);
        errorf!(in dispatcher, "Code: {}", 500);
        assert_eq!(dispatcher.metrics().dispatched(), 4);
    }

    #[test]
    fn test_fatalf_macro_calls_exit_handler() {
        let exited = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&exited);
        let dispatcher = Dispatcher::with_exit_handler(Arc::new(move |_| {
            flag.store(true, Ordering::SeqCst);
        }));
        dispatcher.init(Vec::new());

        fatalf!(in dispatcher, "Critical failure: {}", "system");
        assert!(exited.load(Ordering::SeqCst));
    }

    #[test]
    fn test_macros_accept_dispatcher_reference() {
        let dispatcher = Dispatcher::new();
        dispatcher.init(Vec::new());
        let by_ref = &dispatcher;
        infof!(in by_ref, "through a reference");
        assert_eq!(dispatcher.metrics().dispatched(), 1);
    }
}
