//! Composite dispatcher fanning each log call out to an ordered chain of
//! backends.

use super::{
    caller::CallSite,
    error::Result,
    factory::{self, LogConfig},
    logger::Logger,
    metrics::DispatchMetrics,
    severity::Severity,
};
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Exit status used after a fatal message has been dispatched
pub const FATAL_EXIT_CODE: i32 = 1;

/// Called with [`FATAL_EXIT_CODE`] once a fatal message reached every backend
pub type ExitHandler = Arc<dyn Fn(i32) + Send + Sync>;

type Chain = Arc<[Arc<dyn Logger>]>;

/// An ordered chain of backends and the broadcast logic over it.
///
/// The chain is replaced wholesale by [`init`](Dispatcher::init) and
/// [`init_with_config`](Dispatcher::init_with_config) and never mutated in
/// place. Log calls clone the current chain and release the lock before
/// touching any backend, so a slow sink never holds up re-initialization.
///
/// # Example
///
/// ```
/// use rust_log_dispatcher::{infof, Dispatcher, LogConfig};
///
/// let dispatcher = Dispatcher::new();
/// dispatcher
///     .init_with_config(&[LogConfig::new("console", "info")])
///     .unwrap();
///
/// infof!(in dispatcher, "listening on port {}", 8080);
/// ```
pub struct Dispatcher {
    chain: RwLock<Option<Chain>>,
    metrics: DispatchMetrics,
    exit_handler: ExitHandler,
}

impl Dispatcher {
    /// Create an uninitialized dispatcher that exits the process on fatal
    #[must_use]
    pub fn new() -> Self {
        Self::with_exit_handler(Arc::new(exit_process))
    }

    /// Create a dispatcher whose fatal path calls `handler` instead of
    /// exiting the process
    #[must_use]
    pub fn with_exit_handler(handler: ExitHandler) -> Self {
        Self {
            chain: RwLock::new(None),
            metrics: DispatchMetrics::new(),
            exit_handler: handler,
        }
    }

    /// Install `loggers` in order, replacing whatever was installed before
    pub fn init<I>(&self, loggers: I)
    where
        I: IntoIterator<Item = Arc<dyn Logger>>,
    {
        let chain: Chain = loggers.into_iter().collect();
        *self.chain.write() = Some(chain);
    }

    /// Build every config in order and install the result.
    ///
    /// Nothing is installed unless every config builds.
    pub fn init_with_config(&self, configs: &[LogConfig]) -> Result<()> {
        let loggers = configs
            .iter()
            .map(factory::new_logger)
            .collect::<Result<Vec<_>>>()?;

        self.init(loggers);
        Ok(())
    }

    /// Build a single backend without installing it
    pub fn new_logger(&self, config: &LogConfig) -> Result<Arc<dyn Logger>> {
        factory::new_logger(config)
    }

    pub fn is_initialized(&self) -> bool {
        self.chain.read().is_some()
    }

    /// The installed chain, in dispatch order
    pub fn loggers(&self) -> Vec<Arc<dyn Logger>> {
        self.snapshot()
            .map(|chain| chain.to_vec())
            .unwrap_or_default()
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    fn snapshot(&self) -> Option<Chain> {
        self.chain.read().clone()
    }

    /// Broadcast a message of `severity` to the installed chain.
    ///
    /// A [`Severity::Fatal`] message is followed by a flush of every
    /// backend and a call to the exit handler. Before the first successful
    /// `init` every call, fatal included, is a no-op.
    pub fn logf(&self, severity: Severity, site: &CallSite, args: fmt::Arguments<'_>) {
        let Some(chain) = self.snapshot() else {
            return;
        };

        self.metrics.record_dispatched();
        for (idx, logger) in chain.iter().enumerate() {
            self.emit(idx, logger.as_ref(), severity, site, args);
        }

        if severity == Severity::Fatal {
            Self::flush_chain(&chain);
            (self.exit_handler)(FATAL_EXIT_CODE);
        }
    }

    #[inline]
    pub fn debugf(&self, site: &CallSite, args: fmt::Arguments<'_>) {
        self.logf(Severity::Debug, site, args);
    }

    #[inline]
    pub fn infof(&self, site: &CallSite, args: fmt::Arguments<'_>) {
        self.logf(Severity::Info, site, args);
    }

    #[inline]
    pub fn warnf(&self, site: &CallSite, args: fmt::Arguments<'_>) {
        self.logf(Severity::Warn, site, args);
    }

    #[inline]
    pub fn errorf(&self, site: &CallSite, args: fmt::Arguments<'_>) {
        self.logf(Severity::Error, site, args);
    }

    /// Dispatch a fatal message, then terminate through the exit handler
    /// once a chain is installed
    #[inline]
    pub fn fatalf(&self, site: &CallSite, args: fmt::Arguments<'_>) {
        self.logf(Severity::Fatal, site, args);
    }

    /// Call one backend with panic isolation. Errors and panics are reported
    /// on stderr and counted, never returned.
    fn emit(
        &self,
        idx: usize,
        logger: &dyn Logger,
        severity: Severity,
        site: &CallSite,
        args: fmt::Arguments<'_>,
    ) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| match severity {
            Severity::Debug => logger.debugf(site, args),
            Severity::Info => logger.infof(site, args),
            Severity::Warn => logger.warnf(site, args),
            Severity::Error => logger.errorf(site, args),
            Severity::Fatal => logger.fatalf(site, args),
        }));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.metrics.record_write_failure();
                eprintln!("[LOGGER ERROR] Logger #{} {} failed: {}", idx, logger, e);
            }
            Err(panic_info) => {
                self.metrics.record_backend_panic();
                eprintln!(
                    "[LOGGER CRITICAL] Logger #{} {} panicked: {}. \
                     Other loggers continue to function.",
                    idx,
                    logger,
                    panic_message(panic_info.as_ref())
                );
            }
        }
    }

    fn flush_chain(chain: &[Arc<dyn Logger>]) {
        for (idx, logger) in chain.iter().enumerate() {
            let flushed = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| logger.flush()));
            match flushed {
                Ok(Ok(())) => {}
                Ok(Err(e)) => eprintln!("[LOGGER ERROR] Logger #{} flush failed: {}", idx, e),
                Err(panic_info) => eprintln!(
                    "[LOGGER CRITICAL] Logger #{} panicked during flush: {}",
                    idx,
                    panic_message(panic_info.as_ref())
                ),
            }
        }
    }
}

fn exit_process(code: i32) {
    std::process::exit(code)
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Option<Vec<String>> = self
            .snapshot()
            .map(|chain| chain.iter().map(|logger| logger.to_string()).collect());
        f.debug_struct("Dispatcher")
            .field("loggers", &names)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

static GLOBAL: LazyLock<Dispatcher> = LazyLock::new(Dispatcher::new);

/// The process-wide dispatcher used by the logging macros
pub fn global() -> &'static Dispatcher {
    &GLOBAL
}

/// Install `loggers` on the process-wide dispatcher
pub fn init<I>(loggers: I)
where
    I: IntoIterator<Item = Arc<dyn Logger>>,
{
    global().init(loggers);
}

/// Build and install `configs` on the process-wide dispatcher.
///
/// On error the previously installed chain stays in place.
pub fn init_with_config(configs: &[LogConfig]) -> Result<()> {
    global().init_with_config(configs)
}
