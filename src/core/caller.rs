//! Invocation site capture

use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::fmt;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Static location of a log call, known at compile time.
///
/// Built by [`callsite!`](crate::callsite) from `file!()`, `line!()` and
/// `module_path!()`, so constructing one costs nothing at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub module_path: &'static str,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, module_path: &'static str) -> Self {
        Self {
            file,
            line,
            module_path,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} in {}", self.file, self.line, self.module_path)
    }
}

/// Snapshot of a log call taken right before a backend emits it.
///
/// Backends only capture this once a message has passed their threshold.
#[derive(Debug, Clone)]
pub struct CallerInfo {
    pub site: CallSite,
    pub thread_id: String,
    pub thread_name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl CallerInfo {
    pub fn capture(site: &CallSite) -> Self {
        Self {
            site: *site,
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            timestamp: Utc::now(),
        }
    }

    /// Thread name when set, thread id otherwise
    pub fn thread(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }
}

/// Expands to the [`CallSite`] of the macro invocation.
#[macro_export]
macro_rules! callsite {
    () => {
        $crate::CallSite::new(file!(), line!(), module_path!())
    };
}
