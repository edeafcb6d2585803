//! Call-site capturing logging macros.
//!
//! Each macro resolves the enclosing function's path at compile time and
//! hands the resulting [`CallSite`](crate::CallSite) to the logger, so callers
//! never pass their own context:
//!
//! ```ignore
//! use logfox_core::{info, error};
//!
//! impl Engine {
//!     fn boot(&self) {
//!         info!(self.logger, "boot");               // (N: Engine F: boot L: ..)
//!         error!(self.logger, "missing {}", asset); // + call stack
//!     }
//! }
//! ```
//!
//! A call site that cannot be resolved drops the call without emitting.

/// Path of the enclosing function, e.g. `game::engine::Engine::boot`.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_path {
    () => {{
        fn __logfox_here() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(__logfox_here);
        name.strip_suffix("::__logfox_here").unwrap_or(name)
    }};
}

/// Resolve the current [`CallSite`](crate::CallSite).
///
/// Evaluates to `Result<CallSite>`.
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::from_function_path($crate::__function_path!(), ::std::line!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __route {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log_captured($crate::call_site!(), $severity, &::std::format!($($arg)+))
    };
}

/// Log at [`Severity::Info`](crate::Severity::Info).
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__route!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log at [`Severity::Warning`](crate::Severity::Warning).
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__route!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log at [`Severity::Error`](crate::Severity::Error) and print the call stack.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__route!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log at [`Severity::Fatal`](crate::Severity::Fatal), then escalate.
///
/// With a process host this does not return.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__route!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}

/// Log the one-shot system descriptor line.
///
/// Evaluates to `Result<()>`; fails with a precondition error before the
/// host runtime is running.
#[macro_export]
macro_rules! system_info {
    ($logger:expr) => {
        $crate::call_site!().and_then(|site| $logger.log_system_info(site))
    };
}
