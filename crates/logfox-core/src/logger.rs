//! The severity router and fatal escalation.
//!
//! A [`Logger`] turns each call into exactly one [`LogEvent`], writes the
//! formatted line to its sink, and rebroadcasts it to subscribers while the
//! debug flag is set. Error and Fatal calls also print the call stack.
//!
//! ## Fatal escalation
//!
//! ```text
//! Normal ──fatal()──► LoggingFatal ──► Terminated
//!                      │
//!                      ├─ Fatal line + call stack
//!                      ├─ host state snapshot
//!                      ├─ Info "Quitting..."
//!                      ├─ blocking alert
//!                      └─ host.quit()
//! ```
//!
//! Once terminated, further calls are dropped.

use crate::broadcast::Broadcaster;
use crate::format::format;
use crate::host::ProcessHost;
use crate::sink::ConsoleSink;
use crate::term;
use crate::time::{self, Clock, SystemClock};
use logfox_types::{
    CallSite, Host, LogEvent, LogFoxError, LogFoxSettings, Markup, Result, Severity, Sink,
    SubscriptionId, Tag,
};
use parking_lot::Mutex;
use std::backtrace::Backtrace;
use std::fmt;
use std::sync::Arc;

/// Exit code requested from the host after a fatal call.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Title of the blocking alert shown on a fatal call.
pub const FATAL_ALERT_TITLE: &str = "Fatal error";

/// Message logged right before the alert.
pub const QUITTING_MESSAGE: &str = "Quitting...";

/// Where the logger is in the fatal escalation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationState {
    /// Accepting log calls
    Normal,
    /// A fatal call is being processed
    LoggingFatal,
    /// Shutdown was requested; calls are dropped
    Terminated,
}

/// Severity router, formatter front-end and broadcast owner.
pub struct Logger {
    sink: Arc<dyn Sink>,
    host: Arc<dyn Host>,
    clock: Arc<dyn Clock>,
    broadcaster: Broadcaster,
    broadcast_markup: Markup,
    time_format: String,
    state: Mutex<EscalationState>,
}

impl Logger {
    /// Start building a logger.
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Log at Info.
    pub fn info(&self, site: CallSite, message: &str) {
        self.log(site, Severity::Info, message);
    }

    /// Log at Warning.
    pub fn warning(&self, site: CallSite, message: &str) {
        self.log(site, Severity::Warning, message);
    }

    /// Log at Error and print the call stack.
    pub fn error(&self, site: CallSite, message: &str) {
        self.log(site, Severity::Error, message);
    }

    /// Log at Fatal, then escalate to process termination.
    pub fn fatal(&self, site: CallSite, message: &str) {
        self.log(site, Severity::Fatal, message);
    }

    /// Route one call by severity.
    pub fn log(&self, site: CallSite, severity: Severity, message: &str) {
        if self.state() == EscalationState::Terminated {
            tracing::debug!(%site, %severity, "log call after termination dropped");
            return;
        }

        let event = LogEvent::new(self.timestamp(), site, severity, message);
        self.emit(&event);

        if severity.captures_stack() {
            self.sink.write_diagnostic(&Backtrace::force_capture().to_string());
        }

        if severity == Severity::Fatal {
            self.escalate(&event);
        }
    }

    /// Route a call whose site was resolved by one of the logging macros.
    ///
    /// A site that failed to resolve drops the call: nothing reaches the sink
    /// or the subscribers, and a Fatal call does not escalate.
    #[doc(hidden)]
    pub fn log_captured(&self, site: Result<CallSite>, severity: Severity, message: &str) {
        match site {
            Ok(site) => self.log(site, severity, message),
            Err(err) => dropped_call(&err),
        }
    }

    /// Log the one-shot system descriptor line.
    ///
    /// # Errors
    ///
    /// Returns [`LogFoxError::Precondition`] when the host runtime is not
    /// running yet; nothing is emitted in that case.
    pub fn log_system_info(&self, site: CallSite) -> Result<()> {
        if !self.host.is_running() {
            logfox_types::bail!(
                Precondition,
                "system info requested before the host runtime is running"
            );
        }
        if self.state() == EscalationState::Terminated {
            return Ok(());
        }

        let system = self.host.system()?;
        let message = format!(
            "\n{} Version: {}\nOS: {} {}\nCPU: {}\nRAM: {} GB available\n",
            system.host_name,
            system.host_version,
            system.platform,
            system.model,
            system.processor,
            system.total_memory_gib()
        );

        let event = LogEvent::tagged(self.timestamp(), site, Tag::SystemInfo, message);
        self.emit(&event);
        Ok(())
    }

    /// Register a broadcast subscriber.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.broadcaster.subscribe(callback)
    }

    /// The broadcaster fed by this logger.
    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Whether lines are rebroadcast to subscribers.
    pub fn is_debug_mode(&self) -> bool {
        self.broadcaster.is_enabled()
    }

    /// Override the debug/interactive flag resolved at construction.
    pub fn set_debug_mode(&self, enabled: bool) {
        self.broadcaster.set_enabled(enabled);
    }

    /// Current escalation state.
    pub fn state(&self) -> EscalationState {
        *self.state.lock()
    }

    /// The host this logger reports to.
    pub fn host(&self) -> &Arc<dyn Host> {
        &self.host
    }

    fn timestamp(&self) -> String {
        time::timestamp(self.clock.as_ref(), &self.time_format)
    }

    fn emit(&self, event: &LogEvent) {
        self.sink.write_line(&format(event, self.sink.markup()));

        if self.broadcaster.is_enabled() {
            self.broadcaster.publish(&format(event, self.broadcast_markup));
        }
    }

    fn escalate(&self, event: &LogEvent) {
        {
            let mut state = self.state.lock();
            if *state != EscalationState::Normal {
                return;
            }
            *state = EscalationState::LoggingFatal;
        }
        tracing::debug!(site = %event.site, "fatal escalation started");

        self.sink.write_diagnostic(&self.host.state_snapshot());

        let site = crate::call_site!().unwrap_or_else(|_| event.site.clone());
        self.log(site, Severity::Info, QUITTING_MESSAGE);

        self.host.alert(FATAL_ALERT_TITLE, &event.message);

        *self.state.lock() = EscalationState::Terminated;
        self.host.quit(FATAL_EXIT_CODE);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("markup", &self.sink.markup())
            .field("broadcast_markup", &self.broadcast_markup)
            .field("time_format", &self.time_format)
            .field("broadcaster", &self.broadcaster)
            .field("state", &self.state())
            .finish()
    }
}

/// Report a log call dropped by a guard clause.
#[doc(hidden)]
pub fn dropped_call(err: &LogFoxError) {
    if err.is_dropped_call() {
        tracing::warn!(error = %err, "log call dropped");
    } else {
        tracing::error!(error = %err, "log call failed");
    }
}

/// Builder for [`Logger`].
pub struct LoggerBuilder {
    sink: Option<Arc<dyn Sink>>,
    host: Option<Arc<dyn Host>>,
    clock: Option<Arc<dyn Clock>>,
    markup: Option<Markup>,
    broadcast_markup: Markup,
    debug_mode: Option<bool>,
    time_format: String,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            sink: None,
            host: None,
            clock: None,
            markup: None,
            broadcast_markup: Markup::BbCode,
            debug_mode: None,
            time_format: LogFoxSettings::default().time_format,
        }
    }
}

impl LoggerBuilder {
    /// Apply debug flag, markup and time format from settings.
    pub fn settings(mut self, settings: &LogFoxSettings) -> Self {
        self.debug_mode = settings.debug_mode;
        self.markup = settings.markup;
        self.time_format = settings.time_format.clone();
        self
    }

    /// Write lines to `sink` instead of the console.
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Report to `host` instead of the plain process host.
    pub fn host(mut self, host: Arc<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    /// Stamp lines from `clock`.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Markup of the console sink built when no sink is given.
    pub fn markup(mut self, markup: Markup) -> Self {
        self.markup = Some(markup);
        self
    }

    /// Markup of broadcast lines (defaults to BBCode for rich-text overlays).
    pub fn broadcast_markup(mut self, markup: Markup) -> Self {
        self.broadcast_markup = markup;
        self
    }

    /// Force the debug/interactive flag instead of asking the host.
    pub fn debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = Some(enabled);
        self
    }

    /// `strftime` pattern for timestamps.
    pub fn time_format(mut self, pattern: impl Into<String>) -> Self {
        self.time_format = pattern.into();
        self
    }

    /// Build the logger.
    ///
    /// # Errors
    ///
    /// Returns [`LogFoxError::Validation`] for a malformed time format.
    pub fn build(self) -> Result<Logger> {
        time::validate_format(&self.time_format)?;

        let host: Arc<dyn Host> = match self.host {
            Some(host) => host,
            None => Arc::new(ProcessHost::default()),
        };
        let markup = self.markup;
        let sink = self.sink.unwrap_or_else(|| {
            Arc::new(ConsoleSink::new(markup.unwrap_or_else(term::default_markup)))
        });
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let debug_mode = self.debug_mode.unwrap_or_else(|| host.is_debug_build());

        tracing::debug!(debug_mode, markup = %sink.markup(), "logger built");

        Ok(Logger {
            sink,
            host,
            clock,
            broadcaster: Broadcaster::new(debug_mode),
            broadcast_markup: self.broadcast_markup,
            time_format: self.time_format,
            state: Mutex::new(EscalationState::Normal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use crate::testing::{fixed_clock, system, MockHost};
    use mockall::predicate::eq;
    use mockall::Sequence;
    use parking_lot::Mutex as PlMutex;

    fn logger_with(host: MockHost, debug: bool) -> (Logger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new(Markup::Plain));
        let logger = Logger::builder()
            .sink(sink.clone())
            .host(Arc::new(host))
            .clock(fixed_clock(10, 0, 0))
            .debug_mode(debug)
            .build()
            .unwrap();
        (logger, sink)
    }

    fn quiet_host() -> MockHost {
        let mut host = MockHost::new();
        host.expect_quit().never();
        host.expect_alert().never();
        host
    }

    #[test]
    fn test_info_scenario_line() {
        let (logger, sink) = logger_with(quiet_host(), false);
        logger.info(CallSite::new("Engine", "boot", 42), "boot");

        assert_eq!(sink.lines(), vec!["[10:00:00] (N: Engine F: boot L: 42) [INFO] boot"]);
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_macro_captures_caller() {
        let (logger, sink) = logger_with(quiet_host(), false);
        crate::warning!(logger, "low {}", "fuel");

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[10:00:00] (N: tests F: test_macro_captures_caller L: "));
        assert!(lines[0].ends_with("[WARNING] low fuel"));
    }

    #[test]
    fn test_unresolved_call_site_emits_nothing() {
        let (logger, sink) = logger_with(quiet_host(), true);
        let received = Arc::new(PlMutex::new(Vec::<String>::new()));
        let seen = received.clone();
        logger.subscribe(move |line| seen.lock().push(line.to_string()));

        for severity in Severity::ALL {
            logger.log_captured(CallSite::from_function_path("main", 3), severity, "lost");
        }

        assert!(sink.lines().is_empty());
        assert!(sink.diagnostics().is_empty());
        assert!(received.lock().is_empty());
        assert_eq!(logger.state(), EscalationState::Normal);

        logger.log_captured(Ok(CallSite::new("Engine", "boot", 4)), Severity::Info, "kept");
        assert_eq!(sink.lines().len(), 1);
        assert_eq!(received.lock().len(), 1);
    }

    #[test]
    fn test_error_prints_stack_without_terminating() {
        let (logger, sink) = logger_with(quiet_host(), false);
        logger.error(CallSite::new("Loader", "load", 7), "missing asset");

        assert_eq!(sink.lines().len(), 1);
        assert_eq!(sink.diagnostics().len(), 1);
        assert_eq!(logger.state(), EscalationState::Normal);
    }

    #[test]
    fn test_info_and_warning_never_terminate() {
        let (logger, sink) = logger_with(quiet_host(), true);
        for i in 0..50 {
            logger.info(CallSite::new("A", "b", i), "tick");
            logger.warning(CallSite::new("A", "b", i), "tock");
        }
        assert_eq!(sink.lines().len(), 100);
        assert_eq!(logger.state(), EscalationState::Normal);
    }

    #[test]
    fn test_fatal_sequence() {
        let mut seq = Sequence::new();
        let mut host = MockHost::new();
        host.expect_state_snapshot()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "scene tree".to_string());
        host.expect_alert()
            .withf(|title, message| title == FATAL_ALERT_TITLE && message == "disk full")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        host.expect_quit()
            .with(eq(FATAL_EXIT_CODE))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let (logger, sink) = logger_with(host, false);
        logger.fatal(CallSite::new("Storage", "flush", 9), "disk full");

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[10:00:00] (N: Storage F: flush L: 9) [FATAL] disk full");
        assert!(lines[1].starts_with("[10:00:00] (N: Logger F: escalate L: "));
        assert!(lines[1].ends_with("[INFO] Quitting..."));

        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[1], "scene tree");
        assert_eq!(logger.state(), EscalationState::Terminated);
    }

    #[test]
    fn test_calls_after_fatal_are_dropped() {
        let mut host = MockHost::new();
        host.expect_state_snapshot().returning(String::new);
        host.expect_alert().times(1).return_const(());
        host.expect_quit().times(1).return_const(());
        host.expect_is_running().return_const(true);
        host.expect_system().never();

        let (logger, sink) = logger_with(host, true);
        let received = Arc::new(PlMutex::new(Vec::new()));
        let sink_copy = Arc::clone(&received);
        logger.subscribe(move |line| sink_copy.lock().push(line.to_string()));

        logger.fatal(CallSite::new("A", "b", 1), "boom");
        logger.info(CallSite::new("A", "b", 2), "after");
        logger.fatal(CallSite::new("A", "b", 3), "again");
        logger.log_system_info(CallSite::new("A", "b", 4)).unwrap();

        assert_eq!(sink.lines().len(), 2);
        assert_eq!(received.lock().len(), 2);
    }

    #[test]
    fn test_broadcast_only_in_debug_mode() {
        let (logger, _sink) = logger_with(quiet_host(), false);
        let received = Arc::new(PlMutex::new(Vec::new()));
        let copy = Arc::clone(&received);
        logger.subscribe(move |line| copy.lock().push(line.to_string()));

        logger.info(CallSite::new("A", "b", 1), "hidden");
        assert!(received.lock().is_empty());

        logger.set_debug_mode(true);
        logger.info(CallSite::new("A", "b", 2), "shown");
        assert_eq!(
            received.lock().clone(),
            vec!["[10:00:00] (N: A F: b L: 2) [[color=#A6E3A1]INFO[/color]] shown"]
        );
    }

    #[test]
    fn test_every_subscriber_sees_identical_line() {
        let (logger, _sink) = logger_with(quiet_host(), true);
        let received = Arc::new(PlMutex::new(Vec::new()));
        for i in 0..4 {
            let copy = Arc::clone(&received);
            logger.subscribe(move |line| copy.lock().push((i, line.to_string())));
        }

        logger.warning(CallSite::new("A", "b", 1), "same");
        let received = received.lock().clone();
        assert_eq!(received.len(), 4);
        assert!(received
            .iter()
            .enumerate()
            .all(|(i, (idx, line))| *idx == i && *line == received[0].1));
    }

    #[test]
    fn test_system_info_line() {
        let mut host = quiet_host();
        host.expect_is_running().return_const(true);
        host.expect_system().returning(|| Ok(system()));

        let (logger, sink) = logger_with(host, false);
        logger.log_system_info(CallSite::new("Autoload", "start", 3)).unwrap();

        assert_eq!(
            sink.lines(),
            vec![
                "[10:00:00] (N: Autoload F: start L: 3) [SYSTEM INFO] \n\
                 TestHost Version: 4.2.1\n\
                 OS: linux GenericDevice\n\
                 CPU: Test CPU\n\
                 RAM: 16 GB available\n"
            ]
        );
    }

    #[test]
    fn test_system_info_requires_running_host() {
        let mut host = quiet_host();
        host.expect_is_running().return_const(false);
        host.expect_system().never();

        let (logger, sink) = logger_with(host, false);
        let err = logger.log_system_info(CallSite::new("A", "b", 1)).unwrap_err();

        assert!(matches!(err, LogFoxError::Precondition(_)));
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_builder_rejects_bad_time_format() {
        let result = Logger::builder()
            .sink(Arc::new(MemorySink::default()))
            .host(Arc::new(quiet_host()))
            .time_format("%Q")
            .build();
        assert!(matches!(result, Err(LogFoxError::Validation(_))));
    }

    #[test]
    fn test_debug_mode_falls_back_to_host_build_flag() {
        let mut host = quiet_host();
        host.expect_is_debug_build().return_const(true);

        let logger = Logger::builder()
            .sink(Arc::new(MemorySink::default()))
            .host(Arc::new(host))
            .build()
            .unwrap();
        assert!(logger.is_debug_mode());
    }
}
