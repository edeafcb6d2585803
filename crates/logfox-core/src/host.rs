//! The plain-process host.

use crate::time::pretty_duration;
use chrono::{DateTime, Utc};
use dialoguer::Confirm;
use logfox_types::{Host, LogFoxError, Result, SystemDescriptors};
use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use sysinfo::System;

/// Extra state rendered into the fatal snapshot.
pub type StateProvider = Arc<dyn Fn() -> String + Send + Sync>;

/// How [`ProcessHost`] shows the fatal alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertMode {
    /// Block on a terminal prompt until the user acknowledges it
    Prompt,
    /// Write the alert to standard error and return
    Print,
}

impl AlertMode {
    /// `Prompt` when both standard input and standard error are terminals.
    pub fn detect() -> Self {
        if io::stdin().is_terminal() && console::Term::stderr().is_term() {
            AlertMode::Prompt
        } else {
            AlertMode::Print
        }
    }
}

fn alert_prompt(title: &str, message: &str) -> String {
    format!("{}: {}. Press enter to quit", title, message)
}

/// A [`Host`] backed by the current OS process.
///
/// System descriptors come from `sysinfo`. The alert blocks on a terminal
/// prompt when there is a user to answer it and is printed to standard error
/// otherwise; quitting exits the process.
pub struct ProcessHost {
    name: String,
    version: String,
    debug_build: bool,
    alert_mode: AlertMode,
    running: AtomicBool,
    started_at: DateTime<Utc>,
    providers: Vec<(String, StateProvider)>,
}

impl ProcessHost {
    /// Create a host for application `name` at `version`.
    ///
    /// The host starts out not running; call [`ProcessHost::start`] once the
    /// main loop exists.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            debug_build: cfg!(debug_assertions),
            alert_mode: AlertMode::detect(),
            running: AtomicBool::new(false),
            started_at: Utc::now(),
            providers: Vec::new(),
        }
    }

    /// Override the build flag reported by [`Host::is_debug_build`].
    pub fn with_debug_build(mut self, debug_build: bool) -> Self {
        self.debug_build = debug_build;
        self
    }

    /// Override how the fatal alert is shown.
    pub fn with_alert_mode(mut self, mode: AlertMode) -> Self {
        self.alert_mode = mode;
        self
    }

    /// How the fatal alert is shown.
    pub fn alert_mode(&self) -> AlertMode {
        self.alert_mode
    }

    /// Add a named section to the fatal state snapshot.
    pub fn with_state_provider<F>(mut self, name: impl Into<String>, provider: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.providers.push((name.into(), Arc::new(provider)));
        self
    }

    /// Mark the host runtime as running.
    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
    }

    /// Mark the host runtime as stopped.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    fn snapshot(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} {} (pid {})", self.name, self.version, std::process::id());
        let _ = writeln!(out, "  uptime: {}", pretty_duration(Utc::now() - self.started_at));
        if let Ok(exe) = std::env::current_exe() {
            let _ = writeln!(out, "  exe: {}", exe.display());
        }
        if let Ok(cwd) = std::env::current_dir() {
            let _ = writeln!(out, "  cwd: {}", cwd.display());
        }
        let args: Vec<String> = std::env::args().skip(1).collect();
        let _ = writeln!(out, "  args: {:?}", args);
        let thread = std::thread::current();
        let _ = writeln!(out, "  thread: {}", thread.name().unwrap_or("<unnamed>"));

        for (name, provider) in &self.providers {
            let _ = writeln!(out, "  {}:", name);
            for line in provider().lines() {
                let _ = writeln!(out, "    {}", line);
            }
        }

        out
    }
}

impl Default for ProcessHost {
    fn default() -> Self {
        Self::new("LogFox", env!("CARGO_PKG_VERSION"))
    }
}

impl Host for ProcessHost {
    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn is_debug_build(&self) -> bool {
        self.debug_build
    }

    fn system(&self) -> Result<SystemDescriptors> {
        if !self.is_running() {
            return Err(LogFoxError::Precondition(format!(
                "{} runtime is not running",
                self.name
            )));
        }

        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();

        let processor = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(SystemDescriptors {
            host_name: self.name.clone(),
            host_version: self.version.clone(),
            platform: System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
            model: System::host_name().unwrap_or_else(|| "GenericDevice".to_string()),
            processor,
            total_memory_bytes: sys.total_memory(),
        })
    }

    fn state_snapshot(&self) -> String {
        self.snapshot()
    }

    fn alert(&self, title: &str, message: &str) {
        if self.alert_mode == AlertMode::Prompt {
            let acknowledged = Confirm::new()
                .with_prompt(alert_prompt(title, message))
                .default(true)
                .show_default(false)
                .report(false)
                .interact();

            match acknowledged {
                Ok(_) => return,
                Err(e) => tracing::warn!(error = %e, "alert prompt failed"),
            }
        }

        let mut err = io::stderr().lock();
        let _ = writeln!(err, "\n*** {} ***\n{}\n", title, message);
        let _ = err.flush();
    }

    fn quit(&self, code: i32) {
        self.stop();
        tracing::info!(code, "host quitting");
        std::process::exit(code);
    }
}
