//! Process-wide bootstrap of the add-on.
//!
//! [`Autoload::start`] runs the start-up sequence against a logger: it checks
//! the host's file logging switch, logs the system descriptors, and attaches
//! the in-host viewer when running in debug mode. Hosts that want a single
//! process-wide instance can [`install`](Autoload::install) it and fetch it
//! back with [`Autoload::get`].

use crate::logger::Logger;
use crate::viewer::LogViewer;
use logfox_types::{Hotkey, LogFoxError, LogFoxSettings, Result};
use once_cell::sync::OnceCell;
use std::sync::Arc;

static INSTANCE: OnceCell<Autoload> = OnceCell::new();

/// The started add-on: logger, optional viewer and effective settings.
#[derive(Debug)]
pub struct Autoload {
    logger: Arc<Logger>,
    viewer: Option<LogViewer>,
    settings: LogFoxSettings,
}

impl Autoload {
    /// Run the start-up sequence.
    ///
    /// File logging that is switched off is forced on for this run only; the
    /// change is not written back to the configuration.
    ///
    /// # Errors
    ///
    /// Fails with [`LogFoxError::Precondition`] when the host runtime is not
    /// running yet.
    pub fn start(mut settings: LogFoxSettings, logger: Arc<Logger>) -> Result<Self> {
        if !settings.file_logging.enabled {
            crate::error!(
                logger,
                "File logging is not enabled. Please enable it in the project settings."
            );
            settings.file_logging.enabled = true;
            crate::info!(logger, "File logging enabled(To one run only).");
            crate::warning!(
                logger,
                "Please enable this manually in project settings to work properly."
            );
        }

        crate::system_info!(logger)?;
        crate::info!(logger, "_Ready");

        let viewer = if logger.is_debug_mode() && settings.viewer.enabled {
            crate::info!(logger, "It is debug build. Loading LogFox ingame viewer.");
            Some(LogViewer::attach(settings.viewer.hotkey, &logger))
        } else {
            None
        };

        Ok(Self {
            logger,
            viewer,
            settings,
        })
    }

    /// Store this instance as the process-wide autoload.
    pub fn install(self) -> Result<&'static Autoload> {
        INSTANCE
            .set(self)
            .map_err(|_| LogFoxError::Other("LogFox autoload is already installed".to_string()))?;
        INSTANCE
            .get()
            .ok_or_else(|| LogFoxError::Other("LogFox autoload vanished after install".to_string()))
    }

    /// The process-wide autoload, if installed.
    pub fn get() -> Option<&'static Autoload> {
        INSTANCE.get()
    }

    /// The shared logger.
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// The attached viewer, when running in debug mode.
    pub fn viewer(&self) -> Option<&LogViewer> {
        self.viewer.as_ref()
    }

    /// Settings in effect for this run.
    pub fn settings(&self) -> &LogFoxSettings {
        &self.settings
    }

    /// Forward a key press to the viewer; returns whether it was handled.
    pub fn handle_key(&self, key: Hotkey) -> bool {
        self.viewer.as_ref().is_some_and(|viewer| viewer.handle_key(key))
    }
}
