//! Host for an interactive terminal session.

use logfox_core::{Autoload, Host, ProcessHost, Result, SystemDescriptors};

/// A [`ProcessHost`] that leaves the alternate screen before alerting and
/// reports the viewer in its state snapshot.
pub struct TerminalHost {
    inner: ProcessHost,
}

impl TerminalHost {
    pub fn new() -> Self {
        let inner = ProcessHost::new("LogFox", logfox_core::VERSION)
            .with_state_provider("viewer", viewer_state);
        Self { inner }
    }

    pub fn start(&self) {
        self.inner.start();
    }

    pub fn stop(&self) {
        self.inner.stop();
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

fn viewer_state() -> String {
    match Autoload::get().and_then(|autoload| autoload.viewer()) {
        Some(viewer) => format!(
            "attached, {} (hotkey {}), {} lines",
            if viewer.is_visible() { "visible" } else { "hidden" },
            viewer.hotkey(),
            viewer.lines().len()
        ),
        None => "not attached".to_string(),
    }
}

impl Host for TerminalHost {
    fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    fn is_debug_build(&self) -> bool {
        self.inner.is_debug_build()
    }

    fn system(&self) -> Result<SystemDescriptors> {
        self.inner.system()
    }

    fn state_snapshot(&self) -> String {
        self.inner.state_snapshot()
    }

    fn alert(&self, title: &str, message: &str) {
        super::screen::restore();
        self.inner.alert(title, message);
    }

    fn quit(&self, code: i32) {
        self.inner.quit(code);
    }
}
