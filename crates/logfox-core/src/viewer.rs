//! In-host log viewer overlay.
//!
//! The viewer is a pure consumer of the broadcaster: it appends every line it
//! receives to a scrollback buffer and flips its visibility on a hotkey. It
//! never logs through the router from its subscription callback.
//!
//! The scrollback is unbounded and grows for the lifetime of the process.

use crate::logger::Logger;
use crate::term;
use logfox_types::{Hotkey, SubscriptionId};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct ViewerState {
    scrollback: String,
    visible: bool,
}

/// Scrollback overlay fed by a [`Logger`]'s broadcaster.
///
/// Clones share the same buffer and visibility.
#[derive(Debug, Clone)]
pub struct LogViewer {
    state: Arc<Mutex<ViewerState>>,
    hotkey: Hotkey,
    subscription: Option<SubscriptionId>,
}

impl LogViewer {
    /// Create a detached, hidden viewer.
    pub fn new(hotkey: Hotkey) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewerState::default())),
            hotkey,
            subscription: None,
        }
    }

    /// Create a viewer, subscribe it to `logger` and hide it.
    pub fn attach(hotkey: Hotkey, logger: &Logger) -> Self {
        let mut viewer = Self::new(hotkey);
        let sink = viewer.clone();
        viewer.subscription = Some(logger.subscribe(move |line| sink.add_log(line)));
        viewer.hide();

        crate::info!(logger, "_Ready");
        viewer
    }

    /// Append one received line.
    pub fn add_log(&self, line: &str) {
        let mut state = self.state.lock();
        state.scrollback.push_str(line);
        state.scrollback.push('\n');
    }

    /// Flip visibility; returns the new value.
    pub fn toggle(&self) -> bool {
        let mut state = self.state.lock();
        state.visible = !state.visible;
        state.visible
    }

    /// Toggle if `key` is the bound hotkey; returns whether it was handled.
    pub fn handle_key(&self, key: Hotkey) -> bool {
        if key != self.hotkey {
            return false;
        }
        self.toggle();
        true
    }

    /// Hide the overlay.
    pub fn hide(&self) {
        self.state.lock().visible = false;
    }

    /// Whether the overlay is shown.
    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    /// The bound hotkey.
    pub fn hotkey(&self) -> Hotkey {
        self.hotkey
    }

    /// Subscription handle, when attached.
    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    /// Full scrollback text.
    pub fn scrollback(&self) -> String {
        self.state.lock().scrollback.clone()
    }

    /// Received lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.state
            .lock()
            .scrollback
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lay out the newest lines for an overlay of `width` x `height` cells.
    ///
    /// Returns nothing while hidden.
    pub fn render(&self, width: usize, height: usize) -> Vec<String> {
        if !self.is_visible() || height == 0 {
            return Vec::new();
        }

        let state = self.state.lock();
        let mut rows: Vec<String> = Vec::new();
        for line in state.scrollback.lines().rev() {
            let mut wrapped = term::wrap_text(line, width.max(1));
            if wrapped.is_empty() {
                wrapped.push(String::new());
            }
            for row in wrapped.into_iter().rev() {
                rows.push(row);
                if rows.len() == height {
                    rows.reverse();
                    return rows;
                }
            }
        }

        rows.reverse();
        rows
    }
}
