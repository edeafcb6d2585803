//! Interactive session with the hotkey-toggled viewer overlay.
//!
//! The loop stands in for a host's frame loop: a timer ticks frames and
//! emits a heartbeat, key presses are offered to the viewer first and then
//! to the session's own bindings.

use crate::ui::{Screen, ScreenSink, TerminalHost};
use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, queue, style, terminal};
use futures::StreamExt;
use logfox_core::{error, fatal, info, warning, Autoload, Hotkey, LogFoxSettings, Logger, Markup};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

const HEARTBEAT_FRAMES: u64 = 50;

const HELP: &str = "i/w/e: log  f: fatal  q: quit";

enum Action {
    Continue,
    Quit,
    Fatal,
}

pub async fn execute(mut settings: LogFoxSettings, interval_ms: u64) -> Result<()> {
    // Interactive sessions broadcast unless the configuration says otherwise.
    settings.debug_mode.get_or_insert(true);
    settings.file_logging.enabled = true;

    let host = Arc::new(TerminalHost::new());
    host.start();

    let sink = Arc::new(ScreenSink::new(Markup::Plain));
    let logger = Logger::builder()
        .settings(&settings)
        .sink(sink.clone())
        .host(host.clone())
        .broadcast_markup(Markup::Plain)
        .build()?;

    let screen = Screen::enter().context("Failed to prepare the terminal")?;
    let autoload = Autoload::start(settings, Arc::new(logger))?.install()?;

    let outcome = run(autoload, &sink, interval_ms).await;

    drop(screen);
    sink.detach();

    match outcome? {
        Action::Fatal => {
            fatal!(autoload.logger(), "Fatal error requested from the watch session");
        }
        _ => host.stop(),
    }
    Ok(())
}

async fn run(autoload: &Autoload, sink: &ScreenSink, interval_ms: u64) -> Result<Action> {
    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
    let mut events = EventStream::new();
    let mut frame: u64 = 0;

    loop {
        draw(autoload, sink)?;

        tokio::select! {
            _ = ticker.tick() => {
                frame += 1;
                if frame % HEARTBEAT_FRAMES == 0 {
                    info!(autoload.logger(), "Frame {}", frame);
                }
            }
            event = events.next() => {
                let Some(event) = event else {
                    return Ok(Action::Quit);
                };
                if let Event::Key(key) = event? {
                    match on_key(autoload, key, frame) {
                        Action::Continue => {}
                        action => return Ok(action),
                    }
                }
            }
        }
    }
}

fn on_key(autoload: &Autoload, key: KeyEvent, frame: u64) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Continue;
    }
    if let Some(hotkey) = to_hotkey(key.code) {
        if autoload.handle_key(hotkey) {
            return Action::Continue;
        }
    }

    let logger = autoload.logger();
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('i') => {
            info!(logger, "Player jumped at frame {}", frame);
            Action::Continue
        }
        KeyCode::Char('w') => {
            warning!(logger, "Frame {} took longer than budget", frame);
            Action::Continue
        }
        KeyCode::Char('e') => {
            error!(logger, "Lost connection at frame {}", frame);
            Action::Continue
        }
        KeyCode::Char('f') => Action::Fatal,
        _ => Action::Continue,
    }
}

fn to_hotkey(code: KeyCode) -> Option<Hotkey> {
    match code {
        KeyCode::F(n) => Some(Hotkey::Function(n)),
        KeyCode::Char(c) => Some(Hotkey::Char(c)),
        _ => None,
    }
}

fn draw(autoload: &Autoload, sink: &ScreenSink) -> Result<()> {
    let (width, height) = Screen::size();
    let body = height.saturating_sub(2);

    let (title, rows) = match autoload.viewer().filter(|viewer| viewer.is_visible()) {
        Some(viewer) => (
            format!("LogFox viewer ({} to hide)", viewer.hotkey()),
            viewer.render(width, body),
        ),
        None => {
            let hint = autoload
                .viewer()
                .map(|viewer| format!(" ({} for viewer)", viewer.hotkey()))
                .unwrap_or_default();
            (format!("Console{}", hint), sink.tail(body))
        }
    };

    let mut out = io::stdout().lock();
    queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    queue!(out, style::Print(clip(&format!("{}  |  {}", title, HELP), width)))?;

    for (row, line) in rows.iter().enumerate() {
        queue!(out, cursor::MoveTo(0, (row + 2) as u16), style::Print(clip(line, width)))?;
    }
    out.flush()?;
    Ok(())
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
