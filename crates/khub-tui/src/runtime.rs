use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

use crate::backend::{Backend, BackendEvent};
use crate::input::{handle_key, handle_paste};
use crate::render::render;
use crate::ui::{App, Tui, View};

/// Lines moved per mouse wheel step
const WHEEL_SCROLL: u16 = 3;

pub(crate) async fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    backend: &Backend,
    mut event_rx: mpsc::Receiver<BackendEvent>,
) -> Result<()> {
    let mut event_stream = EventStream::new();

    // Drives the spinner and toast expiry
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => handle_terminal_event(app, backend, event),
                    Some(Err(e)) => return Err(e.into()),
                    None => {
                        debug!("terminal event stream closed");
                        app.quit();
                    }
                }
            }

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(event) = event_rx.recv() => {
                if let Some(follow_up) = app.handle_backend_event(event) {
                    backend.dispatch(follow_up);
                }
            }
        }
    }

    Ok(())
}

fn handle_terminal_event(app: &mut App, backend: &Backend, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                if app.pending_quit {
                    // Second Ctrl+C - quit immediately
                    app.quit();
                } else {
                    // First Ctrl+C - footer shows the warning
                    app.pending_quit = true;
                }
                return;
            }
            app.pending_quit = false;
            if let Some(command) = handle_key(app, key) {
                backend.dispatch(command);
            }
        }
        Event::Mouse(mouse) if app.view == View::Chat => {
            if let Some(screen) = app.chat.as_mut() {
                match mouse.kind {
                    MouseEventKind::ScrollUp => screen.scroll_up(WHEEL_SCROLL),
                    MouseEventKind::ScrollDown => screen.scroll_down(WHEEL_SCROLL),
                    _ => {}
                }
            }
        }
        Event::Paste(text) => handle_paste(app, &text),
        _ => {}
    }
}
