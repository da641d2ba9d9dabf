use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;

/// File written by the `e` key.
pub const EXPORT_PATH: &str = "uptime_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // The modal swallows everything except its close keys
    if app.modal.is_some() {
        if let KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') = key.code {
            app.close_modal();
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),

        // Monitors
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Hours
        KeyCode::Left | KeyCode::Char('h') => app.hover_prev(),
        KeyCode::Right | KeyCode::Char('l') => app.hover_next(),

        KeyCode::Enter => {
            app.activate_hover();
        }
        KeyCode::Esc => app.hover = None,

        KeyCode::Char('r') => {
            let _ = app.reload_data();
        }

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
///
/// Positions are matched against the bar layouts recorded in the last draw.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved => {
            if app.modal.is_none() {
                app.hover_at(mouse.column, mouse.row);
            }
        }

        MouseEventKind::Down(MouseButton::Left) => {
            if app.modal.is_none() {
                app.click_at(mouse.column, mouse.row);
            }
        }

        MouseEventKind::Down(MouseButton::Right) => app.close_modal(),

        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        _ => {}
    }
}
