use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::backend::Command;
use crate::ui::state::HubsFocus;
use crate::ui::{App, View};

/// Lines moved per PageUp/PageDown
const PAGE_SCROLL: u16 = 10;

/// Route one key press. Any returned command is for the backend.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    match app.view {
        View::Hubs => match app.home.focus {
            HubsFocus::Grid => handle_grid_key(app, key),
            HubsFocus::CreateForm => handle_create_form_key(app, key),
        },
        View::Chat => {
            let prompt_open = app.chat.as_ref().is_some_and(|c| c.upload_prompt_open);
            if prompt_open {
                handle_upload_prompt_key(app, key)
            } else {
                handle_chat_key(app, key)
            }
        }
    }
}

/// Bracketed paste goes to whichever field has focus
pub(crate) fn handle_paste(app: &mut App, text: &str) {
    app.insert_text(text);
}

fn handle_grid_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    let columns = app.home.grid_columns;
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.home.move_selection(-1, 0, columns),
        KeyCode::Right | KeyCode::Char('l') => app.home.move_selection(1, 0, columns),
        KeyCode::Up | KeyCode::Char('k') => app.home.move_selection(0, -1, columns),
        KeyCode::Down | KeyCode::Char('j') => app.home.move_selection(0, 1, columns),
        KeyCode::Enter => app.open_selected_hub(),
        KeyCode::Char('n') | KeyCode::Tab => app.toggle_hubs_focus(),
        KeyCode::Char('r') => return app.refresh_hubs(),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => app.dismiss_notification(),
        _ => {}
    }
    None
}

fn handle_create_form_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Enter => return app.submit_new_hub(),
        KeyCode::Esc | KeyCode::Tab => app.toggle_hubs_focus(),
        KeyCode::Backspace => app.home.hubs.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.home.hubs.push_char(c)
        }
        _ => {}
    }
    None
}

fn handle_chat_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return Some(app.activate_hubs()),
        KeyCode::Enter => return app.submit_chat(),
        KeyCode::Char('u') if ctrl => app.open_upload_prompt(),
        KeyCode::PageUp => {
            if let Some(screen) = app.chat.as_mut() {
                screen.scroll_up(PAGE_SCROLL);
            }
        }
        KeyCode::PageDown => {
            if let Some(screen) = app.chat.as_mut() {
                screen.scroll_down(PAGE_SCROLL);
            }
        }
        KeyCode::Backspace => {
            if let Some(screen) = app.chat.as_mut() {
                screen.session.backspace();
            }
        }
        KeyCode::Char(c) if !ctrl => {
            if let Some(screen) = app.chat.as_mut() {
                screen.session.push_char(c);
            }
        }
        _ => {}
    }
    None
}

fn handle_upload_prompt_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Enter => return app.submit_upload(),
        KeyCode::Esc => app.close_upload_prompt(),
        KeyCode::Backspace => {
            if let Some(screen) = app.chat.as_mut() {
                screen.upload.backspace();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(screen) = app.chat.as_mut() {
                screen.upload.push_char(c);
            }
        }
        _ => {}
    }
    None
}
