use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Button};

/// Handle a key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // Text entry takes raw keys; only the popup sits above it.
    if app.rename.is_some() && !app.popup.is_active() {
        handle_rename_key(app, key);
        return;
    }

    if let Some(button) = map_key(key) {
        app.handle_button(button);
    }
}

/// Translate a key into a controller button.
pub fn map_key(key: KeyEvent) -> Option<Button> {
    let button = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Button::Up,
        KeyCode::Down | KeyCode::Char('j') => Button::Down,
        KeyCode::Left => Button::Left,
        KeyCode::Right => Button::Right,
        KeyCode::Enter | KeyCode::Char('l') => Button::Select,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => Button::Back,
        KeyCode::Char('x') | KeyCode::Tab => Button::FileOps,
        KeyCode::Char('q') | KeyCode::Char('+') => Button::Exit,
        _ => return None,
    };
    Some(button)
}

fn handle_rename_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.handle_button(Button::Select),
        KeyCode::Esc => app.handle_button(Button::Back),
        KeyCode::Left => app.handle_button(Button::Left),
        KeyCode::Right => app.handle_button(Button::Right),
        code => {
            let Some(prompt) = app.rename.as_mut() else {
                return;
            };
            match code {
                KeyCode::Backspace => prompt.delete_char(),
                KeyCode::Home => prompt.cursor_home(),
                KeyCode::End => prompt.cursor_end(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    prompt.insert_char(c)
                }
                _ => {}
            }
        }
    }
}
