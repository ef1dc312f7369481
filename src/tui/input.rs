// ABOUTME: Keyboard input handling for the TUI — translates key events into actions.
// ABOUTME: Global keys first, then the location prompt, then the active panel's bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::Action;
use crate::router::{Panel, room_path};
use crate::tui::state::{ProfileField, TextField, TuiState};

/// The result of processing a key event.
#[derive(Debug, PartialEq)]
pub enum InputResult {
    /// No action needed.
    None,
    /// Hand an action to the app.
    Dispatch(Action),
}

impl From<Action> for InputResult {
    fn from(action: Action) -> Self {
        InputResult::Dispatch(action)
    }
}

/// Process a key event against the current TUI state and return the resulting action.
pub fn handle_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    // Any key dismisses the current notice.
    state.notice = None;

    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit.into();
    }

    if state.has_location_prompt() {
        return handle_location_prompt_key(state, key);
    }

    match key.code {
        KeyCode::Left if alt => return Action::Back.into(),
        KeyCode::Right if alt => return Action::Forward.into(),
        KeyCode::Char('g') if ctrl => {
            state.location_prompt = Some(TextField::with_value(&state.location));
            return InputResult::None;
        }
        _ => {}
    }

    match state.panel {
        Panel::Login => handle_login_key(state, key),
        Panel::Splash => handle_splash_key(state, key),
        Panel::Profile => handle_profile_key(state, key),
        Panel::Room => handle_room_key(state, key),
    }
}

/// Shared editing keys. Returns true if the key was consumed.
fn edit_field(field: &mut TextField, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }
    match key.code {
        KeyCode::Char(c) => field.insert_char(c),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.move_left(),
        KeyCode::Right => field.move_right(),
        KeyCode::Home => field.move_home(),
        KeyCode::End => field.move_end(),
        _ => return false,
    }
    true
}

fn handle_location_prompt_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Esc => {
            state.location_prompt = None;
            InputResult::None
        }
        KeyCode::Enter => {
            let path = state
                .location_prompt
                .take()
                .and_then(|mut field| field.submit());
            match path {
                Some(path) if path.starts_with('/') => Action::Navigate(path).into(),
                Some(path) => Action::Navigate(format!("/{path}")).into(),
                None => InputResult::None,
            }
        }
        _ => {
            if let Some(field) = state.location_prompt.as_mut() {
                edit_field(field, key);
            }
            InputResult::None
        }
    }
}

fn handle_login_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => Action::Signup.into(),
        KeyCode::Tab | KeyCode::BackTab => {
            state.login.toggle_focus();
            InputResult::None
        }
        KeyCode::Enter => Action::Login {
            user_name: state.login.user_name.value.clone(),
            password: state.login.password.value.clone(),
        }
        .into(),
        KeyCode::Esc => Action::Quit.into(),
        _ => {
            edit_field(state.login.focused_mut(), key);
            InputResult::None
        }
    }
}

fn handle_splash_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Up => {
            state.splash.select_prev();
            InputResult::None
        }
        KeyCode::Down => {
            state.splash.select_next();
            InputResult::None
        }
        KeyCode::Enter => match state.splash.selected_room() {
            Some(room) => Action::Navigate(room_path(room.room_id)).into(),
            None => InputResult::None,
        },
        KeyCode::Char('n') if ctrl && state.logged_in => Action::CreateRoom.into(),
        KeyCode::Char('p') if ctrl && state.logged_in => {
            Action::Navigate("/profile".to_string()).into()
        }
        KeyCode::Char('l') if ctrl && !state.logged_in => {
            Action::Navigate("/login".to_string()).into()
        }
        KeyCode::Char('s') if ctrl && !state.logged_in => Action::Signup.into(),
        KeyCode::Esc => Action::Quit.into(),
        _ => InputResult::None,
    }
}

fn handle_profile_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let form = &mut state.profile;
    match key.code {
        KeyCode::Char('o') if ctrl => Action::Logout.into(),
        KeyCode::Tab => {
            form.next_focus();
            InputResult::None
        }
        KeyCode::BackTab => {
            form.prev_focus();
            InputResult::None
        }
        KeyCode::Esc => Action::Navigate("/".to_string()).into(),
        KeyCode::Enter => match form.focus {
            ProfileField::UserName => match form.user_name.value.trim() {
                "" => InputResult::None,
                name => Action::UpdateUsername {
                    new_name: name.to_string(),
                }
                .into(),
            },
            ProfileField::Password | ProfileField::Repeat => Action::UpdatePassword {
                password: form.password.value.clone(),
                repeat: form.repeat.value.clone(),
            }
            .into(),
        },
        _ => {
            let focus = form.focus;
            if edit_field(form.focused_mut(), key) && focus != ProfileField::UserName {
                form.check_password_repeat();
            }
            InputResult::None
        }
    }
}

fn handle_room_key(state: &mut TuiState, key: KeyEvent) -> InputResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let room = &mut state.room;

    match key.code {
        KeyCode::PageUp => {
            room.scroll_offset = room.scroll_offset.saturating_add(10);
            return InputResult::None;
        }
        KeyCode::PageDown => {
            room.scroll_offset = room.scroll_offset.saturating_sub(10);
            return InputResult::None;
        }
        _ => {}
    }

    if let Some(field) = room.rename.as_mut() {
        return match key.code {
            KeyCode::Esc => {
                room.close_rename();
                InputResult::None
            }
            KeyCode::Enter => match field.value.trim() {
                "" => InputResult::None,
                name => {
                    let new_name = name.to_string();
                    room.close_rename();
                    Action::RenameRoom { new_name }.into()
                }
            },
            _ => {
                edit_field(field, key);
                InputResult::None
            }
        };
    }

    match key.code {
        KeyCode::Char('r') if ctrl => {
            room.open_rename();
            InputResult::None
        }
        KeyCode::Esc => Action::Navigate("/".to_string()).into(),
        KeyCode::Enter => match room.comment.submit() {
            Some(body) => Action::PostMessage { body }.into(),
            None => InputResult::None,
        },
        KeyCode::Up => {
            room.scroll_offset = room.scroll_offset.saturating_add(1);
            InputResult::None
        }
        KeyCode::Down => {
            room.scroll_offset = room.scroll_offset.saturating_sub(1);
            InputResult::None
        }
        _ => {
            edit_field(&mut room.comment, key);
            InputResult::None
        }
    }
}
