// ABOUTME: TUI state types — editable text fields, per-panel view state, and the notice line.
// ABOUTME: Written by the app as routes and API replies arrive; read by the renderer.

use chrono::{DateTime, Local};

use crate::api::{Message, RoomId, RoomSummary};
use crate::router::Panel;

/// A single-line editable text buffer with a character cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub value: String,
    pub cursor_pos: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field holding `value` with the cursor at the end.
    pub fn with_value(value: &str) -> Self {
        let mut field = Self::new();
        field.set(value);
        field
    }

    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_pos = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_pos = 0;
    }

    /// Take the trimmed contents, clearing the buffer. Returns None (and keeps the buffer) if blank.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.value.trim().to_string();
        if trimmed.is_empty() {
            return None;
        }
        self.clear();
        Some(trimmed)
    }

    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor_pos = self.cursor_pos.min(self.char_len());
    }

    pub fn cursor_byte_index(&self) -> usize {
        char_index_to_byte_index(&self.value, self.cursor_pos)
    }

    pub fn insert_char(&mut self, c: char) {
        self.clamp_cursor();
        let byte_index = self.cursor_byte_index();
        self.value.insert(byte_index, c);
        self.cursor_pos += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos == 0 {
            return;
        }
        let end = self.cursor_byte_index();
        let start = char_index_to_byte_index(&self.value, self.cursor_pos - 1);
        self.value.replace_range(start..end, "");
        self.cursor_pos -= 1;
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos >= self.char_len() {
            return;
        }
        let start = self.cursor_byte_index();
        let end = char_index_to_byte_index(&self.value, self.cursor_pos + 1);
        self.value.replace_range(start..end, "");
    }

    pub fn move_left(&mut self) {
        self.clamp_cursor();
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.clamp_cursor();
        if self.cursor_pos < self.char_len() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.char_len();
    }

    /// The text to draw; password fields are masked.
    pub fn display(&self, masked: bool) -> String {
        if masked {
            "*".repeat(self.char_len())
        } else {
            self.value.clone()
        }
    }

    /// The text before the cursor, as drawn.
    pub fn display_prefix(&self, masked: bool) -> String {
        let n = self.cursor_pos.min(self.char_len());
        if masked {
            "*".repeat(n)
        } else {
            self.value.chars().take(n).collect()
        }
    }
}

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    if char_index == 0 {
        return 0;
    }

    match s.char_indices().nth(char_index) {
        Some((idx, _)) => idx,
        None => s.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    UserName,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub user_name: TextField,
    pub password: TextField,
    pub focus: LoginField,
    /// Set when the last login attempt failed; offers sign-up.
    pub failed: bool,
}

impl LoginForm {
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::UserName => &mut self.user_name,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::UserName => LoginField::Password,
            LoginField::Password => LoginField::UserName,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    UserName,
    Password,
    Repeat,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub user_name: TextField,
    pub password: TextField,
    pub repeat: TextField,
    pub focus: ProfileField,
    /// Validation message on the repeat field, if it does not match.
    pub repeat_error: Option<String>,
}

impl ProfileForm {
    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            ProfileField::UserName => &mut self.user_name,
            ProfileField::Password => &mut self.password,
            ProfileField::Repeat => &mut self.repeat,
        }
    }

    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            ProfileField::UserName => ProfileField::Password,
            ProfileField::Password => ProfileField::Repeat,
            ProfileField::Repeat => ProfileField::UserName,
        };
    }

    pub fn prev_focus(&mut self) {
        self.focus = match self.focus {
            ProfileField::UserName => ProfileField::Repeat,
            ProfileField::Password => ProfileField::UserName,
            ProfileField::Repeat => ProfileField::Password,
        };
    }

    /// Re-validate the repeat field against the password.
    pub fn check_password_repeat(&mut self) {
        self.repeat_error = if self.password.value == self.repeat.value {
            None
        } else {
            Some("Password doesn't match".to_string())
        };
    }

    pub fn clear_passwords(&mut self) {
        self.password.clear();
        self.repeat.clear();
        self.repeat_error = None;
    }
}

/// The room list on the splash panel.
#[derive(Debug, Clone, Default)]
pub struct SplashView {
    /// None until the list has been fetched (hidden while logged out).
    pub rooms: Option<Vec<RoomSummary>>,
    pub selected: usize,
}

impl SplashView {
    pub fn selected_room(&self) -> Option<&RoomSummary> {
        self.rooms.as_ref()?.get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.rooms.as_ref().map_or(0, Vec::len);
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn set_rooms(&mut self, rooms: Vec<RoomSummary>) {
        self.selected = self.selected.min(rooms.len().saturating_sub(1));
        self.rooms = Some(rooms);
    }
}

#[derive(Debug, Clone, Default)]
pub struct RoomView {
    pub room_id: Option<RoomId>,
    pub room_name: String,
    pub invite_link: String,
    pub messages: Vec<Message>,
    pub comment: TextField,
    /// Some while the rename editor is open.
    pub rename: Option<TextField>,
    pub rename_draft: String,
    pub scroll_offset: u16,
}

impl RoomView {
    pub fn open_rename(&mut self) {
        self.rename = Some(TextField::with_value(&self.rename_draft));
    }

    pub fn close_rename(&mut self) {
        self.rename = None;
    }
}

/// Full TUI state.
#[derive(Debug, Clone)]
pub struct TuiState {
    pub panel: Panel,
    pub location: String,
    pub logged_in: bool,
    pub user_name: String,
    pub greeting: Option<String>,
    pub login: LoginForm,
    pub profile: ProfileForm,
    pub splash: SplashView,
    pub room: RoomView,
    /// Some while the "go to path" prompt is open.
    pub location_prompt: Option<TextField>,
    pub notice: Option<String>,
    pub polling_room: Option<RoomId>,
    pub last_refresh: Option<DateTime<Local>>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            panel: Panel::Login,
            location: "/".to_string(),
            logged_in: false,
            user_name: String::new(),
            greeting: None,
            login: LoginForm::default(),
            profile: ProfileForm::default(),
            splash: SplashView::default(),
            room: RoomView::default(),
            location_prompt: None,
            notice: None,
            polling_room: None,
            last_refresh: None,
        }
    }

    pub fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(text.into());
    }

    /// Replace the room's message list wholesale.
    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.room.messages = messages;
        self.last_refresh = Some(Local::now());
    }

    pub fn has_location_prompt(&self) -> bool {
        self.location_prompt.is_some()
    }
}
