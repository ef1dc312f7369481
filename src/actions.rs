// ABOUTME: User actions — every UI intent the app can carry out, as one declarative enum.
// ABOUTME: Key bindings produce Actions; App::dispatch maps each to exactly one handler.

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Login { user_name: String, password: String },
    Signup,
    Logout,
    CreateRoom,
    RenameRoom { new_name: String },
    PostMessage { body: String },
    UpdateUsername { new_name: String },
    UpdatePassword { password: String, repeat: String },
    /// Change the location, as if following a link.
    Navigate(String),
    Back,
    Forward,
    Quit,
}

impl Action {
    /// Short stable name, used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Login { .. } => "login",
            Action::Signup => "signup",
            Action::Logout => "logout",
            Action::CreateRoom => "create_room",
            Action::RenameRoom { .. } => "rename_room",
            Action::PostMessage { .. } => "post_message",
            Action::UpdateUsername { .. } => "update_username",
            Action::UpdatePassword { .. } => "update_password",
            Action::Navigate(_) => "navigate",
            Action::Back => "back",
            Action::Forward => "forward",
            Action::Quit => "quit",
        }
    }
}
