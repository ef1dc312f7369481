// ABOUTME: View router — maps a location path plus login state to exactly one panel.
// ABOUTME: Also owns the navigation history stack used for back/forward.

use crate::api::RoomId;

/// The four top-level views. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Splash,
    Profile,
    Login,
    Room,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Splash, Panel::Profile, Panel::Login, Panel::Room];

    pub fn title(self) -> &'static str {
        match self {
            Panel::Splash => "Rooms",
            Panel::Profile => "Profile",
            Panel::Login => "Login",
            Panel::Room => "Room",
        }
    }
}

/// A parsed location path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Profile,
    Room(RoomId),
    Unknown(String),
}

impl Route {
    pub fn parse(path: &str) -> Route {
        match path {
            "/" => Route::Root,
            "/login" => Route::Login,
            "/profile" => Route::Profile,
            _ => match path.strip_prefix("/room/") {
                Some(rest) => {
                    let id = rest.split('/').next().unwrap_or_default();
                    match id.parse::<RoomId>() {
                        Ok(id) => Route::Room(id),
                        Err(_) => Route::Unknown(path.to_string()),
                    }
                }
                None => Route::Unknown(path.to_string()),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Room(id) => room_path(*id),
            Route::Unknown(path) => path.clone(),
        }
    }
}

pub fn room_path(room_id: RoomId) -> String {
    format!("/room/{room_id}")
}

/// What the router decided for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub panel: Panel,
    /// Path to store for the post-login redirect.
    pub remember: Option<String>,
    /// Location to move to instead of the requested one.
    pub redirect: Option<String>,
    /// Room to enter; when None, polling stops.
    pub enter_room: Option<RoomId>,
}

impl Resolution {
    fn show(panel: Panel) -> Self {
        Self {
            panel,
            remember: None,
            redirect: None,
            enter_room: None,
        }
    }

    fn login_remembering(path: &str) -> Self {
        Self {
            remember: Some(path.to_string()),
            ..Self::show(Panel::Login)
        }
    }
}

/// Decide which panel `path` shows for the given login state.
pub fn resolve(path: &str, logged_in: bool) -> Resolution {
    let route = Route::parse(path);

    if !logged_in {
        return match route {
            Route::Root | Route::Login => Resolution::show(Panel::Login),
            _ => Resolution::login_remembering(path),
        };
    }

    match route {
        Route::Root => Resolution::show(Panel::Splash),
        Route::Login => Resolution {
            redirect: Some("/".to_string()),
            ..Resolution::show(Panel::Splash)
        },
        Route::Profile => Resolution::show(Panel::Profile),
        Route::Room(id) => Resolution {
            enter_room: Some(id),
            ..Resolution::show(Panel::Room)
        },
        Route::Unknown(_) => Resolution {
            redirect: Some("/".to_string()),
            ..Resolution::show(Panel::Splash)
        },
    }
}

/// Linear navigation history with a cursor, like a browser tab's.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Push `path` unless it is already the current entry. Drops any forward entries.
    pub fn push_if_changed(&mut self, path: &str) -> bool {
        if self.current() == Some(path) {
            return false;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(path.to_string());
        self.cursor = self.entries.len() - 1;
        true
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }
}
