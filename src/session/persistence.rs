// ABOUTME: Typed view over local storage — login session, current room, post-login redirect.
// ABOUTME: Owns the five persisted keys and nothing else touches them directly.

use crate::api::{RoomId, UserId};
use crate::session::store::{KeyValueStore, StorageError};

pub const API_KEY: &str = "api_key";
pub const USER_NAME: &str = "user_name";
pub const USER_ID: &str = "user_id";
pub const CURRENT_ROOM: &str = "current_room";
pub const REDIRECT_AFTER_LOGIN: &str = "redirectAfterLogin";

/// Persisted login credentials and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub api_key: String,
    pub user_name: String,
    pub user_id: UserId,
}

/// Typed accessors over a [`KeyValueStore`].
pub struct SessionStore {
    store: Box<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Logged in means an API key is stored; nothing else is checked.
    pub fn is_logged_in(&self) -> bool {
        self.store.get(API_KEY).is_some()
    }

    pub fn api_key(&self) -> Option<String> {
        self.store.get(API_KEY)
    }

    pub fn user_name(&self) -> Option<String> {
        self.store.get(USER_NAME)
    }

    /// The stored user id, or 0 when absent or unparsable.
    pub fn user_id(&self) -> UserId {
        self.store
            .get(USER_ID)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// The full session, if logged in.
    pub fn session(&self) -> Option<Session> {
        let api_key = self.api_key()?;
        Some(Session {
            api_key,
            user_name: self.user_name().unwrap_or_default(),
            user_id: self.user_id(),
        })
    }

    pub fn save_session(&mut self, session: &Session) -> Result<(), StorageError> {
        self.store.set(API_KEY, &session.api_key)?;
        self.store.set(USER_NAME, &session.user_name)?;
        self.store.set(USER_ID, &session.user_id.to_string())?;
        Ok(())
    }

    pub fn set_user_name(&mut self, name: &str) -> Result<(), StorageError> {
        self.store.set(USER_NAME, name)
    }

    /// Remove the identity keys. The current room and redirect survive logout.
    pub fn clear_session(&mut self) -> Result<(), StorageError> {
        self.store.remove(API_KEY)?;
        self.store.remove(USER_NAME)?;
        self.store.remove(USER_ID)?;
        Ok(())
    }

    pub fn current_room(&self) -> Option<RoomId> {
        self.store.get(CURRENT_ROOM).and_then(|v| v.parse().ok())
    }

    pub fn set_current_room(&mut self, room_id: RoomId) -> Result<(), StorageError> {
        self.store.set(CURRENT_ROOM, &room_id.to_string())
    }

    pub fn redirect_after_login(&self) -> Option<String> {
        self.store.get(REDIRECT_AFTER_LOGIN)
    }

    pub fn set_redirect_after_login(&mut self, path: &str) -> Result<(), StorageError> {
        self.store.set(REDIRECT_AFTER_LOGIN, path)
    }

    /// Read and remove the post-login redirect in one step.
    pub fn take_redirect_after_login(&mut self) -> Result<Option<String>, StorageError> {
        let path = self.store.get(REDIRECT_AFTER_LOGIN);
        if path.is_some() {
            self.store.remove(REDIRECT_AFTER_LOGIN)?;
        }
        Ok(path)
    }

    /// Wipe every key, including ones this client did not write.
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        self.store.clear()
    }
}
