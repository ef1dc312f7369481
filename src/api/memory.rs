// ABOUTME: In-process ChatApi with the chat server's semantics, backed by plain collections.
// ABOUTME: Backs the --demo mode and the test suites; records every request it serves.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use async_trait::async_trait;
use rand::Rng;

use crate::api::types::*;
use crate::api::{ApiError, ChatApi};

const DIGITS: &[u8] = b"0123456789";
const LOWER_ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Clone)]
struct User {
    id: UserId,
    name: String,
    password: String,
    api_key: String,
}

#[derive(Debug, Clone)]
struct Room {
    id: RoomId,
    name: String,
}

#[derive(Debug, Clone)]
struct StoredMessage {
    id: i64,
    room_id: RoomId,
    user_id: UserId,
    body: String,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    rooms: Vec<Room>,
    messages: Vec<StoredMessage>,
    requests: Vec<String>,
}

impl State {
    fn user_by_key(&self, key: &str) -> Option<&User> {
        self.users.iter().find(|u| u.api_key == key)
    }

    fn insert_user(&mut self, name: String, password: String) -> AuthResponse {
        let user = User {
            id: self.users.len() as UserId + 1,
            name,
            password,
            api_key: random_string(LOWER_ALNUM, 40),
        };
        let auth = AuthResponse {
            user_id: user.id,
            user_name: user.name.clone(),
            api_key: user.api_key.clone(),
        };
        self.users.push(user);
        auth
    }

    fn insert_room(&mut self, name: String) -> RoomId {
        let id = self.rooms.len() as RoomId + 1;
        self.rooms.push(Room { id, name });
        id
    }

    fn insert_message(&mut self, room_id: RoomId, user_id: UserId, body: &str) {
        let id = self.messages.len() as i64 + 1;
        self.messages.push(StoredMessage {
            id,
            room_id,
            user_id,
            body: body.to_string(),
        });
    }
}

fn random_string(charset: &[u8], len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect()
}

/// A chat server living in memory.
#[derive(Default)]
pub struct InMemoryApi {
    state: Mutex<State>,
    token: RwLock<Option<String>>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A server with one registered user whose key is already the active token.
    pub fn with_logged_in_user() -> Self {
        let api = Self::new();
        let auth = api.add_user("tester", "secret");
        api.set_token(Some(auth.api_key));
        api
    }

    pub fn add_user(&self, name: &str, password: &str) -> AuthResponse {
        self.state()
            .insert_user(name.to_string(), password.to_string())
    }

    pub fn seed_room(&self, name: &str) -> RoomId {
        self.state().insert_room(name.to_string())
    }

    pub fn seed_message(&self, room_id: RoomId, user_id: UserId, body: &str) {
        self.state().insert_message(room_id, user_id, body);
    }

    /// Every request served so far, as "METHOD /path".
    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn room_name(&self, room_id: RoomId) -> Option<String> {
        self.state()
            .rooms
            .iter()
            .find(|r| r.id == room_id)
            .map(|r| r.name.clone())
    }

    pub fn user_name(&self, user_id: UserId) -> Option<String> {
        self.state()
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.name.clone())
    }

    pub fn user_password(&self, user_id: UserId) -> Option<String> {
        self.state()
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.password.clone())
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn record(&self, method: &str, path: &str) -> MutexGuard<'_, State> {
        let mut state = self.state();
        state.requests.push(format!("{method} {path}"));
        state
    }

    /// Record the request and resolve the caller from the token.
    fn authorized(&self, method: &str, path: &str) -> Result<(MutexGuard<'_, State>, UserId), ApiError> {
        let token = self.current_token();
        let state = self.record(method, path);
        let Some(token) = token else {
            return Err(ApiError::Rejected("API key required".to_string()));
        };
        match state.user_by_key(&token).map(|u| u.id) {
            Some(id) => Ok((state, id)),
            None => Err(ApiError::Rejected("Invalid API key".to_string())),
        }
    }
}

fn ok(message: &str) -> StatusReply {
    StatusReply {
        message: Some(message.to_string()),
        error: None,
    }
}

#[async_trait]
impl ChatApi for InMemoryApi {
    fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    async fn signup(&self) -> Result<AuthResponse, ApiError> {
        let mut state = self.record("POST", "/api/signup");
        let name = format!("Unnamed User #{}", random_string(DIGITS, 6));
        let password = random_string(LOWER_ALNUM, 10);
        Ok(state.insert_user(name, password))
    }

    async fn login(&self, user_name: &str, password: &str) -> Result<LoginReply, ApiError> {
        let state = self.record("POST", "/api/login");
        let found = state
            .users
            .iter()
            .find(|u| u.name == user_name && u.password == password);
        Ok(match found {
            Some(user) => LoginReply::Authenticated(AuthResponse {
                user_id: user.id,
                user_name: user.name.clone(),
                api_key: user.api_key.clone(),
            }),
            None => LoginReply::Failed {
                error: "not login".to_string(),
            },
        })
    }

    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, ApiError> {
        let (state, _) = self.authorized("GET", "/api/rooms")?;
        Ok(state
            .rooms
            .iter()
            .map(|r| RoomSummary {
                room_id: r.id,
                room_name: r.name.clone(),
            })
            .collect())
    }

    async fn create_room(&self) -> Result<CreatedRoom, ApiError> {
        let (mut state, _) = self.authorized("POST", "/api/rooms/new")?;
        let name = format!("Unnamed Room {}", random_string(DIGITS, 6));
        let id = state.insert_room(name.clone());
        Ok(CreatedRoom { id, name })
    }

    async fn get_room(&self, room_id: RoomId) -> Result<RoomSummary, ApiError> {
        let (state, _) = self.authorized("GET", &format!("/api/rooms/{room_id}"))?;
        state
            .rooms
            .iter()
            .find(|r| r.id == room_id)
            .map(|r| RoomSummary {
                room_id: r.id,
                room_name: r.name.clone(),
            })
            .ok_or_else(|| ApiError::Rejected("Failed to get rooms".to_string()))
    }

    async fn rename_room(&self, room_id: RoomId, new_name: &str) -> Result<StatusReply, ApiError> {
        let (mut state, _) = self.authorized("POST", "/api/rooms/name")?;
        if let Some(room) = state.rooms.iter_mut().find(|r| r.id == room_id) {
            room.name = new_name.to_string();
        }
        Ok(ok("Room name updated successfully"))
    }

    async fn get_messages(&self, room_id: RoomId) -> Result<Vec<Message>, ApiError> {
        let (state, _) = self.authorized("GET", &format!("/api/rooms/{room_id}/messages"))?;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.room_id == room_id)
            .filter_map(|m| {
                let author = state.users.iter().find(|u| u.id == m.user_id)?;
                Some(Message {
                    id: Some(m.id),
                    author: author.name.clone(),
                    body: m.body.clone(),
                })
            })
            .collect())
    }

    async fn post_message(
        &self,
        room_id: RoomId,
        user_id: UserId,
        body: &str,
    ) -> Result<StatusReply, ApiError> {
        let (mut state, _) =
            self.authorized("POST", &format!("/api/rooms/{room_id}/messages"))?;
        state.insert_message(room_id, user_id, body);
        Ok(ok("Message posted successfully"))
    }

    async fn update_username(&self, new_name: &str) -> Result<StatusReply, ApiError> {
        let (mut state, caller) = self.authorized("POST", "/api/user/name")?;
        if let Some(user) = state.users.iter_mut().find(|u| u.id == caller) {
            user.name = new_name.to_string();
        }
        Ok(ok("Username updated successfully"))
    }

    async fn update_password(&self, new_password: &str) -> Result<StatusReply, ApiError> {
        let (mut state, caller) = self.authorized("POST", "/api/user/password")?;
        if let Some(user) = state.users.iter_mut().find(|u| u.id == caller) {
            user.password = new_password.to_string();
        }
        Ok(ok("Password updated successfully"))
    }
}
