// ABOUTME: API module — the ChatApi seam, its HTTP implementation, and the wire types.
// ABOUTME: The router, poller and action handlers only ever talk to `dyn ChatApi`.

pub mod client;
pub mod memory;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::HttpApi;
pub use memory::InMemoryApi;
pub use types::{
    AuthResponse, CreatedRoom, LoginReply, Message, RoomId, RoomSummary, StatusReply, UserId,
};

/// Errors that can occur while talking to the chat server.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("server rejected request: {0}")]
    Rejected(String),
}

/// The chat server's REST surface.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Replace the token sent as the Authorization header (None sends no header).
    fn set_token(&self, token: Option<String>);

    async fn signup(&self) -> Result<AuthResponse, ApiError>;
    async fn login(&self, user_name: &str, password: &str) -> Result<LoginReply, ApiError>;
    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, ApiError>;
    async fn create_room(&self) -> Result<CreatedRoom, ApiError>;
    async fn get_room(&self, room_id: RoomId) -> Result<RoomSummary, ApiError>;
    async fn rename_room(&self, room_id: RoomId, new_name: &str) -> Result<StatusReply, ApiError>;
    async fn get_messages(&self, room_id: RoomId) -> Result<Vec<Message>, ApiError>;
    async fn post_message(
        &self,
        room_id: RoomId,
        user_id: UserId,
        body: &str,
    ) -> Result<StatusReply, ApiError>;
    async fn update_username(&self, new_name: &str) -> Result<StatusReply, ApiError>;
    async fn update_password(&self, new_password: &str) -> Result<StatusReply, ApiError>;
}
