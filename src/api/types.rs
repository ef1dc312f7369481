// ABOUTME: Wire types for the chat server's REST API.
// ABOUTME: Request bodies serialize to the exact field names the server reads.

use serde::{Deserialize, Serialize};

pub type RoomId = i64;
pub type UserId = i64;

/// Identity returned by signup and by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub api_key: String,
}

/// Login either authenticates or comes back with an `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LoginReply {
    Failed { error: String },
    Authenticated(AuthResponse),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub room_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum RoomReply {
    Missing { error: String },
    Found(RoomSummary),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedRoom {
    pub id: RoomId,
    pub name: String,
}

/// A chat message as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: Option<i64>,
    pub author: String,
    pub body: String,
}

/// Generic acknowledgement body. Only logged; never inspected for success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    #[serde(rename = "userName")]
    pub user_name: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RenameRoomRequest<'a> {
    pub new_name: &'a str,
    pub room_id: RoomId,
}

#[derive(Debug, Serialize)]
pub struct PostMessageRequest<'a> {
    pub body: &'a str,
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct UpdateNameRequest<'a> {
    pub new_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UpdatePasswordRequest<'a> {
    pub new_password: &'a str,
}
