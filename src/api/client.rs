// ABOUTME: HTTP implementation of ChatApi — one generic request helper plus typed endpoints.
// ABOUTME: Sends the raw stored token as Authorization and never inspects the status code.

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::types::*;
use crate::api::{ApiError, ChatApi};

/// REST client for the chat server.
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpApi {
    /// Create a client for `base_url` (e.g. "http://127.0.0.1:5000"). No request timeout is set.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(token),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    /// Send one JSON request and parse the JSON reply, whatever the status.
    pub async fn fetch_api<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.token() {
            request = request.header(AUTHORIZATION, token);
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(%method, %url, %status, len = bytes.len(), "api response");

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.fetch_api::<(), R>(Method::GET, path, None).await
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<R, ApiError> {
        self.fetch_api(Method::POST, path, body).await
    }
}

#[async_trait]
impl ChatApi for HttpApi {
    fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    async fn signup(&self) -> Result<AuthResponse, ApiError> {
        self.post::<(), _>("/api/signup", None).await
    }

    async fn login(&self, user_name: &str, password: &str) -> Result<LoginReply, ApiError> {
        let body = LoginRequest {
            user_name,
            password,
        };
        self.post("/api/login", Some(&body)).await
    }

    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, ApiError> {
        self.get("/api/rooms").await
    }

    async fn create_room(&self) -> Result<CreatedRoom, ApiError> {
        self.post::<(), _>("/api/rooms/new", None).await
    }

    async fn get_room(&self, room_id: RoomId) -> Result<RoomSummary, ApiError> {
        match self.get::<RoomReply>(&format!("/api/rooms/{room_id}")).await? {
            RoomReply::Found(room) => Ok(room),
            RoomReply::Missing { error } => Err(ApiError::Rejected(error)),
        }
    }

    async fn rename_room(&self, room_id: RoomId, new_name: &str) -> Result<StatusReply, ApiError> {
        let body = RenameRoomRequest { new_name, room_id };
        self.post("/api/rooms/name", Some(&body)).await
    }

    async fn get_messages(&self, room_id: RoomId) -> Result<Vec<Message>, ApiError> {
        self.get(&format!("/api/rooms/{room_id}/messages")).await
    }

    async fn post_message(
        &self,
        room_id: RoomId,
        user_id: UserId,
        body: &str,
    ) -> Result<StatusReply, ApiError> {
        let body = PostMessageRequest { body, user_id };
        self.post(&format!("/api/rooms/{room_id}/messages"), Some(&body))
            .await
    }

    async fn update_username(&self, new_name: &str) -> Result<StatusReply, ApiError> {
        self.post("/api/user/name", Some(&UpdateNameRequest { new_name }))
            .await
    }

    async fn update_password(&self, new_password: &str) -> Result<StatusReply, ApiError> {
        self.post(
            "/api/user/password",
            Some(&UpdatePasswordRequest { new_password }),
        )
        .await
    }
}
