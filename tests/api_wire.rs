// ABOUTME: Wire-format tests for the HTTP API client against a throw-away axum server.
// ABOUTME: Checks headers, JSON bodies, paths, and that non-2xx JSON replies still parse.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use serde_json::{Value, json};

use watchparty::api::{ApiError, ChatApi, HttpApi, LoginReply};

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: Option<Value>,
}

#[derive(Clone)]
struct Server {
    status: StatusCode,
    reply: String,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

async fn record(
    State(server): State<Server>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    server.seen.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).ok(),
    });
    (
        server.status,
        [(header::CONTENT_TYPE, "application/json")],
        server.reply.clone(),
    )
}

/// Serve `reply` with `status` for every request; returns the base URL and the request log.
async fn serve(status: StatusCode, reply: &str) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(record).with_state(Server {
        status,
        reply: reply.to_string(),
        seen: seen.clone(),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), seen)
}

fn only(seen: &Arc<Mutex<Vec<Recorded>>>) -> Recorded {
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1, "expected exactly one request, got {seen:?}");
    seen[0].clone()
}

#[tokio::test]
async fn login_posts_credentials_without_authorization() {
    let (url, seen) = serve(
        StatusCode::OK,
        r#"{"user_id": 4, "user_name": "ann", "api_key": "k4"}"#,
    )
    .await;
    let api = HttpApi::new(&url, None).unwrap();

    let reply = api.login("ann", "pw").await.unwrap();
    match reply {
        LoginReply::Authenticated(auth) => {
            assert_eq!(auth.user_id, 4);
            assert_eq!(auth.api_key, "k4");
        }
        other => panic!("expected success, got {other:?}"),
    }

    let req = only(&seen);
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/api/login");
    assert_eq!(req.authorization, None);
    assert_eq!(req.content_type.as_deref(), Some("application/json"));
    assert_eq!(req.body, Some(json!({"userName": "ann", "password": "pw"})));
}

#[tokio::test]
async fn stored_token_is_sent_verbatim() {
    let (url, seen) = serve(StatusCode::OK, r#"[{"room_id": 1, "room_name": "Lobby"}]"#).await;
    let api = HttpApi::new(&url, Some("secret-key".to_string())).unwrap();

    let rooms = api.list_rooms().await.unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].room_name, "Lobby");

    let req = only(&seen);
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path, "/api/rooms");
    assert_eq!(req.authorization.as_deref(), Some("secret-key"));
}

#[tokio::test]
async fn error_status_with_json_body_is_still_parsed() {
    let (url, _seen) = serve(StatusCode::UNAUTHORIZED, r#"{"error": "not login"}"#).await;
    let api = HttpApi::new(&url, None).unwrap();

    let reply = api.login("ann", "wrong").await.unwrap();
    assert_eq!(
        reply,
        LoginReply::Failed {
            error: "not login".to_string()
        }
    );
}

#[tokio::test]
async fn missing_room_is_rejected() {
    let (url, seen) = serve(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error": "Failed to get rooms"}"#,
    )
    .await;
    let api = HttpApi::new(&url, Some("k".to_string())).unwrap();

    let err = api.get_room(9).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected(ref msg) if msg == "Failed to get rooms"));
    assert_eq!(only(&seen).path, "/api/rooms/9");
}

#[tokio::test]
async fn post_message_sends_body_and_user_id() {
    let (url, seen) = serve(StatusCode::OK, r#"{"message": "ok"}"#).await;
    let api = HttpApi::new(&url, Some("k".to_string())).unwrap();

    let reply = api.post_message(3, 7, "hi there").await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("ok"));

    let req = only(&seen);
    assert_eq!(req.path, "/api/rooms/3/messages");
    assert_eq!(req.body, Some(json!({"body": "hi there", "user_id": 7})));
}

#[tokio::test]
async fn rename_room_sends_numeric_room_id() {
    let (url, seen) = serve(StatusCode::OK, r#"{"message": "ok"}"#).await;
    let api = HttpApi::new(&url, Some("k".to_string())).unwrap();

    api.rename_room(5, "Cinema").await.unwrap();

    let req = only(&seen);
    assert_eq!(req.path, "/api/rooms/name");
    assert_eq!(req.body, Some(json!({"new_name": "Cinema", "room_id": 5})));
}

#[tokio::test]
async fn profile_updates_hit_user_endpoints() {
    let (url, seen) = serve(StatusCode::OK, r#"{"message": "ok"}"#).await;
    let api = HttpApi::new(&url, Some("k".to_string())).unwrap();

    api.update_username("bob").await.unwrap();
    api.update_password("pw2").await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].path, "/api/user/name");
    assert_eq!(seen[0].body, Some(json!({"new_name": "bob"})));
    assert_eq!(seen[1].path, "/api/user/password");
    assert_eq!(seen[1].body, Some(json!({"new_password": "pw2"})));
}

#[tokio::test]
async fn signup_and_create_room_post_without_body() {
    let (url, seen) = serve(StatusCode::OK, r#"{"id": 2, "name": "Unnamed Room 123456"}"#).await;
    let api = HttpApi::new(&url, Some("k".to_string())).unwrap();

    let room = api.create_room().await.unwrap();
    assert_eq!(room.id, 2);

    let req = only(&seen);
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/api/rooms/new");
    assert_eq!(req.body, None);
}

#[tokio::test]
async fn cleared_token_drops_authorization() {
    let (url, seen) = serve(StatusCode::OK, "[]").await;
    let api = HttpApi::new(&url, Some("k".to_string())).unwrap();
    api.set_token(None);

    api.get_messages(1).await.unwrap();

    assert_eq!(only(&seen).authorization, None);
}

#[tokio::test]
async fn non_json_reply_is_a_parse_error() {
    let (url, _seen) = serve(StatusCode::OK, "<html>oops</html>").await;
    let api = HttpApi::new(&url, None).unwrap();

    let err = api.list_rooms().await.unwrap_err();
    assert!(matches!(err, ApiError::Json(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api = HttpApi::new(&format!("http://{addr}"), None).unwrap();

    let err = api.signup().await.unwrap_err();
    assert!(matches!(err, ApiError::Request(_)));
}
