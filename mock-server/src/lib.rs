//! In-memory stand-in for the chat server.
//!
//! Serves the `/api/v1` subset the client crate exercises in its
//! integration tests: the three credential flows plus messages, channels,
//! drafts, snippets, navigation views, reminders and event queues, all
//! backed by one mutable state behind an `RwLock`. Every response uses the
//! real envelope shape (`result`/`msg`, plus `code` on errors) so the
//! client's parsing is tested against faithful payloads.

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Form, Json, Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Fixture account the server accepts.
pub const EMAIL: &str = "iago@zulip.com";
pub const PASSWORD: &str = "horse-battery-staple";
pub const API_KEY: &str = "abcd1234efgh5678";
/// Fixture token for the JWT credential flow.
pub const JWT_TOKEN: &str = "header.payload.signature";

const USER_ID: i64 = 11;
const NOW: i64 = 1754006400;

#[derive(Debug, Clone)]
struct StoredMessage {
    id: i64,
    message_type: String,
    stream_id: Option<i64>,
    topic: String,
    content: String,
    reactions: Vec<String>,
}

impl StoredMessage {
    fn render(&self, streams: &[Value]) -> Value {
        let display_recipient = match self.stream_id {
            Some(sid) => streams
                .iter()
                .find(|s| s["stream_id"] == json!(sid))
                .map(|s| s["name"].clone())
                .unwrap_or_else(|| json!("unknown")),
            None => json!([{"id": USER_ID, "email": EMAIL, "full_name": "Iago"}]),
        };
        let reactions: Vec<Value> = self
            .reactions
            .iter()
            .map(|name| {
                json!({
                    "emoji_name": name,
                    "emoji_code": "1f419",
                    "reaction_type": "unicode_emoji",
                    "user_id": USER_ID,
                })
            })
            .collect();
        json!({
            "id": self.id,
            "type": self.message_type,
            "content": format!("<p>{}</p>", self.content),
            "content_type": "text/html",
            "sender_id": USER_ID,
            "sender_email": EMAIL,
            "sender_full_name": "Iago",
            "stream_id": self.stream_id,
            "subject": self.topic,
            "timestamp": NOW,
            "client": "test-suite",
            "flags": ["read"],
            "reactions": reactions,
            "recipient_id": 21,
            "display_recipient": display_recipient,
        })
    }
}

#[derive(Debug, Default)]
struct ServerState {
    next_id: i64,
    messages: Vec<StoredMessage>,
    streams: Vec<Value>,
    drafts: Vec<Value>,
    snippets: Vec<Value>,
    views: Vec<Value>,
    attachments: Vec<Value>,
    queues: HashMap<String, i64>,
}

impl ServerState {
    fn seeded() -> Self {
        Self {
            next_id: 100,
            streams: vec![channel_json(1, "general")],
            ..Self::default()
        }
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<RwLock<ServerState>>;

fn channel_json(stream_id: i64, name: &str) -> Value {
    json!({
        "stream_id": stream_id,
        "name": name,
        "is_archived": false,
        "description": "",
        "rendered_description": "",
        "date_created": NOW,
        "creator_id": USER_ID,
        "invite_only": false,
        "is_web_public": false,
        "stream_post_policy": 1,
        "message_retention_days": null,
        "history_public_to_subscribers": true,
        "topics_policy": "inherit",
        "first_message_id": null,
        "folder_id": null,
        "is_recently_active": true,
        "is_announcement_only": false,
        "can_add_subscribers_group": 2,
        "can_remove_subscribers_group": 2,
        "can_administer_channel_group": 2,
        "can_delete_any_message_group": 2,
        "can_delete_own_message_group": 2,
        "can_move_messages_out_of_channel_group": 2,
        "can_move_messages_within_channel_group": 2,
        "can_send_message_group": 2,
        "can_subscribe_group": 2,
        "can_resolve_topics_group": 2,
        "can_create_topic_group": 2,
        "subscriber_count": 1,
        "stream_weekly_traffic": null,
    })
}

fn ok(extra: Value) -> Response {
    let mut envelope = json!({"result": "success", "msg": ""});
    if let (Some(envelope), Value::Object(extra)) = (envelope.as_object_mut(), extra) {
        envelope.extend(extra);
    }
    Json(envelope).into_response()
}

fn err(status: StatusCode, msg: &str, code: &str) -> Response {
    let body = json!({"result": "error", "msg": msg, "code": code});
    (status, Json(body)).into_response()
}

fn credentials_match(authorization: Option<&str>) -> bool {
    let Some(encoded) = authorization.and_then(|h| h.strip_prefix("Basic ")) else {
        return false;
    };
    BASE64
        .decode(encoded)
        .map(|raw| raw == format!("{EMAIL}:{API_KEY}").into_bytes())
        .unwrap_or(false)
}

async fn require_auth(req: Request, next: Next) -> Response {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if credentials_match(authorization) {
        next.run(req).await
    } else {
        err(StatusCode::UNAUTHORIZED, "Invalid API key", "UNAUTHORIZED")
    }
}

pub fn app() -> Router {
    let state: Shared = Arc::new(RwLock::new(ServerState::seeded()));
    let open = Router::new()
        .route("/login", post(login))
        .route("/dev_fetch_api_key", post(dev_fetch_api_key))
        .route("/fetch_api_key", post(fetch_api_key));
    let authed = Router::new()
        .route("/messages", post(send_message).get(get_messages))
        .route("/messages/{id}", patch(edit_message).delete(delete_message))
        .route(
            "/messages/{id}/reactions",
            post(add_reaction).delete(remove_reaction),
        )
        .route("/user_uploads", post(upload_file))
        .route("/streams", get(get_streams))
        .route(
            "/streams/{id}",
            get(get_stream).patch(update_stream).delete(archive_stream),
        )
        .route("/get_stream_id", get(get_stream_id))
        .route("/channels/create", post(create_channel))
        .route("/channel_folders/create", post(create_channel_folder))
        .route("/users/me/subscriptions", get(get_subscriptions))
        .route("/users/me/{stream_id}/topics", get(get_topics))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/status", get(get_user_status))
        .route("/attachments", get(get_attachments))
        .route("/drafts", get(get_drafts).post(create_drafts))
        .route("/drafts/{id}", patch(edit_draft).delete(delete_draft))
        .route("/reminders", post(create_reminder))
        .route("/scheduled_messages", get(get_scheduled_messages))
        .route("/saved_snippets", get(get_snippets).post(create_snippet))
        .route(
            "/saved_snippets/{id}",
            patch(edit_snippet).delete(delete_snippet),
        )
        .route("/navigation_views", get(get_views).post(add_view))
        .route(
            "/navigation_views/{fragment}",
            patch(edit_view).delete(remove_view),
        )
        .route("/register", post(register_queue))
        .route("/events", get(get_events).delete(delete_queue))
        .layer(middleware::from_fn(require_auth));
    Router::new()
        .nest("/api/v1", open.merge(authed))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(Form(form): Form<LoginForm>) -> Response {
    if form.username == EMAIL && form.password == PASSWORD {
        ok(json!({"api_key": API_KEY, "email": EMAIL, "user_id": USER_ID}))
    } else {
        err(
            StatusCode::FORBIDDEN,
            "Your username or password is incorrect.",
            "AUTHENTICATION_FAILED",
        )
    }
}

#[derive(Deserialize)]
struct DevLoginForm {
    username: String,
}

async fn dev_fetch_api_key(Form(form): Form<DevLoginForm>) -> Response {
    if form.username == EMAIL {
        ok(json!({"api_key": API_KEY, "email": EMAIL, "user_id": USER_ID}))
    } else {
        err(
            StatusCode::FORBIDDEN,
            "This user is not registered.",
            "AUTHENTICATION_FAILED",
        )
    }
}

#[derive(Deserialize)]
struct JwtForm {
    token: String,
}

async fn fetch_api_key(Form(form): Form<JwtForm>) -> Response {
    if form.token == JWT_TOKEN {
        ok(json!({"api_key": API_KEY, "email": EMAIL, "user_id": USER_ID}))
    } else {
        err(StatusCode::BAD_REQUEST, "Bad JSON web token", "BAD_REQUEST")
    }
}

async fn send_message(
    State(state): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(content) = form.get("content") else {
        return err(
            StatusCode::BAD_REQUEST,
            "Missing 'content' argument",
            "REQUEST_VARIABLE_MISSING",
        );
    };
    let mut s = state.write().await;
    let (message_type, stream_id, topic) = match form.get("type").map(String::as_str) {
        Some("stream") | Some("channel") => {
            let to = form.get("to").cloned().unwrap_or_default();
            let stream_id = match to.parse::<i64>() {
                Ok(id) => id,
                Err(_) => {
                    let Some(stream) = s.streams.iter().find(|c| c["name"] == json!(to)) else {
                        return err(
                            StatusCode::BAD_REQUEST,
                            &format!("Channel '{to}' does not exist"),
                            "STREAM_DOES_NOT_EXIST",
                        );
                    };
                    stream["stream_id"].as_i64().unwrap_or_default()
                }
            };
            (
                "stream".to_string(),
                Some(stream_id),
                form.get("topic").cloned().unwrap_or_default(),
            )
        }
        Some("direct") | Some("private") => ("private".to_string(), None, String::new()),
        _ => {
            return err(
                StatusCode::BAD_REQUEST,
                "Invalid message type",
                "BAD_REQUEST",
            )
        }
    };
    let id = s.allocate_id();
    s.messages.push(StoredMessage {
        id,
        message_type,
        stream_id,
        topic,
        content: content.clone(),
        reactions: Vec::new(),
    });
    ok(json!({"id": id}))
}

async fn get_messages(State(state): State<Shared>) -> Response {
    let s = state.read().await;
    let messages: Vec<Value> = s.messages.iter().map(|m| m.render(&s.streams)).collect();
    let anchor = s.messages.last().map(|m| m.id);
    ok(json!({
        "messages": messages,
        "found_anchor": true,
        "found_newest": true,
        "found_oldest": true,
        "history_limited": false,
        "anchor": anchor,
    }))
}

async fn edit_message(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut s = state.write().await;
    let Some(message) = s.messages.iter_mut().find(|m| m.id == id) else {
        return err(StatusCode::BAD_REQUEST, "Invalid message(s)", "BAD_REQUEST");
    };
    if let Some(content) = form.get("content") {
        message.content = content.clone();
    }
    if let Some(topic) = form.get("topic") {
        message.topic = topic.clone();
    }
    if let Some(stream_id) = form.get("stream_id").and_then(|v| v.parse().ok()) {
        message.stream_id = Some(stream_id);
    }
    ok(json!({}))
}

async fn delete_message(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut s = state.write().await;
    let before = s.messages.len();
    s.messages.retain(|m| m.id != id);
    if s.messages.len() == before {
        return err(StatusCode::BAD_REQUEST, "Invalid message(s)", "BAD_REQUEST");
    }
    ok(json!({}))
}

async fn add_reaction(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(emoji_name) = form.get("emoji_name") else {
        return err(
            StatusCode::BAD_REQUEST,
            "Missing 'emoji_name' argument",
            "REQUEST_VARIABLE_MISSING",
        );
    };
    let mut s = state.write().await;
    let Some(message) = s.messages.iter_mut().find(|m| m.id == id) else {
        return err(StatusCode::BAD_REQUEST, "Invalid message(s)", "BAD_REQUEST");
    };
    if message.reactions.iter().any(|r| r == emoji_name) {
        return err(StatusCode::BAD_REQUEST, "Reaction already exists.", "BAD_REQUEST");
    }
    message.reactions.push(emoji_name.clone());
    ok(json!({}))
}

/// Removing a reaction accepts two request shapes: a bodyless DELETE drops
/// the caller's most recent reaction, a form body names the emoji to drop.
/// An empty form body is a malformed request, not a bodyless one.
async fn remove_reaction(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut s = state.write().await;
    let Some(message) = s.messages.iter_mut().find(|m| m.id == id) else {
        return err(StatusCode::BAD_REQUEST, "Invalid message(s)", "BAD_REQUEST");
    };
    if !headers.contains_key(header::CONTENT_TYPE) {
        if message.reactions.pop().is_none() {
            return err(
                StatusCode::BAD_REQUEST,
                "Reaction doesn't exist.",
                "BAD_REQUEST",
            );
        }
        return ok(json!({}));
    }
    let form: HashMap<String, String> =
        serde_urlencoded::from_bytes(&body).unwrap_or_default();
    let Some(emoji_name) = form.get("emoji_name") else {
        return err(
            StatusCode::BAD_REQUEST,
            "Missing 'emoji_name' argument",
            "REQUEST_VARIABLE_MISSING",
        );
    };
    let before = message.reactions.len();
    message.reactions.retain(|r| r != emoji_name);
    if message.reactions.len() == before {
        return err(
            StatusCode::BAD_REQUEST,
            "Reaction doesn't exist.",
            "BAD_REQUEST",
        );
    }
    ok(json!({}))
}

async fn upload_file(State(state): State<Shared>, mut multipart: Multipart) -> Response {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        _ => {
            return err(
                StatusCode::BAD_REQUEST,
                "You must specify a file to upload",
                "BAD_REQUEST",
            )
        }
    };
    if field.name() != Some("filename") {
        return err(
            StatusCode::BAD_REQUEST,
            "You must specify a file to upload",
            "BAD_REQUEST",
        );
    }
    let file_name = field.file_name().unwrap_or("upload").to_string();
    let Ok(content) = field.bytes().await else {
        return err(StatusCode::BAD_REQUEST, "Malformed upload", "BAD_REQUEST");
    };
    let mut s = state.write().await;
    let id = s.allocate_id();
    let path = format!("/user_uploads/2/ab/{id}/{file_name}");
    s.attachments.push(json!({
        "id": id,
        "name": file_name,
        "path_id": path.trim_start_matches('/'),
        "size": content.len(),
        "create_time": NOW,
        "messages": [],
    }));
    ok(json!({"uri": path, "url": path, "filename": file_name}))
}

async fn get_streams(State(state): State<Shared>) -> Response {
    let s = state.read().await;
    ok(json!({"streams": s.streams}))
}

async fn get_stream(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let s = state.read().await;
    match s.streams.iter().find(|c| c["stream_id"] == json!(id)) {
        Some(stream) => ok(json!({"stream": stream})),
        None => err(StatusCode::BAD_REQUEST, "Invalid channel ID", "BAD_REQUEST"),
    }
}

async fn update_stream(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut s = state.write().await;
    let Some(stream) = s.streams.iter_mut().find(|c| c["stream_id"] == json!(id)) else {
        return err(StatusCode::BAD_REQUEST, "Invalid channel ID", "BAD_REQUEST");
    };
    let fields = stream.as_object_mut().expect("channel fixtures are objects");
    for (key, raw) in form {
        // Values arrive in wire form: JSON text for structured values,
        // bare text for strings.
        let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
        if key == "new_name" {
            fields.insert("name".to_string(), value);
        } else {
            fields.insert(key, value);
        }
    }
    ok(json!({}))
}

async fn archive_stream(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut s = state.write().await;
    let Some(stream) = s.streams.iter_mut().find(|c| c["stream_id"] == json!(id)) else {
        return err(StatusCode::BAD_REQUEST, "Invalid channel ID", "BAD_REQUEST");
    };
    stream["is_archived"] = json!(true);
    ok(json!({}))
}

async fn get_stream_id(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let name = query.get("stream").cloned().unwrap_or_default();
    let s = state.read().await;
    match s.streams.iter().find(|c| c["name"] == json!(name)) {
        Some(stream) => ok(json!({"stream_id": stream["stream_id"]})),
        None => err(
            StatusCode::BAD_REQUEST,
            &format!("Invalid channel name '{name}'"),
            "BAD_REQUEST",
        ),
    }
}

async fn create_channel(
    State(state): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(name) = form.get("name") else {
        return err(
            StatusCode::BAD_REQUEST,
            "Missing 'name' argument",
            "REQUEST_VARIABLE_MISSING",
        );
    };
    let mut s = state.write().await;
    if s.streams.iter().any(|c| c["name"] == json!(name)) {
        return err(
            StatusCode::BAD_REQUEST,
            &format!("Channel '{name}' already exists"),
            "BAD_REQUEST",
        );
    }
    let id = s.allocate_id();
    let mut stream = channel_json(id, name);
    let fields = stream.as_object_mut().expect("channel fixtures are objects");
    for (key, raw) in form {
        if matches!(key.as_str(), "name" | "subscribers" | "announce") {
            continue;
        }
        let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
        fields.insert(key, value);
    }
    s.streams.push(stream);
    ok(json!({"id": id}))
}

async fn create_channel_folder(
    State(state): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    if !form.contains_key("name") {
        return err(
            StatusCode::BAD_REQUEST,
            "Missing 'name' argument",
            "REQUEST_VARIABLE_MISSING",
        );
    }
    let mut s = state.write().await;
    let id = s.allocate_id();
    ok(json!({"channel_folder_id": id}))
}

async fn get_subscriptions(State(state): State<Shared>) -> Response {
    let s = state.read().await;
    let subscriptions: Vec<Value> = s
        .streams
        .iter()
        .map(|stream| {
            let mut sub = stream.as_object().cloned().unwrap_or_default();
            sub.insert("color".to_string(), json!("#76ce90"));
            sub.insert("pin_to_top".to_string(), json!(false));
            sub.insert("is_muted".to_string(), json!(false));
            sub.insert("in_home_view".to_string(), json!(true));
            for flag in [
                "desktop_notifications",
                "email_notifications",
                "wildcard_mentions_notify",
                "push_notifications",
                "audible_notifications",
            ] {
                sub.insert(flag.to_string(), Value::Null);
            }
            Value::Object(sub)
        })
        .collect();
    ok(json!({"subscriptions": subscriptions}))
}

async fn get_topics(State(state): State<Shared>, Path(stream_id): Path<i64>) -> Response {
    let s = state.read().await;
    let mut max_ids: HashMap<String, i64> = HashMap::new();
    for message in s.messages.iter().filter(|m| m.stream_id == Some(stream_id)) {
        let entry = max_ids.entry(message.topic.clone()).or_default();
        *entry = (*entry).max(message.id);
    }
    let topics: Vec<Value> = max_ids
        .into_iter()
        .map(|(name, max_id)| json!({"name": name, "max_id": max_id}))
        .collect();
    ok(json!({"topics": topics}))
}

async fn get_user(Path(id): Path<i64>) -> Response {
    if id != USER_ID {
        return err(StatusCode::BAD_REQUEST, "No such user", "BAD_REQUEST");
    }
    ok(json!({"user": {
        "user_id": USER_ID,
        "delivery_email": null,
        "email": EMAIL,
        "full_name": "Iago",
        "date_joined": "2024-01-15T12:00:00.000000+00:00",
        "is_active": true,
        "is_owner": false,
        "is_admin": true,
        "is_guest": false,
        "is_bot": false,
        "role": 200,
        "timezone": "UTC",
        "avatar_url": null,
        "avatar_version": 1,
        "is_imported_stub": false,
    }}))
}

async fn get_user_status(Path(id): Path<i64>) -> Response {
    if id != USER_ID {
        return err(StatusCode::BAD_REQUEST, "No such user", "BAD_REQUEST");
    }
    ok(json!({"status": {"status_text": "out to lunch", "emoji_name": "car"}}))
}

async fn get_attachments(State(state): State<Shared>) -> Response {
    let s = state.read().await;
    let used: i64 = s
        .attachments
        .iter()
        .filter_map(|a| a["size"].as_i64())
        .sum();
    ok(json!({"attachments": s.attachments, "upload_space_used": used}))
}

async fn get_drafts(State(state): State<Shared>) -> Response {
    let s = state.read().await;
    ok(json!({"count": s.drafts.len(), "drafts": s.drafts}))
}

async fn create_drafts(
    State(state): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(raw) = form.get("drafts") else {
        return err(
            StatusCode::BAD_REQUEST,
            "Missing 'drafts' argument",
            "REQUEST_VARIABLE_MISSING",
        );
    };
    let Ok(items) = serde_json::from_str::<Vec<Value>>(raw) else {
        return err(
            StatusCode::BAD_REQUEST,
            "Argument \"drafts\" is not valid JSON.",
            "BAD_REQUEST",
        );
    };
    let mut s = state.write().await;
    let mut ids = Vec::with_capacity(items.len());
    for mut item in items {
        let id = s.allocate_id();
        item["id"] = json!(id);
        item["timestamp"] = json!(NOW as f64);
        s.drafts.push(item);
        ids.push(id);
    }
    ok(json!({"ids": ids}))
}

async fn edit_draft(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(replacement) = form
        .get("draft")
        .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
    else {
        return err(
            StatusCode::BAD_REQUEST,
            "Missing 'draft' argument",
            "REQUEST_VARIABLE_MISSING",
        );
    };
    let mut s = state.write().await;
    let Some(draft) = s.drafts.iter_mut().find(|d| d["id"] == json!(id)) else {
        return err(StatusCode::NOT_FOUND, "Draft does not exist", "BAD_REQUEST");
    };
    let mut updated = replacement;
    updated["id"] = json!(id);
    updated["timestamp"] = json!(NOW as f64);
    *draft = updated;
    ok(json!({}))
}

async fn delete_draft(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut s = state.write().await;
    let before = s.drafts.len();
    s.drafts.retain(|d| d["id"] != json!(id));
    if s.drafts.len() == before {
        return err(StatusCode::NOT_FOUND, "Draft does not exist", "BAD_REQUEST");
    }
    ok(json!({}))
}

async fn create_reminder(
    State(state): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let message_id: Option<i64> = form.get("message_id").and_then(|v| v.parse().ok());
    let Some(message_id) = message_id else {
        return err(
            StatusCode::BAD_REQUEST,
            "Missing 'message_id' argument",
            "REQUEST_VARIABLE_MISSING",
        );
    };
    let mut s = state.write().await;
    if !s.messages.iter().any(|m| m.id == message_id) {
        return err(StatusCode::BAD_REQUEST, "Invalid message(s)", "BAD_REQUEST");
    }
    let id = s.allocate_id();
    ok(json!({"reminder_id": id}))
}

async fn get_scheduled_messages() -> Response {
    ok(json!({"scheduled_messages": [{
        "scheduled_message_id": 1,
        "type": "stream",
        "to": 1,
        "topic": "standup",
        "content": "reminder",
        "rendered_content": "<p>reminder</p>",
        "scheduled_delivery_timestamp": NOW + 86400,
        "failed": false,
    }]}))
}

async fn get_snippets(State(state): State<Shared>) -> Response {
    let s = state.read().await;
    ok(json!({"saved_snippets": s.snippets}))
}

async fn create_snippet(
    State(state): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let (Some(title), Some(content)) = (form.get("title"), form.get("content")) else {
        return err(
            StatusCode::BAD_REQUEST,
            "Missing 'title' argument",
            "REQUEST_VARIABLE_MISSING",
        );
    };
    let mut s = state.write().await;
    let id = s.allocate_id();
    s.snippets.push(json!({
        "id": id,
        "title": title,
        "content": content,
        "date_created": NOW,
    }));
    ok(json!({"saved_snippet_id": id}))
}

async fn edit_snippet(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut s = state.write().await;
    let Some(snippet) = s.snippets.iter_mut().find(|v| v["id"] == json!(id)) else {
        return err(
            StatusCode::NOT_FOUND,
            "Saved snippet does not exist.",
            "BAD_REQUEST",
        );
    };
    for key in ["title", "content"] {
        if let Some(value) = form.get(key) {
            snippet[key] = json!(value);
        }
    }
    ok(json!({}))
}

async fn delete_snippet(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut s = state.write().await;
    let before = s.snippets.len();
    s.snippets.retain(|v| v["id"] != json!(id));
    if s.snippets.len() == before {
        return err(
            StatusCode::NOT_FOUND,
            "Saved snippet does not exist.",
            "BAD_REQUEST",
        );
    }
    ok(json!({}))
}

async fn get_views(State(state): State<Shared>) -> Response {
    let s = state.read().await;
    ok(json!({"navigation_views": s.views}))
}

async fn add_view(
    State(state): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let Some(fragment) = form.get("fragment") else {
        return err(
            StatusCode::BAD_REQUEST,
            "Missing 'fragment' argument",
            "REQUEST_VARIABLE_MISSING",
        );
    };
    let is_pinned = form.get("is_pinned").map(|v| v == "true").unwrap_or(false);
    let mut s = state.write().await;
    if s.views.iter().any(|v| v["fragment"] == json!(fragment)) {
        return err(
            StatusCode::BAD_REQUEST,
            "Navigation view already exists.",
            "BAD_REQUEST",
        );
    }
    s.views.push(json!({
        "fragment": fragment,
        "is_pinned": is_pinned,
        "name": form.get("name"),
    }));
    ok(json!({}))
}

async fn edit_view(
    State(state): State<Shared>,
    Path(fragment): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut s = state.write().await;
    let Some(view) = s.views.iter_mut().find(|v| v["fragment"] == json!(fragment)) else {
        return err(
            StatusCode::NOT_FOUND,
            "Navigation view does not exist.",
            "BAD_REQUEST",
        );
    };
    if let Some(is_pinned) = form.get("is_pinned") {
        view["is_pinned"] = json!(is_pinned == "true");
    }
    if let Some(name) = form.get("name") {
        view["name"] = json!(name);
    }
    ok(json!({}))
}

async fn remove_view(State(state): State<Shared>, Path(fragment): Path<String>) -> Response {
    let mut s = state.write().await;
    let before = s.views.len();
    s.views.retain(|v| v["fragment"] != json!(fragment));
    if s.views.len() == before {
        return err(
            StatusCode::NOT_FOUND,
            "Navigation view does not exist.",
            "BAD_REQUEST",
        );
    }
    ok(json!({}))
}

async fn register_queue(State(state): State<Shared>) -> Response {
    let mut s = state.write().await;
    let queue_id = format!("{}:0", s.allocate_id());
    s.queues.insert(queue_id.clone(), -1);
    ok(json!({"queue_id": queue_id, "last_event_id": -1}))
}

async fn get_events(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let queue_id = query.get("queue_id").cloned().unwrap_or_default();
    let s = state.read().await;
    if !s.queues.contains_key(&queue_id) {
        return err(
            StatusCode::BAD_REQUEST,
            &format!("Bad event queue ID: {queue_id}"),
            "BAD_EVENT_QUEUE_ID",
        );
    }
    ok(json!({"events": [{"id": 0, "type": "heartbeat"}]}))
}

async fn delete_queue(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let queue_id = query.get("queue_id").cloned().unwrap_or_default();
    let mut s = state.write().await;
    if s.queues.remove(&queue_id).is_none() {
        return err(
            StatusCode::BAD_REQUEST,
            &format!("Bad event queue ID: {queue_id}"),
            "BAD_EVENT_QUEUE_ID",
        );
    }
    ok(json!({}))
}
