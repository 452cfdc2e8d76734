#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use serde_json::{json, Value};

use mms_web::config::AppConfig;
use mms_web::AppState;

pub const API_PREFIX: &str = "/api/v1";

/// One request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub cache_control: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct Shared {
    replies: Arc<Mutex<HashMap<String, (StatusCode, Value)>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// Stand-in for the backend REST API, served on an ephemeral port. Unknown
/// endpoints answer HTTP 404.
pub struct MockBackend {
    pub base_url: String,
    shared: Shared,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind mock backend")?;
        let addr = listener.local_addr()?;
        let shared = Shared::default();

        let router = Router::new().fallback(reply).with_state(shared.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://{}{}", addr, API_PREFIX),
            shared,
        })
    }

    /// Answer `method path` with the given envelope.
    pub fn on(&self, method: Method, path: &str, envelope: Value) -> &Self {
        self.on_status(method, path, StatusCode::OK, envelope)
    }

    pub fn on_status(&self, method: Method, path: &str, status: StatusCode, body: Value) -> &Self {
        self.shared
            .replies
            .lock()
            .unwrap()
            .insert(format!("{} {}", method, path), (status, body));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.shared.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|call| call.path == path).collect()
    }

    pub fn state(&self) -> AppState {
        let mut config = AppConfig::development();
        config.api.base_url = self.base_url.clone();
        config.security.enable_cors = false;
        AppState::new(config).expect("backend client")
    }

    pub fn app(&self) -> Router {
        mms_web::app(self.state())
    }
}

async fn reply(State(shared): State<Shared>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let path = uri.path().strip_prefix(API_PREFIX).unwrap_or(uri.path()).to_string();
    let header_value = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);

    shared.calls.lock().unwrap().push(RecordedCall {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        cache_control: header_value(header::CACHE_CONTROL),
        content_type: header_value(header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).ok(),
    });

    let found = shared.replies.lock().unwrap().get(&format!("{} {}", method, path)).cloned();
    match found {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn ok(data: Value) -> Value {
    json!({ "code": 200, "message": null, "data": data })
}

pub fn fail(code: i64, message: &str) -> Value {
    json!({ "code": code, "message": message, "data": null })
}

// -- fixtures --

pub fn auth_response(token: &str) -> Value {
    json!({ "expire": 3_600_000, "token": token, "refresh": format!("{}-refresh", token) })
}

pub fn user_info(default_team_id: Option<&str>) -> Value {
    json!({
        "userId": "0b9c6f0e-3f1e-4a53-9a57-2d9d1a1f6e01",
        "uniqueId": "alice01",
        "email": "alice@acme.io",
        "username": "alice",
        "displayName": "Alice",
        "avatar": null,
        "defaultTeamId": default_team_id,
        "status": "active"
    })
}

pub fn team(id: &str, namespace: &str, role: &str) -> Value {
    json!({
        "teamId": id,
        "teamName": namespace.to_uppercase(),
        "teamAvatar": "",
        "teamUniqueId": format!("u-{}", id),
        "teamNamespace": namespace,
        "description": "",
        "role": role,
        "joinedAt": "2024-11-14 12:00:00"
    })
}

// -- cookies --

/// Builds a `Cookie` header from JSON session values, encoded the way the
/// session store writes them.
pub fn cookie_header(entries: &[(&str, Value)]) -> String {
    entries
        .iter()
        .map(|(name, value)| {
            let raw = serde_json::to_string(value).unwrap();
            Cookie::new(name.to_string(), raw).encoded().to_string()
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Cookie header of a signed-in browser.
pub fn signed_in(default_team_id: Option<&str>, teams: Value, selected: Option<Value>) -> String {
    let mut entries = vec![
        ("token", json!("tok-1")),
        ("refresh_token", json!("tok-1-refresh")),
        ("user_info", user_info(default_team_id)),
        ("user_teams", teams),
    ];
    if let Some(selected) = selected {
        entries.push(("selected_team", selected));
    }
    cookie_header(&entries)
}

/// `Set-Cookie` headers of a response, by cookie name. Removals map to an
/// empty value.
pub fn set_cookies(response: &Response) -> HashMap<String, Cookie<'static>> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse_encoded(value.to_string()).ok())
        .map(|cookie| (cookie.name().to_string(), cookie))
        .collect()
}

pub fn cookie_json(response: &Response, name: &str) -> Option<Value> {
    set_cookies(response)
        .get(name)
        .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
}

pub fn location(response: &Response) -> Option<&str> {
    response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok())
}

// -- requests --

pub fn get(path: &str, cookies: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(path: &str, body: Value, cookies: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
