//! Per-request context threaded through guard, actions and handlers.
//!
//! Holds the request's session (cookie jar), a handle to the shared backend
//! client and a small string memo that lives exactly as long as the request.

use std::collections::HashMap;
use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::client::ApiClient;
use crate::outcome::Outcome;
use crate::routes;
use crate::session::SessionStore;
use crate::AppState;

/// Memo key holding the path of the request being served.
pub const CURRENT_PATH_KEY: &str = "x-current-path";

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub session: SessionStore,
    pub client: ApiClient,
    memo: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(session: SessionStore, client: ApiClient) -> Self {
        Self {
            session,
            client,
            memo: HashMap::new(),
        }
    }

    /// Context for a request with the given headers and path.
    pub fn for_request(headers: &HeaderMap, path: &str, state: &AppState) -> Self {
        let jar = CookieJar::from_headers(headers);
        let session = SessionStore::new(jar, state.config.session.clone());
        let mut ctx = Self::new(session, state.client.clone());
        ctx.set_memo(CURRENT_PATH_KEY, path);
        ctx
    }

    pub fn set_memo(&mut self, key: &str, value: impl Into<String>) {
        self.memo.insert(key.to_string(), value.into());
    }

    pub fn memo(&self, key: &str) -> Option<&str> {
        self.memo.get(key).map(String::as_str)
    }

    pub fn current_path(&self) -> &str {
        self.memo(CURRENT_PATH_KEY).unwrap_or(routes::DASHBOARD)
    }

    /// Turns an outcome into the HTTP response, attaching every pending cookie
    /// write. Navigating to the sign-out route drops the whole session first.
    pub fn respond<R: IntoResponse>(mut self, outcome: Outcome<R>) -> Response {
        match outcome {
            Outcome::Continue(body) => (self.session.into_jar(), body).into_response(),
            Outcome::Redirect(path) => {
                if path == routes::SIGN_OUT_ROUTE {
                    self.session.clear();
                }
                tracing::debug!("Redirecting to {}", path);
                (self.session.into_jar(), Redirect::to(&path)).into_response()
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Self::for_request(&parts.headers, parts.uri.path(), state))
    }
}
