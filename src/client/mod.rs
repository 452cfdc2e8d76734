//! HTTP client for the backend REST API.
//!
//! Every call attaches the session's bearer token, disables caching and folds
//! the backend envelope into an [`Outcome`]: an expired session (`code == 401`)
//! becomes a redirect to the sign-in page, anything else becomes a [`Reply`].

pub mod envelope;

use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::config::ApiConfig;
use crate::outcome::Outcome;
use crate::routes;
use crate::session::SessionStore;

pub use self::envelope::{ApiFailure, BackendEnvelope, Envelope, Reply};

/// Envelope code the backend uses for a missing or expired token.
pub const UNAUTHORIZED_CODE: i64 = 401;
const OK_CODE: i64 = 200;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    log_requests: bool,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            log_requests: config.enable_request_logging,
        })
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, session: &SessionStore) -> Outcome<Reply<T>> {
        self.request::<T, ()>(Method::GET, path, None, session).await
    }

    /// GET with `query` encoded as the query string.
    pub async fn get_with<T, Q>(&self, path: &str, query: &Q, session: &SessionStore) -> Outcome<Reply<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.request(Method::GET, path, Some(query), session).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B, session: &SessionStore) -> Outcome<Reply<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body), session).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str, session: &SessionStore) -> Outcome<Reply<T>> {
        self.request::<T, ()>(Method::POST, path, None, session).await
    }

    /// Performs one call. GET data goes to the query string, anything else is
    /// sent as a JSON body.
    pub async fn request<T, D>(
        &self,
        method: Method,
        path: &str,
        data: Option<&D>,
        session: &SessionStore,
    ) -> Outcome<Reply<T>>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let url = self.url(path);
        if self.log_requests {
            tracing::debug!("Backend request: {} {}", method, url);
        }

        let is_get = method == Method::GET;
        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-store");

        if let Some(token) = session.token() {
            builder = builder.bearer_auth(token);
        }

        if let Some(data) = data {
            builder = if is_get { builder.query(data) } else { builder.json(data) };
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Backend request {} {} failed: {}", method, url, e);
                return Outcome::Continue(Err(ApiFailure::server_error()));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!("Backend request {} {} returned HTTP {}", method, url, status);
            return Outcome::Continue(Err(ApiFailure::server_error()));
        }

        match response.json::<BackendEnvelope>().await {
            Ok(envelope) => classify(envelope),
            Err(e) => {
                tracing::error!("Backend response from {} {} is not an envelope: {}", method, url, e);
                Outcome::Continue(Err(ApiFailure::server_error()))
            }
        }
    }
}

/// Maps a decoded backend envelope onto navigation and reply.
pub fn classify<T: DeserializeOwned>(envelope: BackendEnvelope) -> Outcome<Reply<T>> {
    match envelope.code {
        UNAUTHORIZED_CODE => {
            tracing::warn!("Backend rejected the session token, redirecting to sign-in");
            Outcome::redirect(routes::SIGN_OUT_ROUTE)
        }
        OK_CODE => match serde_json::from_value::<T>(envelope.data) {
            Ok(data) => Outcome::Continue(Ok(data)),
            Err(e) => {
                tracing::error!("Backend payload has an unexpected shape: {}", e);
                Outcome::Continue(Err(ApiFailure::server_error()))
            }
        },
        code => {
            let message = envelope.message.unwrap_or_default();
            tracing::warn!("Backend returned application error {}: {}", code, message);
            Outcome::Continue(Err(ApiFailure::new(code, message)))
        }
    }
}
