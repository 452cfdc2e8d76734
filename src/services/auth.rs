use async_trait::async_trait;
use serde_json::Value;

use crate::client::{ApiClient, Reply};
use crate::outcome::Outcome;
use crate::session::SessionStore;
use crate::types::{AuthResponse, UpdateUserInfoPayload, UserInfo, UserTeamItem};
use crate::validation::{AccountDirectory, LoginForm, RegisterForm};

/// Which account attribute `/auth/check` looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKey {
    Email,
    Username,
}

impl CheckKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKey::Email => "email",
            CheckKey::Username => "username",
        }
    }
}

/// `/auth/*` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    client: &'a ApiClient,
    session: &'a SessionStore,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a ApiClient, session: &'a SessionStore) -> Self {
        Self { client, session }
    }

    pub async fn register(&self, form: &RegisterForm) -> Outcome<Reply<AuthResponse>> {
        self.client.post("/auth/register", form, self.session).await
    }

    pub async fn login(&self, form: &LoginForm) -> Outcome<Reply<AuthResponse>> {
        self.client.post("/auth/login", form, self.session).await
    }

    pub async fn logout(&self) -> Outcome<Reply<Value>> {
        self.client.post_empty("/auth/logout", self.session).await
    }

    /// `GET /auth/check?{key}={value}`, true when the value is taken.
    pub async fn check(&self, key: CheckKey, value: &str) -> Outcome<Reply<bool>> {
        self.client
            .get_with("/auth/check", &[(key.as_str(), value)], self.session)
            .await
    }

    pub async fn check_email_exists(&self, email: &str) -> Outcome<Reply<bool>> {
        self.check(CheckKey::Email, email).await
    }

    pub async fn check_username_exists(&self, username: &str) -> Outcome<Reply<bool>> {
        self.check(CheckKey::Username, username).await
    }

    pub async fn user_info(&self) -> Outcome<Reply<UserInfo>> {
        self.client.get("/auth/info", self.session).await
    }

    pub async fn teams_by_user(&self) -> Outcome<Reply<Vec<UserTeamItem>>> {
        self.client.get("/auth/teams", self.session).await
    }

    pub async fn update_user_info(&self, payload: &UpdateUserInfoPayload) -> Outcome<Reply<Value>> {
        self.client.post("/auth/update-info", payload, self.session).await
    }

    pub async fn reset_token(&self) -> Outcome<Reply<AuthResponse>> {
        self.client.get("/auth/reset-token", self.session).await
    }

    async fn exists(&self, key: CheckKey, value: &str) -> Option<bool> {
        match self.check(key, value).await {
            Outcome::Continue(Ok(exists)) => Some(exists),
            Outcome::Continue(Err(failure)) => {
                tracing::warn!("Could not check {} existence: {}", key.as_str(), failure);
                None
            }
            Outcome::Redirect(_) => None,
        }
    }
}

#[async_trait]
impl<'a> AccountDirectory for AuthService<'a> {
    async fn email_exists(&self, email: &str) -> Option<bool> {
        self.exists(CheckKey::Email, email).await
    }

    async fn username_exists(&self, username: &str) -> Option<bool> {
        self.exists(CheckKey::Username, username).await
    }
}
