//! Cookie-backed session store.
//!
//! Values are stored as JSON in individual cookies. The store wraps the
//! request's `CookieJar`; writes are accumulated in the jar and reach the
//! browser when the jar is returned as part of the response.

pub mod cookie;

use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::SessionConfig;
use crate::types::{AuthResponse, UserInfo, UserTeamItem};

pub use self::cookie::CookieOptions;

pub const TOKEN_SESSION_KEY: &str = "token";
pub const REFRESH_TOKEN_SESSION_KEY: &str = "refresh_token";
pub const USER_INFO_SESSION_KEY: &str = "user_info";
pub const USER_TEAMS_SESSION_KEY: &str = "user_teams";
pub const SELECTED_TEAM_SESSION_KEY: &str = "selected_team";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid session key")]
    InvalidKey,

    #[error("Failed to encode session value '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode session value '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Token lifetime of {expire} ms is out of range")]
    ExpiryOutOfRange { expire: i64 },
}

/// Typed access to the session cookies of one request/response pair.
#[derive(Debug, Clone)]
pub struct SessionStore {
    jar: CookieJar,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(jar: CookieJar, config: SessionConfig) -> Self {
        Self { jar, config }
    }

    /// Jar carrying every pending write, to be attached to the response.
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    /// Default flags for this deployment.
    pub fn options(&self) -> CookieOptions {
        CookieOptions::from_config(&self.config)
    }

    pub fn set<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
        options: &CookieOptions,
    ) -> Result<(), SessionError> {
        validate_key(key)?;
        let encoded = serde_json::to_string(value).map_err(|source| SessionError::Encode {
            key: key.to_string(),
            source,
        })?;
        let cookie = options.build(key, encoded);
        self.update(|jar| jar.add(cookie));
        Ok(())
    }

    /// Reads `key`. Values that are not valid JSON are handed to `T` as a raw
    /// string, so plain-text cookies still read back as `String`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SessionError> {
        validate_key(key)?;
        let Some(cookie) = self.jar.get(key) else {
            return Ok(None);
        };

        let raw = cookie.value();
        match serde_json::from_str::<T>(raw) {
            Ok(value) => Ok(Some(value)),
            Err(_) => serde_json::from_value::<T>(Value::String(raw.to_string()))
                .map(Some)
                .map_err(|source| SessionError::Decode {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.jar.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        validate_key(key)?;
        if self.contains(key) {
            let removal = self.options().removal(key);
            self.update(|jar| jar.remove(removal));
        }
        Ok(())
    }

    /// Removes every cookie visible to this request, not only the known keys.
    pub fn clear(&mut self) {
        let names: Vec<String> = self.jar.iter().map(|c| c.name().to_string()).collect();
        let options = self.options();
        for name in names {
            let removal = options.removal(&name);
            self.update(|jar| jar.remove(removal));
        }
    }

    // -- typed accessors --

    /// Persists both tokens. The access cookie expires `token_refresh_margin_ms`
    /// before the backend expiry so a refresh can happen while the refresh
    /// cookie is still alive.
    pub fn set_token(&mut self, auth: &AuthResponse, now: DateTime<Utc>) -> Result<(), SessionError> {
        let out_of_range = || SessionError::ExpiryOutOfRange { expire: auth.expire };
        let refresh_at = Duration::try_milliseconds(auth.expire)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(out_of_range)?;
        let access_at = Duration::try_milliseconds(self.config.token_refresh_margin_ms)
            .and_then(|margin| refresh_at.checked_sub_signed(margin))
            .ok_or_else(out_of_range)?;

        let refresh = auth.refresh.as_deref().unwrap_or(&auth.token);
        let access_options = self.options().expires_at(access_at);
        let refresh_options = self.options().expires_at(refresh_at);
        self.set(TOKEN_SESSION_KEY, &auth.token, &access_options)?;
        self.set(REFRESH_TOKEN_SESSION_KEY, refresh, &refresh_options)?;
        Ok(())
    }

    /// Best available credential: the access token, else the refresh token.
    pub fn token(&self) -> Option<String> {
        self.lenient::<String>(TOKEN_SESSION_KEY)
            .filter(|t| !t.is_empty())
            .or_else(|| self.refresh_token())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.lenient::<String>(REFRESH_TOKEN_SESSION_KEY)
            .filter(|t| !t.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn user_info(&self) -> Option<UserInfo> {
        self.lenient(USER_INFO_SESSION_KEY)
    }

    pub fn set_user_info(&mut self, info: &UserInfo) -> Result<(), SessionError> {
        let options = self.options();
        self.set(USER_INFO_SESSION_KEY, info, &options)
    }

    pub fn user_teams(&self) -> Option<Vec<UserTeamItem>> {
        self.lenient(USER_TEAMS_SESSION_KEY)
    }

    pub fn set_user_teams(&mut self, teams: &[UserTeamItem]) -> Result<(), SessionError> {
        let options = self.options();
        self.set(USER_TEAMS_SESSION_KEY, teams, &options)
    }

    pub fn selected_team(&self) -> Option<UserTeamItem> {
        self.lenient(SELECTED_TEAM_SESSION_KEY)
    }

    pub fn set_selected_team(&mut self, team: &UserTeamItem) -> Result<(), SessionError> {
        let options = self.options();
        self.set(SELECTED_TEAM_SESSION_KEY, team, &options)
    }

    /// A cookie that fails to decode is treated as absent.
    fn lenient<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.get::<T>(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session cookie: {}", e);
                None
            }
        }
    }

    fn update(&mut self, f: impl FnOnce(CookieJar) -> CookieJar) {
        let jar = std::mem::replace(&mut self.jar, CookieJar::new());
        self.jar = f(jar);
    }
}

fn validate_key(key: &str) -> Result<(), SessionError> {
    if key.trim().is_empty() {
        return Err(SessionError::InvalidKey);
    }
    Ok(())
}
