//! Cookie construction with the session's default flags.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

use crate::config::SessionConfig;

/// Per-write cookie flags. `Default` gives `HttpOnly; Secure; SameSite=Lax; Path=/`
/// with no expiry (browser-session cookie).
#[derive(Debug, Clone, PartialEq)]
pub struct CookieOptions {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    pub expires: Option<DateTime<Utc>>,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            http_only: true,
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            expires: None,
        }
    }
}

impl CookieOptions {
    /// Defaults adjusted by deployment config.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            secure: config.secure,
            path: config.cookie_path.clone(),
            ..Self::default()
        }
    }

    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires = Some(at);
        self
    }

    pub(crate) fn build(&self, name: &str, value: String) -> Cookie<'static> {
        let mut builder = Cookie::build((name.to_string(), value))
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(self.same_site)
            .path(self.path.clone());

        if let Some(at) = self.expires {
            builder = builder.expires(to_offset(at));
        }

        builder.build()
    }

    /// Cookie used to delete `name`; path must match the one it was set with.
    pub(crate) fn removal(&self, name: &str) -> Cookie<'static> {
        Cookie::build((name.to_string(), String::new()))
            .path(self.path.clone())
            .build()
    }
}

fn to_offset(at: DateTime<Utc>) -> OffsetDateTime {
    let nanos = i128::from(at.timestamp_millis()) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
