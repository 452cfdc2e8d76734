use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

/// Backend base URL used when `BASE_API_URL` is not set.
pub const DEFAULT_BASE_API_URL: &str = "http://127.0.0.1:10086/api/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Outbound calls to the backend REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// `None` leaves the request lifetime to reqwest's defaults.
    pub timeout_secs: Option<u64>,
    pub enable_request_logging: bool,
}

/// Cookie flags and token lifetimes for the browser session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub secure: bool,
    pub cookie_path: String,
    /// How long before the backend-issued expiry the access cookie is dropped.
    pub token_refresh_margin_ms: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure: true,
            cookie_path: "/".to_string(),
            token_refresh_margin_ms: 60 * 1000,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("MMS_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("MMS_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // API overrides
        if let Ok(v) = env::var("BASE_API_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = v.trim().trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = env::var("API_TIMEOUT_SECS") {
            self.api.timeout_secs = v.parse::<u64>().ok().filter(|secs| *secs > 0);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_SECURE") {
            self.session.secure = v.parse().unwrap_or(self.session.secure);
        }
        if let Ok(v) = env::var("SESSION_TOKEN_MARGIN_MS") {
            self.session.token_refresh_margin_ms = v.parse().unwrap_or(self.session.token_refresh_margin_ms);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            api: ApiConfig {
                base_url: DEFAULT_BASE_API_URL.to_string(),
                timeout_secs: None,
                enable_request_logging: true,
            },
            session: SessionConfig::default(),
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            api: ApiConfig {
                base_url: DEFAULT_BASE_API_URL.to_string(),
                timeout_secs: Some(30),
                enable_request_logging: true,
            },
            session: SessionConfig::default(),
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            api: ApiConfig {
                base_url: DEFAULT_BASE_API_URL.to_string(),
                timeout_secs: Some(15),
                enable_request_logging: false,
            },
            session: SessionConfig::default(),
            security: SecurityConfig {
                enable_cors: false,
                cors_origins: Vec::new(),
            },
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.base_url, "http://127.0.0.1:10086/api/v1");
        assert!(config.session.secure);
        assert_eq!(config.session.token_refresh_margin_ms, 60_000);
        assert!(config.api.timeout_secs.is_none());
    }

    #[test]
    fn test_default_staging_config() {
        let config = AppConfig::staging();
        assert_eq!(config.api.timeout_secs, Some(30));
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.security.enable_cors);
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }
}
