pub mod actions;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod menu;
pub mod outcome;
pub mod response;
pub mod routes;
pub mod services;
pub mod session;
pub mod types;
pub mod validation;

pub use app::app;

use crate::client::ApiClient;
use crate::config::AppConfig;

/// Process-wide state shared by every request: immutable config and the
/// backend client's connection pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub client: ApiClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let client = ApiClient::new(&config.api)?;
        Ok(Self { config, client })
    }
}
