use clap::Parser;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "mms-web")]
#[command(about = "MMS web front end - session, route guard and page models over the backend API")]
#[command(version)]
pub struct Cli {
    #[arg(long, env = "MMS_PORT", help = "Port to listen on")]
    pub port: Option<u16>,

    #[arg(long, help = "Address to bind")]
    pub host: Option<String>,

    #[arg(long, env = "BASE_API_URL", help = "Backend REST API base URL")]
    pub base_api_url: Option<String>,

    #[arg(long, help = "Send session cookies without the Secure flag (plain-http development)")]
    pub insecure_cookies: bool,
}

impl Cli {
    /// Flags win over environment-derived config.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(url) = &self.base_api_url {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }
        if self.insecure_cookies {
            config.session.secure = false;
        }
        config
    }
}
