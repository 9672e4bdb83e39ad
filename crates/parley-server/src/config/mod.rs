use serde::Serialize;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub db_path: String,
    pub max_body_bytes: usize,
    /// Window of messages embedded in a single-chat fetch.
    pub recent_messages_limit: usize,
    #[serde(skip)]
    pub shutdown_drain: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            db_path: "parley.db".to_string(),
            max_body_bytes: 16 * 1024,
            recent_messages_limit: 50,
            shutdown_drain: Duration::from_secs(5),
            cors_allowed_origins: Vec::new(),
        }
    }
}

pub fn validate_startup_config(api: &ApiConfig) -> Result<(), String> {
    if api.db_path.trim().is_empty() {
        return Err("db path must not be empty".to_string());
    }
    if api.max_body_bytes == 0 {
        return Err("max body bytes must be > 0".to_string());
    }
    if api.recent_messages_limit == 0 {
        return Err("recent messages limit must be > 0".to_string());
    }
    if api.bind_addr.parse::<std::net::SocketAddr>().is_err() {
        return Err(format!("invalid bind addr: {}", api.bind_addr));
    }
    Ok(())
}
