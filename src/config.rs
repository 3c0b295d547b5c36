use std::net::SocketAddr;
use std::time::Duration;

/// Runtime configuration, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// API key the session service signs webhook tokens as (`iss` claim)
    pub api_key: String,
    /// Shared secret the webhook tokens are signed with
    pub api_secret: String,
    pub poll_interval: Duration,
    pub max_wait: Duration,
    /// When set, room state lives in Postgres; otherwise in process memory
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let api_key = std::env::var("WEBHOOK_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("WEBHOOK_API_KEY not set, using dev default");
            "devkey".to_string()
        });

        let api_secret = std::env::var("WEBHOOK_API_SECRET").unwrap_or_else(|_| {
            tracing::warn!("WEBHOOK_API_SECRET not set, using dev default");
            "dev-webhook-secret".to_string()
        });

        let poll_interval = Duration::from_secs(env_u64("ROOM_POLL_INTERVAL_SECS", 1));
        let max_wait = Duration::from_secs(env_u64("ROOM_WAIT_TIMEOUT_SECS", 3000));

        let database_url = std::env::var("DATABASE_URL").ok();

        Self {
            bind_addr,
            api_key,
            api_secret,
            poll_interval,
            max_wait,
            database_url,
        }
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
