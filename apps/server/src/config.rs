use std::{net::SocketAddr, str::FromStr, time::Duration};

use goalwise_ai::goal_parser::DEFAULT_MODEL as DEFAULT_AI_MODEL;
use goalwise_core::constants::{DEFAULT_RECENT_HISTORY_LIMIT, MAX_RECENT_HISTORY_LIMIT};

const DEFAULT_DB_PATH: &str = "./db/app.db";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub ai_api_key: Option<String>,
    pub ai_base_url: Option<String>,
    pub ai_model: String,
    pub recent_history_limit: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: DEFAULT_DB_PATH.to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            ai_api_key: None,
            ai_base_url: None,
            ai_model: DEFAULT_AI_MODEL.to_string(),
            recent_history_limit: DEFAULT_RECENT_HISTORY_LIMIT,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads and parses `key`, keeping `default` when it is unset or invalid.
fn parsed_var<T: FromStr>(key: &str, default: T) -> T {
    match non_empty_var(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using the default", key, raw);
            default
        }),
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let listen_addr = parsed_var("GW_LISTEN_ADDR", defaults.listen_addr);
        let db_path = non_empty_var("GW_DB_PATH").unwrap_or(defaults.db_path);
        let cors_allow: Vec<String> = non_empty_var("GW_CORS_ALLOW_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_allow);
        let timeout_ms: u64 = parsed_var("GW_REQUEST_TIMEOUT_MS", DEFAULT_TIMEOUT_MS);
        let mut recent_history_limit: i64 =
            parsed_var("GW_RECENT_HISTORY_LIMIT", DEFAULT_RECENT_HISTORY_LIMIT);
        if !(1..=MAX_RECENT_HISTORY_LIMIT).contains(&recent_history_limit) {
            tracing::warn!(
                "GW_RECENT_HISTORY_LIMIT={} is outside 1..={}, using {}",
                recent_history_limit,
                MAX_RECENT_HISTORY_LIMIT,
                DEFAULT_RECENT_HISTORY_LIMIT
            );
            recent_history_limit = DEFAULT_RECENT_HISTORY_LIMIT;
        }

        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            ai_api_key: non_empty_var("GW_AI_API_KEY"),
            ai_base_url: non_empty_var("GW_AI_BASE_URL"),
            ai_model: non_empty_var("GW_AI_MODEL").unwrap_or(defaults.ai_model),
            recent_history_limit,
        }
    }
}
