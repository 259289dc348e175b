use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_DB_DIR: &str = "/db";
pub const DEFAULT_MAX_RETRIES: u32 = 30;
pub const DEFAULT_RETRY_INTERVAL_SECS: u64 = 2;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 2;
pub const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
    pub db_dir: PathBuf,
    pub max_retries: u32,
    pub retry_interval: Duration,
    pub request_timeout: Duration,
    pub log_level: String,
    /// Also write logs to `log_dir/bootstrap.log`.
    pub enable_file_logs: bool,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_string = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let env_u64 = |key: &str, default: u64| {
            env_string(key)
                .and_then(|value| value.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let api_url = env_string("API_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let db_dir = env_string("DB_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_DIR));

        let max_retries = env_string("MAX_RETRIES")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_RETRIES);

        let retry_interval_secs = env_u64("RETRY_INTERVAL", DEFAULT_RETRY_INTERVAL_SECS);
        let request_timeout_secs = env_u64("REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS);

        let log_level = env_string("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let enable_file_logs = matches!(
            env_string("ENABLE_FILE_LOGS").as_deref().map(str::trim),
            Some("true") | Some("1")
        );
        let log_dir = env_string("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Self {
            api_url,
            db_dir,
            max_retries,
            retry_interval: Duration::from_secs(retry_interval_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            log_level,
            enable_file_logs,
            log_dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
