use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use checkin_domain::RuntimeConfig;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    /// Empty keeps the store in memory.
    pub store_path: String,
    pub session_path: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub scan_interval_ms: u64,
    /// 0 disables the decode timeout.
    pub scan_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            store_path: "./data/checkin-store.json".to_string(),
            session_path: "./data/session.toml".to_string(),
            max_body_bytes: 4 * 1024 * 1024,
            request_timeout_seconds: 15,
            scan_interval_ms: 300,
            scan_timeout_seconds: 0,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("CHECKIN_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(&path).await
    }

    pub async fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let file_path = path.as_ref();
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str::<AppConfig>(&content)?
        } else {
            warn!(path = %file_path.display(), "config file not found, using defaults");
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        self.store_path = self.store_path.trim().to_string();
        self.session_path = self.session_path.trim().to_string();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.store_path = resolve_path(base, &self.store_path);
        self.session_path = resolve_path(base, &self.session_path);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.session_path.is_empty() {
            return Err(anyhow!("session_path must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.scan_interval_ms == 0 {
            return Err(anyhow!("scan_interval_ms must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            store_path: (!self.store_path.is_empty()).then(|| self.store_path.clone()),
            session_path: self.session_path.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            scan_interval_ms: self.scan_interval_ms,
            scan_timeout_seconds: (self.scan_timeout_seconds > 0).then_some(self.scan_timeout_seconds),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("CHECKIN_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("CHECKIN_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("CHECKIN_STORE_PATH") {
            self.store_path = value;
        }
        if let Ok(value) = env::var("CHECKIN_SESSION_PATH") {
            self.session_path = value;
        }
        if let Ok(value) = env::var("CHECKIN_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("CHECKIN_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("CHECKIN_SCAN_INTERVAL_MS") {
            self.scan_interval_ms = value.parse().unwrap_or(self.scan_interval_ms);
        }
        if let Ok(value) = env::var("CHECKIN_SCAN_TIMEOUT_SECONDS") {
            self.scan_timeout_seconds = value.parse().unwrap_or(self.scan_timeout_seconds);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
