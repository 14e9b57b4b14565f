// Runtime configuration shared by every layer

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    /// Snapshot file of the local store. `None` keeps data in memory only.
    pub store_path: Option<String>,
    pub session_path: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub scan_interval_ms: u64,
    pub scan_timeout_seconds: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            store_path: None,
            session_path: "./session.toml".to_string(),
            max_body_bytes: 4 * 1024 * 1024,
            request_timeout_seconds: 15,
            scan_interval_ms: 300,
            scan_timeout_seconds: None,
        }
    }
}
