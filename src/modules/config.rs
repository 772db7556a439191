use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const CONFIG_FILE: &str = "config.json";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listen port for the bridge itself.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow LAN access.
    /// - false: bind 127.0.0.1 only (default, privacy first)
    /// - true: bind 0.0.0.0
    #[serde(default)]
    pub allow_lan_access: bool,

    /// Directory the static front-end is served from.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Timeout (seconds) for calls to the LCU API, so a stalled client
    /// cannot hang the bridge indefinitely.
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout_secs: u64,

    /// Extra lockfile locations checked before the default install paths.
    #[serde(default)]
    pub lockfile_paths: Vec<PathBuf>,
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_upstream_timeout() -> u64 {
    15
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allow_lan_access: false,
            static_dir: default_static_dir(),
            upstream_timeout_secs: default_upstream_timeout(),
            lockfile_paths: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn bind_address(&self) -> &str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        }
    }
}

pub fn get_data_dir() -> Result<PathBuf, String> {
    let base = dirs::data_dir().ok_or("Could not determine platform data directory")?;
    let dir = base.join("lcu-bridge");
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create data directory: {}", e))?;
    }
    Ok(dir)
}

/// Load application config from the data dir; a missing file yields defaults.
pub fn load_app_config() -> Result<AppConfig, String> {
    let config_path = get_data_dir()?.join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read config file: {}", e))?;

    serde_json::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
}

/// Apply environment overrides on top of the loaded config.
pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(port) = std::env::var("LCU_BRIDGE_PORT").or_else(|_| std::env::var("PORT")) {
        match port.trim().parse::<u16>() {
            Ok(parsed) => {
                info!("Using listen port from environment: {}", parsed);
                config.port = parsed;
            }
            Err(_) => warn!("Ignoring invalid port value: {}", port),
        }
    }

    if let Ok(dir) = std::env::var("LCU_BRIDGE_STATIC_DIR") {
        if !dir.trim().is_empty() {
            info!("Using static directory from environment: {}", dir);
            config.static_dir = PathBuf::from(dir);
        }
    }

    if let Ok(path) = std::env::var("LCU_BRIDGE_LOCKFILE") {
        if !path.trim().is_empty() {
            info!("Using lockfile path from environment: {}", path);
            config.lockfile_paths.insert(0, PathBuf::from(path));
        }
    }

    if let Ok(lan) = std::env::var("LCU_BRIDGE_ALLOW_LAN") {
        match parse_env_bool(&lan) {
            Some(parsed) => config.allow_lan_access = parsed,
            None => warn!("Ignoring invalid LAN access value: {}", lan),
        }
    }
}

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
