use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Where the durable snapshot lives.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Override for the storage directory.
    ///
    /// Defaults to the platform data dir (e.g. `~/.local/share/memehub`).
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the effective storage directory.
    ///
    /// Falls back to the current directory if the platform data dir is
    /// unavailable.
    pub fn resolve_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("memehub"),
        }
    }
}

/// Remote endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Content-listing endpoint (read-only, no request body).
    #[serde(default = "default_content_url")]
    pub content_url: String,
    /// Template-listing endpoint used to seed caption suggestions.
    #[serde(default = "default_template_url")]
    pub template_url: String,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

fn default_content_url() -> String {
    "https://api.imgflip.com/get_memes".to_string()
}

fn default_template_url() -> String {
    "https://api.memegen.link/templates".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            content_url: default_content_url(),
            template_url: default_template_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}
