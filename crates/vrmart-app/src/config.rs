//! Application configuration.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vrmart_ledger::{LedgerEnvironment, DEFAULT_CANISTER_ID, DEFAULT_IDENTITY_CANISTER_ID};

/// Default config file location.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Upload size limit: 50 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Model formats the storefront accepts.
pub const DEFAULT_ACCEPTED_EXTENSIONS: [&str; 5] = [".gltf", ".glb", ".fbx", ".obj", ".gmpf"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ledger deployment (`local` or `production`).
    #[serde(default)]
    pub environment: LedgerEnvironment,

    /// Asset ledger canister.
    #[serde(default = "default_canister_id")]
    pub canister_id: String,

    /// Identity provider canister (local replicas only).
    #[serde(default = "default_identity_canister_id")]
    pub identity_canister_id: String,

    /// Ledger host override. Defaults to the environment's host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Where the identity session is persisted.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_canister_id() -> String {
    DEFAULT_CANISTER_ID.to_string()
}

fn default_identity_canister_id() -> String {
    DEFAULT_IDENTITY_CANISTER_ID.to_string()
}

fn default_session_file() -> PathBuf {
    PathBuf::from(".vrmart/session.json")
}

/// Upload validation limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,
    /// Lowercase extensions including the leading dot.
    #[serde(default = "default_accepted_extensions")]
    pub accepted_extensions: Vec<String>,
}

fn default_max_size_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_accepted_extensions() -> Vec<String> {
    DEFAULT_ACCEPTED_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_size_bytes(),
            accepted_extensions: default_accepted_extensions(),
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info,vrmart=debug".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: LedgerEnvironment::default(),
            canister_id: default_canister_id(),
            identity_canister_id: default_identity_canister_id(),
            host: None,
            session_file: default_session_file(),
            upload: UploadConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `VRMART_CONFIG` or the default path.
    ///
    /// Falls back to defaults when the file does not exist.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("VRMART_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Load from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        Self::from_toml(&content)
    }

    /// Parse from TOML text.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply `VRMART_ENV=production`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if LedgerEnvironment::from_env().is_production() {
            self.environment = LedgerEnvironment::Production;
        }
        self
    }

    /// Ledger host: the override if set, else the environment's.
    pub fn ledger_host(&self) -> &str {
        self.host
            .as_deref()
            .unwrap_or_else(|| self.environment.host())
    }

    /// Login URL for the configured environment.
    pub fn identity_provider_url(&self) -> String {
        self.environment
            .identity_provider_url(&self.identity_canister_id)
    }
}
