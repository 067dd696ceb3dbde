use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Env var overriding `[rest].url`.
pub const ENV_REST_URL: &str = "WINKS_REST_URL";
/// Env var overriding `[rest].anon_key`.
pub const ENV_REST_ANON_KEY: &str = "WINKS_REST_ANON_KEY";

/// Where links are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Local SQLite file (default).
    #[default]
    Sqlite,
    /// In-memory demo data; nothing is persisted.
    Memory,
    /// Hosted PostgREST table (e.g. Supabase).
    Rest,
}

/// Hosted table settings (optional section in config.toml).
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RestConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: Option<String>,
    /// Anonymous API key sent as `apikey` and bearer token.
    #[serde(default)]
    pub anon_key: Option<String>,
    /// Table name. Defaults to `links`.
    #[serde(default)]
    pub table: Option<String>,
}

/// Resolved hosted-table endpoint with every field present.
#[derive(Clone, PartialEq, Eq)]
pub struct RestEndpoint {
    pub url: String,
    pub anon_key: String,
    pub table: String,
}

/// Global configuration loaded from `~/.config/winks/config.toml`.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct WinksConfig {
    /// Storage backend: "sqlite" (default), "memory", or "rest".
    #[serde(default)]
    pub backend: StoreBackend,
    /// SQLite file; defaults to `~/.local/state/winks/links.db`.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// SHA-256 hex of the confirmation PIN (see `winks pin-hash`). None = no PIN.
    #[serde(default)]
    pub pin_sha256: Option<String>,
    #[serde(default)]
    pub rest: Option<RestConfig>,
}

impl WinksConfig {
    /// Hosted endpoint from config, with env vars taking precedence.
    pub fn rest_endpoint(&self) -> Result<RestEndpoint> {
        self.rest_endpoint_with(|key| std::env::var(key).ok())
    }

    fn rest_endpoint_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<RestEndpoint> {
        let section = self.rest.clone().unwrap_or_default();
        let non_empty = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let url = non_empty(env(ENV_REST_URL)).or_else(|| non_empty(section.url));
        let anon_key = non_empty(env(ENV_REST_ANON_KEY)).or_else(|| non_empty(section.anon_key));
        let (Some(url), Some(anon_key)) = (url, anon_key) else {
            anyhow::bail!(
                "missing hosted store settings: set {} and {} (or [rest] url / anon_key in config.toml)",
                ENV_REST_URL,
                ENV_REST_ANON_KEY
            );
        };
        let table = non_empty(section.table).unwrap_or_else(|| "links".to_string());

        Ok(RestEndpoint {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            table,
        })
    }
}

// Secrets (API key, PIN digest) never reach Debug output or the log file.
const REDACTED: &str = "<redacted>";

fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| REDACTED)
}

impl fmt::Debug for RestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestConfig")
            .field("url", &self.url)
            .field("anon_key", &redact(&self.anon_key))
            .field("table", &self.table)
            .finish()
    }
}

impl fmt::Debug for RestEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestEndpoint")
            .field("url", &self.url)
            .field("anon_key", &REDACTED)
            .field("table", &self.table)
            .finish()
    }
}

impl fmt::Debug for WinksConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WinksConfig")
            .field("backend", &self.backend)
            .field("database_path", &self.database_path)
            .field("pin_sha256", &redact(&self.pin_sha256))
            .field("rest", &self.rest)
            .finish()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("winks")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WinksConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WinksConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: WinksConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
