//! Configuration loading and config file resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "METGAL_CONFIG";

pub const DEFAULT_COLLECTION_BASE_URL: &str =
    "https://collectionapi.metmuseum.org/public/collection/v1";
pub const DEFAULT_TRANSLATE_BASE_URL: &str = "https://translate.googleapis.com";

/// Gallery service configuration
///
/// Every field has a compiled default, so an empty or partial TOML file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Interface the HTTP server binds to
    pub host: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Base URL of the Met collection API (no trailing slash)
    pub collection_base_url: String,
    /// Base URL of the translation endpoint
    pub translate_base_url: String,
    pub source_lang: String,
    pub target_lang: String,
    /// When false, fields are shown untranslated
    pub translation_enabled: bool,
    /// Page size when the request carries no usable `limit`
    pub default_page_size: usize,
    /// Upper bound on `limit`, which also bounds per-request fan-out
    pub max_page_size: usize,
    /// Page size used by the "more images" detail view
    pub detail_page_size: usize,
    /// Timeout applied to every outbound HTTP call
    pub request_timeout_secs: u64,
    /// Optional cap on concurrent object fetches within one page
    pub max_concurrent_fetches: Option<usize>,
    /// Name of the session cookie
    pub session_cookie: String,
    /// Sessions idle for longer than this are discarded
    pub session_idle_secs: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            collection_base_url: DEFAULT_COLLECTION_BASE_URL.to_string(),
            translate_base_url: DEFAULT_TRANSLATE_BASE_URL.to_string(),
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            translation_enabled: true,
            default_page_size: 20,
            max_page_size: 100,
            detail_page_size: 10,
            request_timeout_secs: 15,
            max_concurrent_fetches: None,
            session_cookie: "metgal.sid".to_string(),
            session_idle_secs: 86_400,
        }
    }
}

impl GalleryConfig {
    /// Load configuration from `path`, or compiled defaults when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                let content = std::fs::read_to_string(path)?;
                Self::from_toml_str(&content)?
            }
            None => {
                info!("No config file found, using compiled defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reject settings the gallery cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 || self.max_page_size == 0 || self.detail_page_size == 0 {
            return Err(Error::Config("page sizes must be at least 1".to_string()));
        }
        if self.default_page_size > self.max_page_size {
            return Err(Error::Config(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        if self.max_concurrent_fetches == Some(0) {
            return Err(Error::Config(
                "max_concurrent_fetches must be at least 1 when set".to_string(),
            ));
        }
        if self.source_lang.trim().is_empty() || self.target_lang.trim().is_empty() {
            return Err(Error::Config("language codes must not be empty".to_string()));
        }
        if self.session_cookie.trim().is_empty() {
            return Err(Error::Config("session_cookie must not be empty".to_string()));
        }
        Ok(())
    }

    /// `host:port` string for binding the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Config file resolution following this priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. Platform config file, if one exists
/// 4. None (compiled defaults)
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
        warn!("{} is set but empty, ignoring", CONFIG_ENV_VAR);
    }

    // Priority 3: platform config file
    default_config_candidates()
        .into_iter()
        .find(|candidate| candidate.exists())
}

/// Platform config file locations, most specific first
fn default_config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("metgal").join("config.toml"));
    }
    if cfg!(target_os = "linux") {
        candidates.push(PathBuf::from("/etc/metgal/config.toml"));
    }

    candidates
}
