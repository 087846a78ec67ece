//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.recipe-search/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RecipeSearchConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub query: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://www.recipepuppy.com/api/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("recipe-search/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Query to pre-fill and search for at startup.
    pub initial_query: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.recipe-search/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".recipe-search").join("config.toml"))
}

/// Load config from `~/.recipe-search/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RecipeSearchConfig::default()`.
pub fn load_config() -> Result<RecipeSearchConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(RecipeSearchConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<RecipeSearchConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(RecipeSearchConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RecipeSearchConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# recipe-search configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://www.recipepuppy.com/api/"   # Or set RECIPE_API_BASE_URL
# timeout_secs = 30                               # Or set RECIPE_API_TIMEOUT_SECS
# user_agent = "recipe-search/0.1.0"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &RecipeSearchConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with(
    config: &RecipeSearchConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("RECIPE_API_BASE_URL"))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let env_timeout = env("RECIPE_API_TIMEOUT_SECS").and_then(|raw| match raw.trim().parse() {
        Ok(secs) => Some(secs),
        Err(_) => {
            warn!("Ignoring RECIPE_API_TIMEOUT_SECS={raw:?}: not a number of seconds");
            None
        }
    });

    // Timeout: CLI → env → config → default
    let timeout_secs = cli
        .timeout_secs
        .or(env_timeout)
        .or(config.api.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let user_agent = config
        .api
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    ResolvedConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
        user_agent,
        initial_query: cli.query.clone(),
    }
}
