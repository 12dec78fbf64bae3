//! # Configuration
//!
//! Layered settings for the CLI. Later sources win:
//!
//! 1. built-in defaults
//! 2. TOML file (`--config`, else `YADA_CONFIG`, else `./yada.toml` if present)
//! 3. environment (`YADA_DATABASE`, `YADA_LOG_FORMAT`)
//! 4. command-line flags (`-D/--database`)
//!
//! ## Example Configuration
//!
//! ```toml
//! database = "/home/me/.local/share/yada/foods.txt"
//! log_format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use yada_core::YadaError;
use yada_core::primitives::DEFAULT_DATABASE_FILE;

// =============================================================================
// ENVIRONMENT KEYS
// =============================================================================

/// Path to a TOML config file.
pub const CONFIG_ENV: &str = "YADA_CONFIG";

/// Path to the food database.
pub const DATABASE_ENV: &str = "YADA_DATABASE";

/// Log output format: `text` or `json`.
pub const LOG_FORMAT_ENV: &str = "YADA_LOG_FORMAT";

/// Config file picked up from the working directory when no other is named.
pub const DEFAULT_CONFIG_FILE: &str = "yada.toml";

// =============================================================================
// LOG FORMAT
// =============================================================================

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = YadaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(YadaError::Parse(format!(
                "unknown log format '{}' (expected text or json)",
                other
            ))),
        }
    }
}

// =============================================================================
// CONFIG FILE
// =============================================================================

/// Contents of a TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    database: Option<PathBuf>,
    log_format: Option<LogFormat>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, YadaError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            YadaError::Persistence(format!(
                "Could not read config '{}': {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            YadaError::Parse(format!("Invalid config '{}': {}", path.display(), e))
        })
    }
}

// =============================================================================
// RESOLVED CONFIG
// =============================================================================

/// Effective settings for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YadaConfig {
    pub database: PathBuf,
    pub log_format: LogFormat,
}

impl Default for YadaConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE_FILE),
            log_format: LogFormat::Text,
        }
    }
}

impl YadaConfig {
    /// Resolve settings from the process environment.
    pub fn load(
        config_path: Option<&Path>,
        database_flag: Option<PathBuf>,
    ) -> Result<Self, YadaError> {
        Self::resolve(config_path, database_flag, |key| std::env::var(key).ok())
    }

    /// Resolve settings with an explicit environment lookup.
    ///
    /// A named config file must exist and parse. The implicit `yada.toml`
    /// is only read when present, but must still parse.
    pub fn resolve<F>(
        config_path: Option<&Path>,
        database_flag: Option<PathBuf>,
        env: F,
    ) -> Result<Self, YadaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let named = config_path
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).filter(|v| !v.is_empty()).map(PathBuf::from));

        let file = match named {
            Some(path) => Some(FileConfig::load(&path)?),
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    Some(FileConfig::load(implicit)?)
                } else {
                    None
                }
            }
        };

        if let Some(file) = file {
            if let Some(database) = file.database {
                config.database = database;
            }
            if let Some(log_format) = file.log_format {
                config.log_format = log_format;
            }
        }

        if let Some(database) = env(DATABASE_ENV).filter(|v| !v.is_empty()) {
            config.database = PathBuf::from(database);
        }
        if let Some(log_format) = env(LOG_FORMAT_ENV).filter(|v| !v.is_empty()) {
            config.log_format = log_format.parse()?;
        }

        if let Some(database) = database_flag {
            config.database = database;
        }

        Ok(config)
    }
}
