use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::config::BoardConfig;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "kanban.toml";

/// Error type for loading board configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("column {index} has an empty id")]
    EmptyColumnId { index: usize },
    #[error("duplicate column id: {0}")]
    DuplicateColumnId(String),
}

/// Parse and validate configuration text
pub fn parse_config(text: &str, path: &Path) -> Result<BoardConfig, ConfigError> {
    let config: BoardConfig = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &BoardConfig) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for (index, col) in config.columns.iter().enumerate() {
        if col.id.trim().is_empty() {
            return Err(ConfigError::EmptyColumnId { index });
        }
        if !seen.insert(col.id.as_str()) {
            return Err(ConfigError::DuplicateColumnId(col.id.clone()));
        }
    }
    Ok(())
}

/// Read a config file
pub fn read_config(path: &Path) -> Result<BoardConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&text, path)
}

/// Load the session config: an explicit path must exist; otherwise
/// `kanban.toml` in `cwd` is used when present, else built-in defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<BoardConfig, ConfigError> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading config");
        return read_config(path);
    }
    let candidate = cwd.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        debug!(path = %candidate.display(), "loading config");
        return read_config(&candidate);
    }
    debug!("no config file, using defaults");
    Ok(BoardConfig::default())
}
