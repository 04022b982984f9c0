//! Error types for repository toggling

use std::path::PathBuf;
use thiserror::Error;

/// Repository toggle errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Unsupported distribution '{0}' (expected 'debian' or 'centos')")]
    UnsupportedDistro(String),

    #[error("No release information found (searched: {})", display_paths(.0))]
    ReleaseInfoMissing(Vec<PathBuf>),

    #[error("Missing repository source file: {0}")]
    MissingSourceFile(PathBuf),

    #[error("Unknown repository id '{id}': {message}")]
    UnknownRepoId { id: String, message: String },

    #[error("Invalid directive: '{0}'")]
    InvalidDirective(String),

    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for repository toggle operations
pub type Result<T> = std::result::Result<T, ConfigError>;
