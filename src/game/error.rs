// Game-level errors

use std::path::PathBuf;

/// Errors raised while setting up a game session
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid round configuration: {0}")]
    InvalidRoundConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to read configuration {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
