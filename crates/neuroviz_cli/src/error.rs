use std::path::PathBuf;

use neuroviz::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("could not determine the OS config directory")]
    NoConfigDir,
    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?}: invalid run config: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid network config: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Usage(String),
}
