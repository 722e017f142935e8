use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config file {path} is not a valid JSON config record")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "config file {path} holds none of `images_file`, `images_optics_ordered_file`, `reachabilities_file`"
    )]
    NoKnownKeys { path: PathBuf },

    #[error("config value `{key}` is missing")]
    MissingKey { key: &'static str },

    #[error("failed to read `{key}` data file {path}")]
    DataFileUnreadable {
        key: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("inconsistent data files: {0}")]
    Consistency(String),
}
