use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// A toolbar trigger name with no matching format.
    #[error("unknown format: {0:?}")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;
