use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors, raised before the first episode
    #[error("test mode requires a weights path (-w)")]
    MissingWeights,

    #[error("no 12-digit run id found in weights path {0:?}")]
    MissingRunId(PathBuf),

    #[error("unknown mode {0:?}, expected \"train\" or \"test\"")]
    InvalidMode(String),

    // Collaborator errors, raised inside the episode loop
    #[error("action {action} is outside the action space of size {count}")]
    InvalidAction { action: usize, count: usize },

    #[error("episode already ended at step {0}, reset before stepping")]
    EpisodeOver(usize),

    #[error("{what} size mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("no market data: {0}")]
    EmptyData(String),

    #[error("{stocks} stocks give more discrete actions than fit in a usize")]
    ActionSpaceOverflow { stocks: usize },

    #[error("invalid price {value:?} in {path:?}")]
    InvalidPrice { path: PathBuf, value: String },

    // Resource errors
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("encoding error: {0}")]
    Codec(#[from] postcard::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("model error: {0}")]
    Model(String),

    #[error("chart error: {0}")]
    Chart(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error was raised by validating the run's configuration
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::MissingWeights | Error::MissingRunId(_) | Error::InvalidMode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
