use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::{
    constants::run::CHECKPOINT_EVERY,
    error::{Error, Result},
};

/// Whether the agent learns during the run. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Train {
        batch_size: usize,
        /// Checkpoint after every this many episodes
        checkpoint_every: usize,
    },
    Evaluate {
        /// Previously trained weights, also the source of the run id
        weights: PathBuf,
    },
}

impl RunMode {
    pub const TRAIN: &'static str = "train";
    pub const TEST: &'static str = "test";

    pub fn train(batch_size: usize) -> Self {
        RunMode::Train {
            batch_size,
            checkpoint_every: CHECKPOINT_EVERY,
        }
    }

    /// Builds the mode from its command line token. `weights` is ignored when
    /// training and required when testing.
    pub fn from_token(token: &str, batch_size: usize, weights: Option<PathBuf>) -> Result<Self> {
        match token.trim() {
            Self::TRAIN => Ok(Self::train(batch_size)),
            Self::TEST => weights
                .map(|weights| RunMode::Evaluate { weights })
                .ok_or(Error::MissingWeights),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunMode::Train { .. } => Self::TRAIN,
            RunMode::Evaluate { .. } => Self::TEST,
        }
    }

    pub fn is_training(&self) -> bool {
        matches!(self, RunMode::Train { .. })
    }
}

/// Timestamp token labelling every artifact of one run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId(String);

impl RunId {
    pub const DIGITS: usize = 12;

    /// Local time as `YYYYMMDDHHMM`
    pub fn now() -> Self {
        RunId(Local::now().format("%Y%m%d%H%M").to_string())
    }

    /// The first run of 12 consecutive digits anywhere in `path`
    pub fn from_weights_path(path: &Path) -> Result<Self> {
        let text = path.to_string_lossy();
        let bytes = text.as_bytes();
        let mut run = 0;

        for (index, byte) in bytes.iter().enumerate() {
            if byte.is_ascii_digit() {
                run += 1;
                if run == Self::DIGITS {
                    let start = index + 1 - Self::DIGITS;
                    return Ok(RunId(text[start..=index].to_string()));
                }
            } else {
                run = 0;
            }
        }

        Err(Error::MissingRunId(path.to_path_buf()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn train_token_carries_batch_size_and_cadence() {
        let mode = RunMode::from_token("train", 32, None).unwrap();

        assert_eq!(
            mode,
            RunMode::Train {
                batch_size: 32,
                checkpoint_every: 10
            }
        );
        assert!(mode.is_training());
        assert_eq!(mode.label(), "train");
    }

    #[test]
    fn test_token_requires_weights() {
        assert!(matches!(
            RunMode::from_token("test", 32, None),
            Err(Error::MissingWeights)
        ));

        let mode = RunMode::from_token("test", 32, Some("weights/201401010101-dqn.bin".into()))
            .unwrap();
        assert!(!mode.is_training());
        assert_eq!(mode.label(), "test");
    }

    #[test]
    fn unknown_token_is_a_config_error() {
        let err = RunMode::from_token("validate", 32, None).unwrap_err();

        assert!(matches!(&err, Error::InvalidMode(token) if token == "validate"));
        assert!(err.is_config());
    }

    #[test]
    fn run_id_comes_from_the_weights_path() {
        let id = RunId::from_weights_path(Path::new("weights/201401010101-dqn.h5")).unwrap();

        assert_eq!(id.as_str(), "201401010101");
    }

    #[test]
    fn run_id_ignores_surrounding_digits_and_text() {
        let id = RunId::from_weights_path(Path::new("run7/v2/20190305123456789-dqn.bin")).unwrap();
        assert_eq!(id.to_string(), "201903051234");

        let id = RunId::from_weights_path(Path::new("12345/x202001020304")).unwrap();
        assert_eq!(id.as_str(), "202001020304");
    }

    #[test]
    fn path_without_twelve_digits_has_no_run_id() {
        let err = RunId::from_weights_path(Path::new("weights/20140101010-dqn.bin")).unwrap_err();

        assert!(matches!(err, Error::MissingRunId(_)));
        assert!(err.is_config());
    }

    #[test]
    fn fresh_run_id_is_twelve_digits() {
        let id = RunId::now();

        assert_eq!(id.as_str().len(), RunId::DIGITS);
        assert!(id.as_str().bytes().all(|b| b.is_ascii_digit()));
    }
}
