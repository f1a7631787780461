use std::path::{Path, PathBuf};

use crate::{
    constants::files::{ARTIFACT_EXTENSION, CHARTS_PATH, PORTFOLIO_PATH, WEIGHTS_PATH},
    error::Result,
    utils::create_folder_if_not_exists,
};

use super::mode::{RunId, RunMode};

/// Where a run's artifacts live on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    pub weights_dir: PathBuf,
    pub portfolio_dir: PathBuf,
    pub charts_dir: PathBuf,
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self::under(".")
    }
}

impl ArtifactLayout {
    /// The default directory names below `root`
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            weights_dir: root.join(WEIGHTS_PATH),
            portfolio_dir: root.join(PORTFOLIO_PATH),
            charts_dir: root.join(CHARTS_PATH),
        }
    }

    /// Creates every directory. Runs expect them to exist already.
    pub fn prepare(&self) -> Result<()> {
        create_folder_if_not_exists(&self.weights_dir)?;
        create_folder_if_not_exists(&self.portfolio_dir)?;
        create_folder_if_not_exists(&self.charts_dir)
    }

    pub fn checkpoint_path(&self, run_id: &RunId) -> PathBuf {
        self.weights_dir
            .join(format!("{run_id}-dqn.{ARTIFACT_EXTENSION}"))
    }

    pub fn portfolio_path(&self, run_id: &RunId, mode: &RunMode) -> PathBuf {
        self.portfolio_dir
            .join(format!("{run_id}-{}.{ARTIFACT_EXTENSION}", mode.label()))
    }

    /// Chart output directory for one run
    pub fn run_charts_dir(&self, run_id: &RunId, mode: &RunMode) -> PathBuf {
        self.charts_dir.join(format!("{run_id}-{}", mode.label()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifacts_are_labelled_by_run_id() {
        let layout = ArtifactLayout::under("out");
        let run_id = RunId::from_weights_path(Path::new("201401010101")).unwrap();

        assert_eq!(
            layout.checkpoint_path(&run_id),
            Path::new("out/weights/201401010101-dqn.bin")
        );
        assert_eq!(
            layout.portfolio_path(&run_id, &RunMode::train(32)),
            Path::new("out/portfolio_val/201401010101-train.bin")
        );
        assert_eq!(
            layout.portfolio_path(
                &run_id,
                &RunMode::Evaluate {
                    weights: "w/201401010101-dqn.bin".into()
                }
            ),
            Path::new("out/portfolio_val/201401010101-test.bin")
        );
    }

    #[test]
    fn prepare_creates_every_directory() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ArtifactLayout::under(dir.path());

        layout.prepare().unwrap();

        assert!(layout.weights_dir.is_dir());
        assert!(layout.portfolio_dir.is_dir());
        assert!(layout.charts_dir.is_dir());
    }
}
