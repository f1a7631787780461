use std::path::{Path, PathBuf};

use burn::optim::AdamConfig;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{info, warn};

use crate::{
    agent::{Agent, DqnAgent, QTrace},
    constants::run::{SCALER_EPISODES, TRAIN_SPLIT},
    data::split_at_column,
    error::Result,
    gym::{fit_with_random_policy, Environment, TradingEnv},
    history::write_portfolio_values,
    types::{Data, PriceMatrix},
};

mod episodes;
pub mod layout;
pub mod mode;

pub use episodes::{EpisodeRunner, RunPlan, RunSummary};
pub use layout::ArtifactLayout;
pub use mode::{RunId, RunMode};

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub episodes: usize,
    pub initial_invest: f64,
    pub mode: RunMode,
    /// Seeds every random choice of the run. Entropy when unset.
    pub seed: Option<u64>,
    pub layout: ArtifactLayout,
    /// Render diagnostic charts once the run is over
    pub charts: bool,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: RunId,
    pub summary: RunSummary,
    pub portfolio_path: PathBuf,
}

/// Runs every episode of one training or evaluation run over `prices`.
///
/// The layout's directories must already exist. Nothing is written to the
/// portfolio directory unless every episode completes without error.
pub fn run(prices: &PriceMatrix, config: &RunConfig) -> Result<RunReport> {
    let partition = split_at_column(prices, TRAIN_SPLIT);
    info!(
        train_columns = ?partition.train_columns,
        eval_columns = ?partition.eval_columns,
        "partitioned market data"
    );
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut env = TradingEnv::new(partition.train.clone(), config.initial_invest)?;
    let mut agent = DqnAgent::new(
        env.observation_size(),
        env.action_count(),
        AdamConfig::new().init(),
        StdRng::seed_from_u64(rng.gen()),
    );
    let scaler = fit_with_random_policy(&mut env, &mut rng, SCALER_EPISODES)?;

    let run_id = match &config.mode {
        RunMode::Train { .. } => RunId::now(),
        RunMode::Evaluate { weights } => {
            let run_id = RunId::from_weights_path(weights)?;
            env = TradingEnv::new(partition.eval, config.initial_invest)?;
            agent.load(weights)?;
            run_id
        }
    };

    info!(
        run_id = %run_id,
        mode = config.mode.label(),
        episodes = config.episodes,
        steps = env.episode_length(),
        "starting run"
    );

    let plan = RunPlan {
        mode: config.mode.clone(),
        episodes: config.episodes,
        run_id: run_id.clone(),
        layout: config.layout.clone(),
    };
    let summary = EpisodeRunner::new(&mut env, &mut agent, &scaler, &plan).run()?;

    let portfolio_path = config.layout.portfolio_path(&run_id, &config.mode);
    write_portfolio_values(&portfolio_path, &summary.end_values)?;

    if config.charts {
        let dir = config.layout.run_charts_dir(&run_id, &config.mode);
        let train_prices = partition.train.row(0).to_vec();

        if let Err(err) = render_charts(&dir, &train_prices, agent.q_trace(), &summary.end_values) {
            warn!(dir = %dir.display(), %err, "failed to render charts");
        }
    }

    info!(
        run_id = %run_id,
        finished = summary.end_values.len(),
        truncated = summary.truncated_episodes.len(),
        replays = summary.replays,
        epsilon = agent.epsilon(),
        "run complete"
    );

    Ok(RunReport {
        run_id,
        summary,
        portfolio_path,
    })
}

#[cfg(feature = "debug_training")]
fn render_charts(dir: &Path, train_prices: &Data, trace: &QTrace, end_values: &Data) -> Result<()> {
    use crate::{
        charts::{q_value_chart, simple_chart},
        utils::create_folder_if_not_exists,
    };

    create_folder_if_not_exists(dir)?;
    simple_chart(dir, "train_prices", train_prices)?;
    q_value_chart(dir, "q_values", trace)?;

    let actions: Data = trace.chosen_actions().iter().map(|action| *action as f64).collect();
    simple_chart(dir, "actions", &actions)?;
    simple_chart(dir, "portfolio_values", end_values)
}

#[cfg(not(feature = "debug_training"))]
fn render_charts(_dir: &Path, _train_prices: &Data, _trace: &QTrace, _end_values: &Data) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use ndarray::Array2;

    use super::*;
    use crate::{error::Error, history::read_portfolio_values};

    /// Three tickers over 16 days with enough movement to trade on
    fn prices() -> PriceMatrix {
        Array2::from_shape_fn((3, 16), |(row, col)| {
            let base = [40., 120., 65.][row];
            base + ((col * (row + 2)) % 7) as f64 - 3.
        })
    }

    fn config(root: &Path, mode: RunMode, episodes: usize) -> RunConfig {
        let layout = ArtifactLayout::under(root);
        layout.prepare().unwrap();

        RunConfig {
            episodes,
            initial_invest: 20_000.,
            mode,
            seed: Some(42),
            layout,
            charts: false,
        }
    }

    fn portfolio_files(layout: &ArtifactLayout) -> usize {
        fs::read_dir(&layout.portfolio_dir).unwrap().count()
    }

    #[test]
    fn training_then_testing_reuses_the_run_id() {
        let dir = tempfile::tempdir().unwrap();

        let trained = run(&prices(), &config(dir.path(), RunMode::train(8), 10)).unwrap();

        assert_eq!(trained.summary.end_values.len(), 10);
        assert_eq!(trained.summary.checkpoints.len(), 1);
        assert!(trained.summary.replays > 0);
        assert!(trained.summary.checkpoints[0].is_file());
        assert_eq!(
            read_portfolio_values(&trained.portfolio_path).unwrap(),
            trained.summary.end_values
        );

        let mode = RunMode::Evaluate {
            weights: trained.summary.checkpoints[0].clone(),
        };
        let tested = run(&prices(), &config(dir.path(), mode, 3)).unwrap();

        assert_eq!(tested.run_id, trained.run_id);
        assert_eq!(tested.summary.end_values.len(), 3);
        assert_eq!(tested.summary.replays, 0);
        assert!(tested.summary.checkpoints.is_empty());
        // Six evaluation columns, done on the last one
        assert_eq!(tested.summary.steps, 3 * 5);
        assert!(tested
            .portfolio_path
            .to_string_lossy()
            .ends_with(&format!("{}-test.bin", trained.run_id)));
    }

    #[test]
    fn same_seed_gives_the_same_run() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();

        let a = run(&prices(), &config(first.path(), RunMode::train(4), 3)).unwrap();
        let b = run(&prices(), &config(second.path(), RunMode::train(4), 3)).unwrap();

        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn unreadable_weights_write_no_portfolio_values() {
        let dir = tempfile::tempdir().unwrap();
        let weights = dir.path().join("201401010101-dqn.bin");
        fs::write(&weights, b"not a checkpoint").unwrap();
        let config = config(dir.path(), RunMode::Evaluate { weights }, 3);

        let err = run(&prices(), &config).unwrap_err();

        assert!(!err.is_config());
        assert_eq!(portfolio_files(&config.layout), 0);
    }

    #[test]
    fn failed_checkpoint_writes_no_portfolio_values() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), RunMode::train(4), 12);
        fs::remove_dir_all(&config.layout.weights_dir).unwrap();

        let err = run(&prices(), &config).unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(portfolio_files(&config.layout), 0);
    }

    #[test]
    fn weights_without_a_run_id_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mode = RunMode::Evaluate {
            weights: dir.path().join("latest-dqn.bin"),
        };
        let config = config(dir.path(), mode, 3);

        let err = run(&prices(), &config).unwrap_err();

        assert!(matches!(err, Error::MissingRunId(_)));
        assert_eq!(portfolio_files(&config.layout), 0);
    }

    #[test]
    fn no_market_data_fails_before_any_episode() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), RunMode::train(4), 3);

        let err = run(&Array2::zeros((3, 0)), &config).unwrap_err();

        assert!(matches!(err, Error::EmptyData(_)));
        assert_eq!(portfolio_files(&config.layout), 0);
    }
}
