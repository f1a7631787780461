use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use portfolio_dqn::{
    constants::{
        files::DATA_PATH,
        run::{BATCH_SIZE, EPISODES, INITIAL_INVEST},
        TICKERS,
    },
    data::load_price_matrix,
    error::Result,
    runner::{self, ArtifactLayout, RunConfig, RunMode},
};

#[derive(Parser)]
#[command(name = "portfolio_dqn")]
#[command(about = "Train or evaluate a DQN portfolio trading agent", long_about = None)]
struct Cli {
    /// Number of episodes to run
    #[arg(short, long, default_value_t = EPISODES)]
    episode: usize,

    /// Size of each replay batch
    #[arg(short, long, default_value_t = BATCH_SIZE)]
    batch_size: usize,

    /// Starting cash of every episode
    #[arg(short, long, default_value_t = INITIAL_INVEST)]
    initial_invest: f64,

    /// "train" or "test"
    #[arg(short, long)]
    mode: String,

    /// Trained weights to evaluate, required in test mode
    #[arg(short, long)]
    weights: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the daily_{TICKER}.csv files
    #[arg(long, default_value = DATA_PATH)]
    data_dir: PathBuf,

    /// Skip rendering diagnostic charts
    #[arg(long, default_value_t = false)]
    no_charts: bool,
}

fn main() -> ExitCode {
    init_logging();
    println!("{}", "Start".green());

    let cli = Cli::parse();

    match execute(cli) {
        Ok(()) => {
            println!("{}", "End".green());
            ExitCode::SUCCESS
        }
        Err(err) if err.is_config() => {
            eprintln!("{} {err}", "error:".red());
            eprintln!("{}", "run with --help for usage".yellow());
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{} {err}", "error:".red());
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let mode = RunMode::from_token(&cli.mode, cli.batch_size, cli.weights)?;

    let layout = ArtifactLayout::default();
    layout.prepare()?;

    let prices = load_price_matrix(&cli.data_dir, &TICKERS)?;

    let config = RunConfig {
        episodes: cli.episode,
        initial_invest: cli.initial_invest,
        mode,
        seed: cli.seed,
        layout,
        charts: !cli.no_charts,
    };
    let report = runner::run(&prices, &config)?;

    println!(
        "run {}: {} episode values saved to {}",
        report.run_id,
        report.summary.end_values.len(),
        report.portfolio_path.display()
    );
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
