pub const TICKERS: [&str; 3] = ["MSFT", "IBM", "QCOM"];

pub const CHART_IMAGE_FORMAT: &str = "png";

pub mod files {
    pub const DATA_PATH: &str = "data";
    pub const WEIGHTS_PATH: &str = "weights";
    pub const PORTFOLIO_PATH: &str = "portfolio_val";
    pub const CHARTS_PATH: &str = "charts";
    /// Extension of every postcard encoded artifact
    pub const ARTIFACT_EXTENSION: &str = "bin";
}

pub mod run {
    pub const EPISODES: usize = 20;
    pub const BATCH_SIZE: usize = 32;
    pub const INITIAL_INVEST: f64 = 20_000.;
    /// Columns before this index are used for training, the rest for evaluation
    pub const TRAIN_SPLIT: usize = 10;
    /// Save the agent's weights after every this many training episodes
    pub const CHECKPOINT_EVERY: usize = 10;
    /// How many random-policy episodes feed the scaler fit
    pub const SCALER_EPISODES: usize = 10;
}

pub mod agent {
    pub const MEMORY_CAPACITY: usize = 2_000;
    pub const HIDDEN_UNITS: usize = 24;
    pub const LEARNING_RATE: f64 = 0.001;
    /// Discount applied to the next state's best value
    pub const GAMMA: f64 = 0.95;
    pub const EPSILON: f64 = 1.0;
    pub const EPSILON_MIN: f64 = 0.01;
    pub const EPSILON_DECAY: f64 = 0.995;
}
