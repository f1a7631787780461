pub mod base;
pub mod scaler;
mod trading_env;

pub use base::{Environment, Snapshot, StepInfo};
pub use scaler::{fit_with_random_policy, Scaler, StandardScaler};
pub use trading_env::TradingEnv;
