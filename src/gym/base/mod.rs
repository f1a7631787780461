pub mod action;
mod environment;

pub use action::{action_count, StockAction};
pub use environment::{Environment, Snapshot, StepInfo};
