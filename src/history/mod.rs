pub mod portfolio;

pub use portfolio::{read_portfolio_values, write_portfolio_values};
