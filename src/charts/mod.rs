use plotters::drawing::DrawingAreaErrorKind;

use crate::error::Error;

pub mod multi_line;
pub mod simple;
pub mod theme;
mod utils;

pub use multi_line::q_value_chart;
pub use simple::simple_chart;

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for Error {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Error::Chart(err.to_string())
    }
}
