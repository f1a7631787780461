pub mod historical;
pub mod partition;

pub use historical::load_price_matrix;
pub use partition::{split_at_column, Partition};
