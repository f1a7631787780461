use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};

/// What to do with one stock during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize)]
pub enum StockAction {
    Sell,
    Hold,
    Buy,
}

/// Stock indexes grouped by the action taken on them
pub type Orders = EnumMap<StockAction, Vec<usize>>;

impl StockAction {
    pub const VARIANTS: usize = 3;

    pub fn from_digit(digit: usize) -> Self {
        match digit % Self::VARIANTS {
            0 => StockAction::Sell,
            1 => StockAction::Hold,
            _ => StockAction::Buy,
        }
    }
}

/// Number of discrete actions over `stock_count` stocks, `None` past `usize::MAX`
pub fn action_count(stock_count: usize) -> Option<usize> {
    let exponent = u32::try_from(stock_count).ok()?;
    StockAction::VARIANTS.checked_pow(exponent)
}

/// Decodes a discrete action into one [`StockAction`] per stock.
///
/// The action is read as a base-3 number, stock 0 being the least
/// significant digit.
pub fn decode(action: usize, stock_count: usize) -> Vec<StockAction> {
    let mut remaining = action;
    (0..stock_count)
        .map(|_| {
            let digit = remaining % StockAction::VARIANTS;
            remaining /= StockAction::VARIANTS;
            StockAction::from_digit(digit)
        })
        .collect()
}

pub fn orders(action: usize, stock_count: usize) -> Orders {
    let mut orders = Orders::default();
    for (stock, stock_action) in decode(action, stock_count).into_iter().enumerate() {
        orders[stock_action].push(stock);
    }
    orders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_actions_per_stock() {
        assert_eq!(action_count(1), Some(3));
        assert_eq!(action_count(3), Some(27));
    }

    #[test]
    fn action_count_overflow_is_none() {
        assert_eq!(action_count(40), Some(3usize.pow(40)));
        assert_eq!(action_count(41), None);
    }

    #[test]
    fn decodes_least_significant_stock_first() {
        // 2 + 0 * 3 + 1 * 9
        assert_eq!(
            decode(11, 3),
            vec![StockAction::Buy, StockAction::Sell, StockAction::Hold]
        );
        assert_eq!(decode(0, 2), vec![StockAction::Sell, StockAction::Sell]);
    }

    #[test]
    fn groups_stocks_by_action() {
        let orders = orders(11, 3);

        assert_eq!(orders[StockAction::Buy], vec![0]);
        assert_eq!(orders[StockAction::Sell], vec![1]);
        assert_eq!(orders[StockAction::Hold], vec![2]);
    }
}
