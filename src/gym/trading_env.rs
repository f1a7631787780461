use ndarray::{s, Array1, ArrayView1};

use crate::{
    error::{Error, Result},
    gym::base::{
        action::{self, StockAction},
        Environment, Snapshot, StepInfo,
    },
    types::{PriceMatrix, State},
};

/// Simulated multi-stock portfolio driven over a fixed price history.
///
/// Observations are `[shares owned..., current prices..., cash]`. Each step
/// moves one column forward in the history, then trades: every share of a
/// sold stock is liquidated first, then buy orders take one share at a time,
/// round-robin across the bought stocks, while cash covers the price.
#[derive(Debug, Clone)]
pub struct TradingEnv {
    prices: PriceMatrix,
    initial_invest: f64,
    action_count: usize,
    step: usize,
    shares: Array1<f64>,
    cash: f64,
}

impl TradingEnv {
    pub fn new(prices: PriceMatrix, initial_invest: f64) -> Result<Self> {
        if prices.is_empty() {
            return Err(Error::EmptyData(format!(
                "trading environment needs at least one ticker and one step, got {:?}",
                prices.dim()
            )));
        }

        let stock_count = prices.nrows();
        let action_count = action::action_count(stock_count)
            .ok_or(Error::ActionSpaceOverflow { stocks: stock_count })?;

        Ok(Self {
            prices,
            initial_invest,
            action_count,
            step: 0,
            shares: Array1::zeros(stock_count),
            cash: initial_invest,
        })
    }

    pub fn stock_count(&self) -> usize {
        self.prices.nrows()
    }

    fn current_prices(&self) -> ArrayView1<'_, f64> {
        self.prices.column(self.step)
    }

    /// Cash plus the market value of every position
    pub fn portfolio_value(&self) -> f64 {
        self.shares.dot(&self.current_prices()) + self.cash
    }

    fn observation(&self) -> State {
        let stocks = self.stock_count();
        let mut state = Array1::zeros(self.observation_size());
        state.slice_mut(s![..stocks]).assign(&self.shares);
        state
            .slice_mut(s![stocks..stocks * 2])
            .assign(&self.current_prices());
        state[stocks * 2] = self.cash;
        state
    }

    fn trade(&mut self, action: usize) {
        let orders = action::orders(action, self.stock_count());
        let prices = self.prices.column(self.step).to_owned();

        for &stock in &orders[StockAction::Sell] {
            self.cash += prices[stock] * self.shares[stock];
            self.shares[stock] = 0.;
        }

        let buys = &orders[StockAction::Buy];
        if buys.is_empty() {
            return;
        }

        let mut can_buy = true;
        while can_buy {
            for &stock in buys {
                // Zero prices would never exhaust the cash
                if prices[stock] > 0. && self.cash > prices[stock] {
                    self.shares[stock] += 1.;
                    self.cash -= prices[stock];
                } else {
                    can_buy = false;
                }
            }
        }
    }
}

impl Environment for TradingEnv {
    fn reset(&mut self) -> Result<State> {
        self.step = 0;
        self.shares.fill(0.);
        self.cash = self.initial_invest;

        Ok(self.observation())
    }

    fn step(&mut self, action: usize) -> Result<Snapshot> {
        let count = self.action_count();
        if action >= count {
            return Err(Error::InvalidAction { action, count });
        }
        if self.step + 1 >= self.prices.ncols() {
            return Err(Error::EpisodeOver(self.step));
        }

        let previous_value = self.portfolio_value();
        self.step += 1;
        self.trade(action);
        let cur_val = self.portfolio_value();

        Ok(Snapshot {
            next_state: self.observation(),
            reward: cur_val - previous_value,
            done: self.step == self.prices.ncols() - 1,
            info: StepInfo { cur_val },
        })
    }

    fn observation_size(&self) -> usize {
        self.stock_count() * 2 + 1
    }

    fn action_count(&self) -> usize {
        self.action_count
    }

    fn episode_length(&self) -> usize {
        self.prices.ncols()
    }
}
