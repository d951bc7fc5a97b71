//! Fixed game constants.
//!
//! These are initialization-time values, not runtime settings. The runner
//! always uses `GameConfig::default()`; tests may build variants to probe
//! edge cases (e.g. a tiny base price to exercise the price floor).

use crate::{
    error::{GameError, GameResult},
    types::{Price, Seconds},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const STOCK_SYMBOLS: [&str; 9] = [
    "AAPL", "TSLA", "GOOGL", "AMZN", "MSFT", "NVDA", "JPM", "V", "JNJ",
];
pub const COUNTDOWN_SECONDS: Seconds = 10;
pub const INITIAL_PRICE_BASE: Price = 175.0;
pub const PRICE_FLUCTUATION: Price = 50.0;
pub const TRADE_FLUCTUATION: Price = 15.0;
pub const WIN_PROBABILITY: f64 = 0.3;
pub const PRICE_FLOOR: Price = 0.01;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub symbols:            Vec<String>,
    pub countdown_seconds:  Seconds,
    pub initial_price_base: Price,
    /// Full width of the initial price band, centred on the base.
    pub price_fluctuation:  Price,
    /// Upper bound of a single trade's price change.
    pub trade_fluctuation:  Price,
    pub win_probability:    f64,
    pub price_floor:        Price,
    pub tick_period_ms:     u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols:            STOCK_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            countdown_seconds:  COUNTDOWN_SECONDS,
            initial_price_base: INITIAL_PRICE_BASE,
            price_fluctuation:  PRICE_FLUCTUATION,
            trade_fluctuation:  TRADE_FLUCTUATION,
            win_probability:    WIN_PROBABILITY,
            price_floor:        PRICE_FLOOR,
            tick_period_ms:     1_000,
        }
    }
}

impl GameConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Reject configurations that could produce an unobservable or
    /// degenerate session.
    pub fn validate(&self) -> GameResult<()> {
        if self.symbols.is_empty() {
            return Err(invalid("symbol catalog is empty"));
        }
        if self.symbols.iter().any(|s| s.trim().is_empty()) {
            return Err(invalid("symbol catalog contains a blank symbol"));
        }
        if self.countdown_seconds == 0 {
            return Err(invalid("countdown must be at least one second"));
        }
        if !(0.0..=1.0).contains(&self.win_probability) {
            return Err(invalid("win probability must lie in [0, 1]"));
        }
        if self.price_floor <= 0.0 {
            return Err(invalid("price floor must be positive"));
        }
        // Lowest possible initial draw is base - fluctuation / 2.
        if self.initial_price_base - self.price_fluctuation / 2.0 < self.price_floor {
            return Err(invalid("initial price band dips below the price floor"));
        }
        if self.price_fluctuation < 0.0 || self.trade_fluctuation < 0.0 {
            return Err(invalid("fluctuations must be non-negative"));
        }
        if self.tick_period_ms == 0 {
            return Err(invalid("tick period must be non-zero"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> GameError {
    GameError::InvalidConfig { reason: reason.to_string() }
}
