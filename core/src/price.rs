//! Price model: initial quote and the trade outcome applied at expiry.

use crate::{config::GameConfig, rng::RandomSource, types::Price};
use serde::{Deserialize, Serialize};

/// Round to cent precision.
pub fn round_cents(value: Price) -> Price {
    (value * 100.0).round() / 100.0
}

/// `base + (u - 0.5) * fluctuation`, rounded to cents.
pub fn initial_price(config: &GameConfig, rng: &mut dyn RandomSource) -> Price {
    let offset = (rng.next_f64() - 0.5) * config.price_fluctuation;
    round_cents(config.initial_price_base + offset)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TradeOutcome {
    pub won:       bool,
    /// Unsigned magnitude drawn for this trade, before clamping.
    pub change:    Price,
    pub new_price: Price,
}

/// Draw the win/loss and the magnitude (two independent draws, in that
/// order) and apply them to `current`.
pub fn draw_outcome(
    config: &GameConfig,
    current: Price,
    rng: &mut dyn RandomSource,
) -> TradeOutcome {
    let won = rng.chance(config.win_probability);
    let change = (rng.next_f64() * 0.5 + 0.5) * config.trade_fluctuation;
    let signed = if won { change } else { -change };
    let new_price = round_cents((current + signed).max(config.price_floor));
    TradeOutcome { won, change, new_price }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn initial_price_spans_band() {
        let cfg = GameConfig::default();
        let mut rng = ScriptedRng::new([0.0, 0.5, 0.999_8]);
        assert_eq!(initial_price(&cfg, &mut rng), 150.0);
        assert_eq!(initial_price(&cfg, &mut rng), 175.0);
        assert_eq!(initial_price(&cfg, &mut rng), 199.99);
    }

    #[test]
    fn win_adds_and_loss_subtracts() {
        let cfg = GameConfig::default();
        // win, magnitude 0.5 + 0.5 * 0.0 = 0.5 -> 7.5
        let mut rng = ScriptedRng::new([0.1, 0.0]);
        let out = draw_outcome(&cfg, 100.0, &mut rng);
        assert!(out.won);
        assert_eq!(out.new_price, 107.5);

        // loss, magnitude 0.5 + 0.5 * 0.5 = 0.75 -> 11.25
        let mut rng = ScriptedRng::new([0.3, 0.5]);
        let out = draw_outcome(&cfg, 100.0, &mut rng);
        assert!(!out.won);
        assert_eq!(out.new_price, 88.75);
    }

    #[test]
    fn loss_never_goes_below_floor() {
        let cfg = GameConfig::default();
        let mut rng = ScriptedRng::new([0.9, 0.9]);
        let out = draw_outcome(&cfg, 3.0, &mut rng);
        assert_eq!(out.new_price, 0.01);
    }

    #[test]
    fn round_cents_handles_float_noise() {
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
        assert_eq!(round_cents(174.995_000_1), 175.0);
    }
}
