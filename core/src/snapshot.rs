//! Observable state: what a presentation layer reads after every change.

use crate::{
    error::GameResult,
    price::round_cents,
    session::{GamePhase, GameSession},
    types::{Price, Seconds, SessionId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub session_id:          SessionId,
    pub phase:               GamePhase,
    pub instrument_symbol:   String,
    pub current_price:       Price,
    pub purchase_price:      Option<Price>,
    pub countdown_remaining: Seconds,
    pub timer_armed:         bool,
    /// Present only once the trade has resolved.
    pub result:              Option<TradeResult>,
}

impl GameSnapshot {
    pub fn capture(session: &GameSession, timer_armed: bool) -> Self {
        Self {
            session_id:          session.session_id,
            phase:               session.phase,
            instrument_symbol:   session.instrument_symbol.clone(),
            current_price:       session.current_price,
            purchase_price:      session.purchase_price,
            countdown_remaining: session.countdown_remaining,
            timer_armed,
            result:              TradeResult::interpret(session),
        }
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn display_price(&self) -> String {
        format_price(self.current_price)
    }
}

/// Read-only interpretation of a resolved trade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeResult {
    pub is_profit:    bool,
    /// Absolute difference, cent precision.
    pub delta:        Price,
    /// e.g. "+$12.34" or "-$8.10".
    pub signed_delta: String,
}

impl TradeResult {
    pub fn interpret(session: &GameSession) -> Option<Self> {
        if !session.is_resolved() {
            return None;
        }
        let purchase = session.purchase_price?;
        let is_profit = session.current_price > purchase;
        let delta = round_cents((session.current_price - purchase).abs());
        let sign = if is_profit { '+' } else { '-' };
        Some(Self {
            is_profit,
            delta,
            signed_delta: format!("{sign}${delta:.2}"),
        })
    }
}

/// `$123.45`, or `$---.--` for a price that is not positive.
pub fn format_price(price: Price) -> String {
    if price > 0.0 {
        format!("${price:.2}")
    } else {
        "$---.--".to_string()
    }
}
