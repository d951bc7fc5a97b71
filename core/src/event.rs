//! Game events: the journal every engine operation returns.
//!
//! RULE: every state change is described by exactly one event.
//! Events are never persisted; the runner logs or prints them.

use crate::{
    session::GamePhase,
    types::{Price, Seconds, SessionId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Session lifecycle ─────────────────────────
    SessionStarted {
        session_id: SessionId,
        symbol:     String,
        price:      Price,
    },

    // ── Player actions ────────────────────────────
    PositionOpened {
        session_id:     SessionId,
        symbol:         String,
        purchase_price: Price,
    },
    BuyIgnored {
        session_id: SessionId,
        phase:      GamePhase,
    },

    // ── Timer ─────────────────────────────────────
    CountdownAdvanced {
        session_id: SessionId,
        remaining:  Seconds,
    },
    OutcomeResolved {
        session_id:     SessionId,
        won:            bool,
        change:         Price,
        purchase_price: Price,
        new_price:      Price,
    },
    TimerCancelled {
        session_id: SessionId,
    },
    StaleTickIgnored {
        session_id:         SessionId,
        current_session_id: SessionId,
    },
}

impl GameEvent {
    /// Stable snake_case name, matching the serde tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. }    => "session_started",
            Self::PositionOpened { .. }    => "position_opened",
            Self::BuyIgnored { .. }        => "buy_ignored",
            Self::CountdownAdvanced { .. } => "countdown_advanced",
            Self::OutcomeResolved { .. }   => "outcome_resolved",
            Self::TimerCancelled { .. }    => "timer_cancelled",
            Self::StaleTickIgnored { .. }  => "stale_tick_ignored",
        }
    }
}
