//! The game session and its pure transition functions.
//!
//! A `GameSession` is a plain value. `apply_buy`, `apply_tick` and
//! `apply_reset` never mutate their input: each returns a `Transition`
//! holding the next session, the events describing the change, and what
//! the owner must do with the periodic timer. The engine is the only
//! caller that commits transitions.

use crate::{
    config::GameConfig,
    event::GameEvent,
    price::{draw_outcome, initial_price},
    rng::RandomSource,
    types::{Price, Seconds, SessionId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// No position held; the displayed price can be bought.
    Idle,
    /// A position was bought and the countdown is running.
    Pending,
    /// The countdown expired and the outcome has been applied.
    Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSession {
    pub session_id:          SessionId,
    pub phase:               GamePhase,
    pub instrument_symbol:   String,
    pub current_price:       Price,
    pub purchase_price:      Option<Price>,
    pub countdown_remaining: Seconds,
}

/// What the session owner must do with the periodic timer after
/// committing a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDirective {
    Keep,
    Arm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: GameSession,
    pub events:  Vec<GameEvent>,
    pub timer:   TimerDirective,
}

impl Transition {
    fn unchanged(session: &GameSession) -> Self {
        Self {
            session: session.clone(),
            events:  vec![],
            timer:   TimerDirective::Keep,
        }
    }

    /// True when the transition left the session exactly as it was.
    pub fn is_noop(&self, before: &GameSession) -> bool {
        self.session == *before && self.timer == TimerDirective::Keep
    }
}

impl GameSession {
    /// A brand-new Idle session. The price is drawn before the symbol.
    pub fn fresh(
        session_id: SessionId,
        config: &GameConfig,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let current_price = initial_price(config, rng);
        let symbol_idx = rng.pick_index(config.symbols.len());
        Self {
            session_id,
            phase: GamePhase::Idle,
            instrument_symbol: config.symbols[symbol_idx].clone(),
            current_price,
            purchase_price: None,
            countdown_remaining: config.countdown_seconds,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == GamePhase::Idle
    }

    pub fn is_pending(&self) -> bool {
        self.phase == GamePhase::Pending
    }

    pub fn is_resolved(&self) -> bool {
        self.phase == GamePhase::Resolved
    }

    pub(crate) fn started_event(&self) -> GameEvent {
        GameEvent::SessionStarted {
            session_id: self.session_id,
            symbol:     self.instrument_symbol.clone(),
            price:      self.current_price,
        }
    }
}

/// Open a position at the current price. Ignored unless Idle with a
/// positive price.
pub fn apply_buy(session: &GameSession, config: &GameConfig) -> Transition {
    if !session.is_idle() || session.current_price <= 0.0 {
        return Transition {
            session: session.clone(),
            events:  vec![GameEvent::BuyIgnored {
                session_id: session.session_id,
                phase:      session.phase,
            }],
            timer:   TimerDirective::Keep,
        };
    }

    let mut next = session.clone();
    next.purchase_price = Some(session.current_price);
    next.phase = GamePhase::Pending;
    next.countdown_remaining = config.countdown_seconds;

    Transition {
        events: vec![GameEvent::PositionOpened {
            session_id:     next.session_id,
            symbol:         next.instrument_symbol.clone(),
            purchase_price: session.current_price,
        }],
        session: next,
        timer: TimerDirective::Arm,
    }
}

/// One timer firing. Only a Pending session changes; reaching zero
/// resolves the trade and re-arms the countdown for the next round.
pub fn apply_tick(
    session: &GameSession,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
) -> Transition {
    if !session.is_pending() {
        return Transition::unchanged(session);
    }

    let mut next = session.clone();
    next.countdown_remaining = session.countdown_remaining.saturating_sub(1);

    if next.countdown_remaining > 0 {
        return Transition {
            events: vec![GameEvent::CountdownAdvanced {
                session_id: next.session_id,
                remaining:  next.countdown_remaining,
            }],
            session: next,
            timer: TimerDirective::Keep,
        };
    }

    let outcome = draw_outcome(config, session.current_price, rng);
    next.current_price = outcome.new_price;
    next.phase = GamePhase::Resolved;
    next.countdown_remaining = config.countdown_seconds;

    Transition {
        events: vec![
            GameEvent::CountdownAdvanced {
                session_id: next.session_id,
                remaining:  0,
            },
            GameEvent::OutcomeResolved {
                session_id:     next.session_id,
                won:            outcome.won,
                change:         outcome.change,
                purchase_price: next.purchase_price.unwrap_or(session.current_price),
                new_price:      outcome.new_price,
            },
        ],
        session: next,
        timer: TimerDirective::Cancel,
    }
}

/// Replace the session wholesale. Allowed from every phase.
pub fn apply_reset(
    session: &GameSession,
    config: &GameConfig,
    rng: &mut dyn RandomSource,
) -> Transition {
    let next = GameSession::fresh(session.session_id + 1, config, rng);
    let mut events = Vec::with_capacity(2);
    if session.is_pending() {
        events.push(GameEvent::TimerCancelled {
            session_id: session.session_id,
        });
    }
    events.push(next.started_event());

    Transition {
        session: next,
        events,
        timer: TimerDirective::Cancel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn idle_at(price: Price) -> GameSession {
        GameSession {
            session_id:          1,
            phase:               GamePhase::Idle,
            instrument_symbol:   "AAPL".into(),
            current_price:       price,
            purchase_price:      None,
            countdown_remaining: 10,
        }
    }

    #[test]
    fn buy_captures_current_price() {
        let cfg = GameConfig::default();
        let t = apply_buy(&idle_at(100.0), &cfg);
        assert_eq!(t.session.phase, GamePhase::Pending);
        assert_eq!(t.session.purchase_price, Some(100.0));
        assert_eq!(t.session.countdown_remaining, 10);
        assert_eq!(t.timer, TimerDirective::Arm);
    }

    #[test]
    fn buy_on_non_positive_price_is_ignored() {
        let cfg = GameConfig::default();
        let before = idle_at(0.0);
        let t = apply_buy(&before, &cfg);
        assert!(t.is_noop(&before));
        assert!(matches!(t.events[0], GameEvent::BuyIgnored { .. }));
    }

    #[test]
    fn tick_outside_pending_changes_nothing() {
        let cfg = GameConfig::default();
        let mut rng = ScriptedRng::new([]);
        let before = idle_at(120.0);
        let t = apply_tick(&before, &cfg, &mut rng);
        assert!(t.is_noop(&before));
        assert!(t.events.is_empty());
    }

    #[test]
    fn tick_at_zero_countdown_resolves_once() {
        let cfg = GameConfig::default();
        let mut pending = idle_at(100.0);
        pending.phase = GamePhase::Pending;
        pending.purchase_price = Some(100.0);
        pending.countdown_remaining = 0;

        // win, magnitude 7.5
        let mut rng = ScriptedRng::new([0.1, 0.0]);
        let t = apply_tick(&pending, &cfg, &mut rng);

        assert!(t.session.is_resolved());
        assert_eq!(t.session.countdown_remaining, 10);
        assert_eq!(t.session.current_price, 107.5);
        let cents = t.session.current_price * 100.0;
        assert!((cents - cents.round()).abs() < 1e-6);
        assert_eq!(t.timer, TimerDirective::Cancel);
        let resolutions = t
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::OutcomeResolved { .. }))
            .count();
        assert_eq!(resolutions, 1);
        assert_eq!(rng.remaining(), 0);

        // A second tick on the resolved session is inert.
        let again = apply_tick(&t.session, &cfg, &mut rng);
        assert!(again.is_noop(&t.session));
    }

    #[test]
    fn fresh_session_draws_price_then_symbol() {
        let cfg = GameConfig::default();
        // price draw 0.5 -> 175.00, symbol draw 0.0 -> index 0
        let mut rng = ScriptedRng::new([0.5, 0.0]);
        let s = GameSession::fresh(3, &cfg, &mut rng);
        assert_eq!(s.current_price, 175.0);
        assert_eq!(s.instrument_symbol, "AAPL");
        assert_eq!(s.session_id, 3);
    }
}
