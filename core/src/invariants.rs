//! Invariant checker for game sessions.

use crate::{
    config::GameConfig,
    error::{GameError, GameResult},
    session::{GamePhase, GameSession},
};

/// Check all session invariants. Returns Err naming the first violated.
pub fn check_invariants(session: &GameSession, config: &GameConfig) -> GameResult<()> {
    let violated = |name: &'static str| GameError::InvariantViolation {
        name,
        session_id: session.session_id,
    };

    // PurchaseIffPosition
    let holds_position = matches!(session.phase, GamePhase::Pending | GamePhase::Resolved);
    if holds_position != session.purchase_price.is_some() {
        return Err(violated("PurchaseIffPosition"));
    }

    // PriceAboveFloor
    if !(session.current_price >= config.price_floor) {
        return Err(violated("PriceAboveFloor"));
    }

    // CountdownBounded
    if session.countdown_remaining > config.countdown_seconds {
        return Err(violated("CountdownBounded"));
    }

    // CountdownArmedOutsidePending
    if !session.is_pending() && session.countdown_remaining != config.countdown_seconds {
        return Err(violated("CountdownArmedOutsidePending"));
    }

    // PendingCountdownPositive
    if session.is_pending() && session.countdown_remaining == 0 {
        return Err(violated("PendingCountdownPositive"));
    }

    // SymbolFromCatalog
    if !config.symbols.iter().any(|s| *s == session.instrument_symbol) {
        return Err(violated("SymbolFromCatalog"));
    }

    Ok(())
}
