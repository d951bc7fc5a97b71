use tradesim_core::{
    engine::GameEngine,
    event::GameEvent,
    session::GamePhase,
};

#[test]
fn timer_is_suspended_while_idle() {
    let mut engine = GameEngine::build(1).unwrap();
    assert!(engine.pending_timer().is_none());
    let before = engine.session().clone();
    assert!(engine.tick().unwrap().is_empty());
    assert_eq!(engine.session(), &before);
}

#[test]
fn buy_arms_and_resolution_disarms() {
    let mut engine = GameEngine::build(2).unwrap();
    engine.buy().unwrap();
    let handle = engine.pending_timer().expect("armed on buy");
    assert_eq!(handle.session_id, engine.session().session_id);

    engine.run_countdown(100).unwrap();
    assert_eq!(engine.session().phase, GamePhase::Resolved);
    assert!(engine.pending_timer().is_none());
    assert_eq!(engine.timer().fired(), 10);
}

#[test]
fn stale_handle_cannot_touch_replaced_session() {
    let mut engine = GameEngine::build(3).unwrap();
    engine.buy().unwrap();
    let stale = engine.pending_timer().expect("armed");
    engine.tick().unwrap();

    engine.reset().unwrap();
    let fresh = engine.session().clone();

    let events = engine.fire(stale).unwrap();
    assert_eq!(engine.session(), &fresh);
    assert!(matches!(
        events.as_slice(),
        [GameEvent::StaleTickIgnored { session_id, current_session_id }]
            if *session_id == stale.session_id && *current_session_id == fresh.session_id
    ));
}

#[test]
fn handle_from_previous_round_is_rejected_after_rebuy() {
    let mut engine = GameEngine::build(4).unwrap();
    engine.buy().unwrap();
    let first = engine.pending_timer().expect("armed");
    engine.run_countdown(10).unwrap();
    engine.reset().unwrap();
    engine.buy().unwrap();
    let second = engine.pending_timer().expect("armed");
    assert_ne!(first, second);

    engine.fire(first).unwrap();
    assert_eq!(engine.session().countdown_remaining, 10);
    engine.fire(second).unwrap();
    assert_eq!(engine.session().countdown_remaining, 9);
}

#[test]
fn countdown_run_on_idle_engine_returns_immediately() {
    let mut engine = GameEngine::build(6).unwrap();
    let before = engine.session().clone();
    assert!(engine.run_countdown(u32::MAX).unwrap().is_empty());
    assert_eq!(engine.session(), &before);
    assert_eq!(engine.timer().fired(), 0);
}

#[test]
fn timer_period_is_one_second() {
    let engine = GameEngine::build(5).unwrap();
    assert_eq!(engine.timer().period(), std::time::Duration::from_secs(1));
}
