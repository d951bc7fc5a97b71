//! The game engine: the single owner of the live session.
//!
//! RULES:
//!   - Only the engine commits transitions; it is the one logical actor
//!     mutating game state, so actions and ticks are serialized.
//!   - All randomness flows through the injected `RandomSource`.
//!   - The periodic timer is armed on buy and cancelled on resolution or
//!     reset, before the old session is discarded.
//!   - Invariants are checked after every committed transition.

use crate::{
    clock::{TickTimer, TimerHandle},
    command::PlayerCommand,
    config::GameConfig,
    error::GameResult,
    event::GameEvent,
    invariants::check_invariants,
    rng::{GameRng, RandomSource},
    session::{apply_buy, apply_reset, apply_tick, GameSession, TimerDirective, Transition},
    snapshot::GameSnapshot,
};

pub struct GameEngine {
    config:  GameConfig,
    session: GameSession,
    timer:   TickTimer,
    rng:     Box<dyn RandomSource>,
}

impl GameEngine {
    /// Build an engine around an injected random source. The first
    /// session is drawn immediately and starts Idle.
    pub fn new(config: GameConfig, mut rng: Box<dyn RandomSource>) -> GameResult<Self> {
        config.validate()?;
        let session = GameSession::fresh(0, &config, rng.as_mut());
        check_invariants(&session, &config)?;
        log::debug!(
            "session {} started: {} @ {:.2}",
            session.session_id,
            session.instrument_symbol,
            session.current_price
        );
        Ok(Self {
            timer: TickTimer::new(config.tick_period()),
            config,
            session,
            rng,
        })
    }

    /// Standard constants, seeded PCG source.
    pub fn build(seed: u64) -> GameResult<Self> {
        Self::new(GameConfig::default(), Box::new(GameRng::new(seed)))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// The live timer handle, if the countdown is running.
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.timer.handle()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.session, self.timer.is_armed())
    }

    /// Event announcing the current session, for drivers that want a
    /// journal starting from engine creation.
    pub fn opening_event(&self) -> GameEvent {
        self.session.started_event()
    }

    pub fn buy(&mut self) -> GameResult<Vec<GameEvent>> {
        let transition = apply_buy(&self.session, &self.config);
        self.commit(transition)
    }

    pub fn reset(&mut self) -> GameResult<Vec<GameEvent>> {
        let transition = apply_reset(&self.session, &self.config, self.rng.as_mut());
        self.commit(transition)
    }

    /// Fire the live timer once. A no-op when the timer is not armed.
    pub fn tick(&mut self) -> GameResult<Vec<GameEvent>> {
        match self.timer.handle() {
            Some(handle) => self.fire(handle),
            None => Ok(vec![]),
        }
    }

    /// Deliver one firing of a previously armed timer. Handles from a
    /// cancelled arming or a replaced session are ignored.
    pub fn fire(&mut self, handle: TimerHandle) -> GameResult<Vec<GameEvent>> {
        if !self.timer.accept(handle) {
            log::debug!(
                "ignoring stale tick for session {} (live session {})",
                handle.session_id,
                self.session.session_id
            );
            return Ok(vec![GameEvent::StaleTickIgnored {
                session_id:         handle.session_id,
                current_session_id: self.session.session_id,
            }]);
        }
        let transition = apply_tick(&self.session, &self.config, self.rng.as_mut());
        self.commit(transition)
    }

    /// Fire the timer until it disarms or `max` firings have happened.
    pub fn run_countdown(&mut self, max: u32) -> GameResult<Vec<GameEvent>> {
        let mut events = Vec::new();
        for _ in 0..max {
            if !self.timer.is_armed() {
                break;
            }
            events.extend(self.tick()?);
        }
        Ok(events)
    }

    pub fn submit(&mut self, command: PlayerCommand) -> GameResult<Vec<GameEvent>> {
        log::debug!("command received: {}", command.name());
        match command {
            PlayerCommand::Buy   => self.buy(),
            PlayerCommand::Reset => self.reset(),
        }
    }

    fn commit(&mut self, transition: Transition) -> GameResult<Vec<GameEvent>> {
        let Transition { session, events, timer } = transition;
        check_invariants(&session, &self.config)?;

        match timer {
            TimerDirective::Keep => {}
            TimerDirective::Arm => {
                let handle = self.timer.arm(session.session_id);
                log::debug!("timer armed for session {}", handle.session_id);
            }
            TimerDirective::Cancel => {
                if let Some(handle) = self.timer.cancel() {
                    log::debug!("timer cancelled for session {}", handle.session_id);
                }
            }
        }

        for event in &events {
            match event {
                GameEvent::OutcomeResolved { session_id, won, purchase_price, new_price, .. } => {
                    log::info!(
                        "session {session_id} resolved: {} {purchase_price:.2} -> {new_price:.2}",
                        if *won { "win" } else { "loss" }
                    );
                }
                other => log::debug!("{}: {:?}", other.type_name(), other),
            }
        }

        self.session = session;
        Ok(events)
    }
}

impl Drop for GameEngine {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}
