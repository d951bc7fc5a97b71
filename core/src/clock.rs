//! Countdown timer: an explicit, cancelable periodic task.
//!
//! The timer never fires on its own. Whoever drives the engine asks for
//! the armed `TimerHandle`, waits one `period`, then hands the handle
//! back through `GameEngine::fire`. A handle is bound to one session and
//! one arming; once the timer is cancelled or re-armed, old handles are
//! rejected, so a late firing can never touch a superseded session.

use crate::types::SessionId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    pub session_id: SessionId,
    /// Increases on every arm; distinguishes two armings of one session.
    pub generation: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickTimer {
    period:     Duration,
    armed:      Option<TimerHandle>,
    generation: u64,
    fired:      u64,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            armed: None,
            generation: 0,
            fired: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arm for `session_id`, replacing any previous arming.
    pub fn arm(&mut self, session_id: SessionId) -> TimerHandle {
        self.generation += 1;
        let handle = TimerHandle {
            session_id,
            generation: self.generation,
        };
        self.armed = Some(handle);
        handle
    }

    /// Cancel the armed task, if any. Returns the handle that was live.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.armed.take()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.armed
    }

    /// Accept a firing only if `handle` is the live arming.
    pub fn accept(&mut self, handle: TimerHandle) -> bool {
        if self.armed == Some(handle) {
            self.fired += 1;
            true
        } else {
            false
        }
    }

    /// Total accepted firings since construction.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}
