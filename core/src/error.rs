use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invariant '{name}' violated in session {session_id}")]
    InvariantViolation { name: &'static str, session_id: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
