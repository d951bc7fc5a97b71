use serde::{Deserialize, Serialize};

/// Intents forwarded from the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlayerCommand {
    Buy,
    Reset,
}

impl PlayerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Buy   => "buy",
            Self::Reset => "reset",
        }
    }
}
