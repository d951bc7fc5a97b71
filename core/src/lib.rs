//! tradesim-core: the game engine behind a single-screen simulated
//! stock-trading game. Buy at a random price, wait out the countdown,
//! see whether the weighted coin went your way, reset, repeat.

pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod invariants;
pub mod price;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod types;
