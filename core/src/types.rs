//! Shared primitive types used across the entire game.

/// A price in dollars. Always held at cent precision once rounded.
pub type Price = f64;

/// A countdown length or remainder, in whole seconds.
pub type Seconds = u32;

/// Identity of one session within one engine. Increases on every reset.
pub type SessionId = u64;
