//! Random number sources.
//!
//! RULE: Nothing in the game may call a platform RNG directly.
//! Every draw (symbol, initial price, win/loss, magnitude) flows through
//! a `RandomSource` handed to the engine, so a test can fix the exact
//! sequence of draws and a seed reproduces a whole play-through.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use std::collections::VecDeque;

/// A source of uniform draws in [0.0, 1.0).
///
/// Every other helper is expressed in terms of `next_f64`, so a scripted
/// source only has to supply floats.
pub trait RandomSource: Send {
    /// Roll a float in [0.0, 1.0).
    fn next_f64(&mut self) -> f64;

    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "len must be > 0");
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len - 1)
    }
}

/// Seeded PCG source used by the live game.
pub struct GameRng {
    inner: Pcg64Mcg,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl RandomSource for GameRng {
    fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Replays a fixed list of draws, then falls back to `fallback`.
///
/// Used by tests that assert exact prices and phases.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws:    VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRng {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws:    draws.into_iter().collect(),
            fallback: 0.5,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}
