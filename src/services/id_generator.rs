//! Short identifier generation
//!
//! Generators are pure: they never talk to storage. Uniqueness is only
//! probabilistic; `LinkStore::insert` rejects the rare collision and
//! `LinkService` retries.

use crate::utils::generate_random_code;

pub const MIN_ID_LENGTH: usize = 4;
pub const MAX_ID_LENGTH: usize = 32;

pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random ids over the 64-character URL-safe alphabet
/// (`A-Z a-z 0-9 _ -`). At the default length of 7 there are 64^7 (about
/// 4.4e12) possible ids.
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    length: usize,
}

impl RandomIdGenerator {
    /// Length is clamped to `MIN_ID_LENGTH..=MAX_ID_LENGTH`.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_ID_LENGTH, MAX_ID_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new(7)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        generate_random_code(self.length)
    }
}
