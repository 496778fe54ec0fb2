//! Game state machines. Each game is a pure machine: inputs arrive as
//! method calls, effects leave as [`crate::feedback::GameEvent`]s, and every
//! delay goes through the injected [`crate::feedback::Scheduler`], so the
//! machines run identically under a terminal UI and under tests.

pub mod build;
pub mod memory;
pub mod quiz;
pub mod sequence;
pub mod speed;
pub mod word_guess;

/// Points awarded for a correct answer, across games that keep score.
pub const POINTS_PER_HIT: u32 = 10;
