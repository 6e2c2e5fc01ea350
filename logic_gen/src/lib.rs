//! Procedural generation of solvable puzzle circuits.
//!
//! The generator builds a layered random graph from a [`DifficultyProfile`],
//! then brute-forces the free inputs to confirm the desired output is
//! reachable, retrying with fresh random draws until it is.
//!
//! All randomness flows through a caller-supplied [`rand::Rng`];
//! [`rand_chacha::ChaCha8Rng`] is re-exported as the seedable default.

mod error;
mod generate;
mod profile;
mod solve;

pub use error::GenerateError;
pub use generate::{MAX_GENERATION_ATTEMPTS, generate};
pub use profile::{DifficultyProfile, ProbabilityCurve};
pub use solve::{SOLVE_INPUT_CEILING, first_solution, is_solvable, truth_table};

pub use rand_chacha::ChaCha8Rng;
