//! Arithmetic puzzles: generation, verification and the fallback policy.

pub mod generation;
pub mod types;
pub mod verify;

pub use generation::{
    generate, next_puzzle_or_fallback, GeneratorError, PuzzleSource, RandomPuzzleSource,
};
pub use types::{ComplexPattern, Puzzle, PuzzleFamily};
pub use verify::verify;
