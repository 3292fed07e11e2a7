//! Puzzle generation.
//!
//! Families are picked uniformly; the complex family then picks one of its
//! five patterns uniformly. Unknown-in-position patterns sample the unknown
//! first and derive the closing result from it, so every value stays
//! positive and small enough to solve mentally.

use super::verify::verify;
use super::{ComplexPattern, Puzzle, PuzzleFamily};
use crate::constants::PLACEHOLDER;
use rand::Rng;
use thiserror::Error;

const TIMES: &str = "\u{00D7}";

/// Why a puzzle source could not deliver a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("puzzle source unavailable: {0}")]
    Unavailable(String),
    #[error("puzzle does not verify: {0}")]
    Invalid(String),
}

/// Anything that can hand out puzzles. Local generation never fails;
/// remote sources may.
pub trait PuzzleSource {
    fn next_puzzle(&mut self) -> Result<Puzzle, GeneratorError>;
}

/// Local random generator over the four families.
#[derive(Debug, Clone)]
pub struct RandomPuzzleSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPuzzleSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PuzzleSource for RandomPuzzleSource<R> {
    fn next_puzzle(&mut self) -> Result<Puzzle, GeneratorError> {
        Ok(generate(&mut self.rng))
    }
}

/// Ask the source for a puzzle, substituting the fallback puzzle when the
/// source fails or returns something that does not verify.
pub fn next_puzzle_or_fallback(source: &mut dyn PuzzleSource) -> Puzzle {
    match source.next_puzzle() {
        Ok(puzzle) if verify(&puzzle) => puzzle,
        Ok(puzzle) => {
            tracing::warn!(prompt = %puzzle.prompt, "discarding inconsistent puzzle");
            Puzzle::fallback()
        }
        Err(e) => {
            tracing::warn!(error = %e, "puzzle source failed, using fallback");
            Puzzle::fallback()
        }
    }
}

/// Pick a family uniformly (and a pattern uniformly within the complex family).
pub fn pick_family<R: Rng>(rng: &mut R) -> PuzzleFamily {
    match rng.gen_range(0..4) {
        0 => PuzzleFamily::Addition,
        1 => PuzzleFamily::Multiplication,
        2 => PuzzleFamily::Mixed,
        _ => PuzzleFamily::Complex(ComplexPattern::from_index(
            rng.gen_range(0..ComplexPattern::ALL.len()),
        )),
    }
}

/// Generate a fresh puzzle from a uniformly chosen family.
pub fn generate<R: Rng>(rng: &mut R) -> Puzzle {
    let family = pick_family(rng);
    tracing::trace!(family = family.name(), "generating puzzle");
    generate_family(family, rng)
}

pub fn generate_family<R: Rng>(family: PuzzleFamily, rng: &mut R) -> Puzzle {
    match family {
        PuzzleFamily::Addition => generate_addition(rng),
        PuzzleFamily::Multiplication => generate_multiplication(rng),
        PuzzleFamily::Mixed => generate_mixed(rng),
        PuzzleFamily::Complex(pattern) => generate_complex(pattern, rng),
    }
}

fn generate_addition<R: Rng>(rng: &mut R) -> Puzzle {
    let a = rng.gen_range(1..=20);
    let b = rng.gen_range(1..=20);
    Puzzle::new(format!("{} + {} = {}", a, b, PLACEHOLDER), a + b)
}

fn generate_multiplication<R: Rng>(rng: &mut R) -> Puzzle {
    let a = rng.gen_range(1..=10);
    let b = rng.gen_range(1..=10);
    Puzzle::new(format!("{} {} {} = {}", a, TIMES, b, PLACEHOLDER), a * b)
}

fn generate_mixed<R: Rng>(rng: &mut R) -> Puzzle {
    let a = rng.gen_range(1..=15);
    let b = rng.gen_range(1..=10);
    let c = rng.gen_range(1..=5);
    Puzzle::new(
        format!("{} + {} {} {} = {}", a, b, TIMES, c, PLACEHOLDER),
        a + b * c,
    )
}

fn generate_complex<R: Rng>(pattern: ComplexPattern, rng: &mut R) -> Puzzle {
    match pattern {
        ComplexPattern::Addend => {
            let answer = rng.gen_range(1..=20);
            let b = rng.gen_range(1..=10);
            Puzzle::new(format!("{} + {} = {}", PLACEHOLDER, b, answer + b), answer)
        }
        ComplexPattern::Subtrahend => {
            // Answer first, then the total, so total - answer = result stays positive.
            let answer = rng.gen_range(1..=10);
            let result = rng.gen_range(1..=20);
            let total = answer + result;
            Puzzle::new(format!("{} - {} = {}", total, PLACEHOLDER, result), answer)
        }
        ComplexPattern::Multiplicand => {
            let multiplier = rng.gen_range(2..=6);
            let answer = rng.gen_range(1..=10);
            Puzzle::new(
                format!("{} {} {} = {}", multiplier, TIMES, PLACEHOLDER, multiplier * answer),
                answer,
            )
        }
        ComplexPattern::SubtractThenAdd => {
            // answer >= 5 > b keeps the intermediate positive
            let answer = rng.gen_range(5..=20);
            let b = rng.gen_range(1..=4);
            let c = rng.gen_range(1..=5);
            Puzzle::new(
                format!("{} - {} + {} = {}", PLACEHOLDER, b, c, answer - b + c),
                answer,
            )
        }
        ComplexPattern::MultiplyThenAdd => {
            let multiplier = rng.gen_range(2..=4);
            let answer = rng.gen_range(1..=8);
            let addend = rng.gen_range(1..=5);
            Puzzle::new(
                format!(
                    "{} {} {} + {} = {}",
                    multiplier,
                    TIMES,
                    PLACEHOLDER,
                    addend,
                    multiplier * answer + addend
                ),
                answer,
            )
        }
    }
}
