//! Puzzle data structures.
//!
//! A puzzle is a short arithmetic statement with exactly one unknown,
//! rendered as a banana, plus the integer that makes the statement true.

use crate::constants::{FALLBACK_PROMPT, FALLBACK_SOLUTION, PLACEHOLDER};

/// A single arithmetic puzzle. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Human-readable statement, e.g. "7 + 5 = 🍌"
    pub prompt: String,
    /// Value that satisfies the statement when substituted for the placeholder
    pub solution: u32,
}

impl Puzzle {
    pub fn new(prompt: impl Into<String>, solution: u32) -> Self {
        Self {
            prompt: prompt.into(),
            solution,
        }
    }

    /// The always-solvable puzzle used whenever a source cannot deliver one.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_PROMPT, FALLBACK_SOLUTION)
    }

    pub fn is_correct(&self, value: i64) -> bool {
        value == i64::from(self.solution)
    }

    /// Number of placeholder tokens in the prompt (exactly one for a valid puzzle).
    pub fn placeholder_count(&self) -> usize {
        self.prompt.matches(PLACEHOLDER).count()
    }
}

/// The four puzzle families, picked uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleFamily {
    /// a + b = 🍌
    Addition,
    /// a × b = 🍌
    Multiplication,
    /// a + b × c = 🍌
    Mixed,
    /// Unknown placed somewhere other than the result
    Complex(ComplexPattern),
}

impl PuzzleFamily {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Addition => "Addition",
            Self::Multiplication => "Multiplication",
            Self::Mixed => "Mixed",
            Self::Complex(_) => "Complex",
        }
    }
}

/// Sub-patterns of the complex family, each putting the unknown in a different slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexPattern {
    /// 🍌 + b = r
    Addend,
    /// t - 🍌 = r
    Subtrahend,
    /// m × 🍌 = r
    Multiplicand,
    /// 🍌 - b + c = r
    SubtractThenAdd,
    /// m × 🍌 + a = r
    MultiplyThenAdd,
}

impl ComplexPattern {
    pub const ALL: [ComplexPattern; 5] = [
        ComplexPattern::Addend,
        ComplexPattern::Subtrahend,
        ComplexPattern::Multiplicand,
        ComplexPattern::SubtractThenAdd,
        ComplexPattern::MultiplyThenAdd,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(ComplexPattern::Addend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_puzzle() {
        let puzzle = Puzzle::fallback();
        assert_eq!(puzzle.prompt, "\u{1F34C} + 2 = 5");
        assert_eq!(puzzle.solution, 3);
        assert_eq!(puzzle.placeholder_count(), 1);
    }

    #[test]
    fn test_is_correct() {
        let puzzle = Puzzle::new("7 + 5 = \u{1F34C}", 12);
        assert!(puzzle.is_correct(12));
        assert!(!puzzle.is_correct(11));
        assert!(!puzzle.is_correct(-12));
    }

    #[test]
    fn test_complex_from_index() {
        assert_eq!(ComplexPattern::from_index(0), ComplexPattern::Addend);
        assert_eq!(ComplexPattern::from_index(4), ComplexPattern::MultiplyThenAdd);
        assert_eq!(ComplexPattern::from_index(99), ComplexPattern::Addend);
    }

    #[test]
    fn test_family_names() {
        assert_eq!(PuzzleFamily::Addition.name(), "Addition");
        assert_eq!(
            PuzzleFamily::Complex(ComplexPattern::Subtrahend).name(),
            "Complex"
        );
    }
}
