//! Puzzle verification.
//!
//! Evaluates a puzzle statement with the placeholder substituted and checks
//! that both sides of the `=` agree. Multiplication binds tighter than
//! addition and subtraction.

use super::Puzzle;
use crate::constants::PLACEHOLDER;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Num(i64),
    Plus,
    Minus,
    Times,
}

fn tokenize(side: &str, value: i64) -> Option<Vec<Token>> {
    side.split_whitespace()
        .map(|word| match word {
            "+" => Some(Token::Plus),
            "-" => Some(Token::Minus),
            "\u{00D7}" | "*" | "x" => Some(Token::Times),
            w if w == PLACEHOLDER => Some(Token::Num(value)),
            w => w.parse::<i64>().ok().map(Token::Num),
        })
        .collect()
}

/// Evaluate `n (op n)*` as a sum of products.
fn evaluate(tokens: &[Token]) -> Option<i64> {
    let mut total: i64 = 0;
    let mut sign: i64 = 1;
    let mut product: Option<i64> = None;
    let mut expect_number = true;

    for token in tokens {
        match (*token, expect_number) {
            (Token::Num(n), true) => {
                product = Some(match product {
                    Some(p) => p.checked_mul(n)?,
                    None => n,
                });
                expect_number = false;
            }
            (Token::Times, false) => expect_number = true,
            (Token::Plus, false) | (Token::Minus, false) => {
                total = total.checked_add(sign * product.take()?)?;
                sign = if *token == Token::Plus { 1 } else { -1 };
                expect_number = true;
            }
            _ => return None,
        }
    }

    if expect_number {
        return None;
    }
    total.checked_add(sign * product?)
}

/// Check whether `prompt` holds when its placeholder takes `value`.
/// Returns `None` if the statement is malformed.
pub fn statement_holds(prompt: &str, value: i64) -> Option<bool> {
    if prompt.matches(PLACEHOLDER).count() != 1 {
        return None;
    }
    let (lhs, rhs) = prompt.split_once('=')?;
    if rhs.contains('=') {
        return None;
    }
    let left = evaluate(&tokenize(lhs, value)?)?;
    let right = evaluate(&tokenize(rhs, value)?)?;
    Some(left == right)
}

/// True when the puzzle is well formed and its solution satisfies it.
pub fn verify(puzzle: &Puzzle) -> bool {
    statement_holds(&puzzle.prompt, i64::from(puzzle.solution)) == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_forward_statement() {
        assert_eq!(statement_holds("7 + 5 = \u{1F34C}", 12), Some(true));
        assert_eq!(statement_holds("7 + 5 = \u{1F34C}", 13), Some(false));
    }

    #[test]
    fn test_precedence_multiplication_first() {
        // 2 + 3 × 4 is 14, not 20
        assert_eq!(statement_holds("2 + 3 \u{00D7} 4 = \u{1F34C}", 14), Some(true));
        assert_eq!(statement_holds("2 + 3 \u{00D7} 4 = \u{1F34C}", 20), Some(false));
    }

    #[test]
    fn test_subtraction_chain() {
        assert_eq!(statement_holds("\u{1F34C} - 7 + 3 = 10", 14), Some(true));
        assert_eq!(statement_holds("20 - \u{1F34C} = 8", 12), Some(true));
    }

    #[test]
    fn test_multiply_then_add() {
        assert_eq!(statement_holds("2 \u{00D7} \u{1F34C} + 5 = 15", 5), Some(true));
    }

    #[test]
    fn test_malformed_statements() {
        assert_eq!(statement_holds("7 + 5 = 12", 12), None);
        assert_eq!(statement_holds("\u{1F34C} + \u{1F34C} = 4", 2), None);
        assert_eq!(statement_holds("7 + = \u{1F34C}", 7), None);
        assert_eq!(statement_holds("7 + 5 \u{1F34C}", 12), None);
        assert_eq!(statement_holds("seven + 5 = \u{1F34C}", 12), None);
    }

    #[test]
    fn test_verify_fallback() {
        assert!(verify(&Puzzle::fallback()));
        assert!(!verify(&Puzzle::new("\u{1F34C} + 2 = 5", 4)));
    }
}
