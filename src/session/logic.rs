//! Session state transitions: answers, timer ticks and restart.
//!
//! Score and life changes are always applied before the game-over check,
//! so the outcome of a step never depends on the order of those two effects.

use super::{SessionConfig, SessionMode, SessionState, SessionStatus};
use crate::constants::SCORE_PER_CORRECT;
use crate::puzzle::{next_puzzle_or_fallback, PuzzleSource};
use thiserror::Error;

/// Rejected answer input. Never reaches the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an answer")]
    Empty,
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("the session is over; restart to play again")]
    NotActive,
}

/// What a submitted answer did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub previous_score: u32,
    pub score: u32,
    pub lives: u32,
    /// The session ended on this answer
    pub game_over: bool,
}

impl AnswerOutcome {
    pub fn score_changed(&self) -> bool {
        self.score != self.previous_score
    }
}

/// Parse raw answer input into an integer.
pub fn parse_answer(input: &str) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))
}

/// Submit an answer to the current puzzle.
///
/// Correct answers add to the score, replace the puzzle and reset the
/// countdown. Wrong answers cost a life. In trial mode every answer spends
/// an attempt. The session ends when lives reach zero.
pub fn submit_answer(
    state: &mut SessionState,
    value: i64,
    source: &mut dyn PuzzleSource,
) -> Result<AnswerOutcome, SessionError> {
    if !state.is_active() {
        return Err(SessionError::NotActive);
    }

    let previous_score = state.score;
    let correct = state.current_puzzle.is_correct(value);

    if correct {
        state.score += SCORE_PER_CORRECT;
        state.current_puzzle = next_puzzle_or_fallback(source);
        if let Some(limit) = state.config.time_limit {
            state.time_remaining = limit;
        }
    }

    let spends_life = !correct || state.config.mode == SessionMode::Trial;
    if spends_life {
        state.lives = state.lives.saturating_sub(1);
    }

    let game_over = state.lives == 0;
    if game_over {
        state.status = SessionStatus::GameOver;
        tracing::info!(session = %state.id, score = state.score, "game over: out of lives");
    }

    Ok(AnswerOutcome {
        correct,
        previous_score,
        score: state.score,
        lives: state.lives,
        game_over,
    })
}

/// Advance the countdown by one second. Returns true if this tick ended
/// the session. No-op when the session is over or untimed.
pub fn tick(state: &mut SessionState) -> bool {
    if !state.is_active() || !state.config.is_timed() {
        return false;
    }

    state.time_remaining = state.time_remaining.saturating_sub(1);
    if state.time_remaining == 0 {
        state.status = SessionStatus::GameOver;
        tracing::info!(session = %state.id, score = state.score, "game over: time expired");
        return true;
    }
    false
}

/// Replace the session with a fresh one using the same configuration.
pub fn restart(state: &mut SessionState, source: &mut dyn PuzzleSource) {
    let config: SessionConfig = state.config;
    *state = SessionState::new(config, next_puzzle_or_fallback(source));
    tracing::info!(session = %state.id, "session restarted");
}

/// Start a brand-new session.
pub fn start(config: SessionConfig, source: &mut dyn PuzzleSource) -> SessionState {
    let state = SessionState::new(config, next_puzzle_or_fallback(source));
    tracing::info!(session = %state.id, mode = ?config.mode, "session started");
    state
}
