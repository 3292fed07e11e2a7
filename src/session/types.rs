//! Session state data structures.

use crate::constants::{STARTING_LIVES, TIME_LIMIT_SECONDS, TRIAL_ATTEMPTS};
use crate::puzzle::Puzzle;
use uuid::Uuid;

/// Lifecycle of a session. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    GameOver,
}

/// How the session was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Logged-in play: lives, optional countdown, coins.
    Player,
    /// Anonymous play: every answer spends an attempt, no timer, no coins.
    Trial,
}

/// Fixed parameters of a session, kept across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: SessionMode,
    pub starting_lives: u32,
    /// Countdown ceiling in seconds; `None` disables the timer.
    pub time_limit: Option<u32>,
}

impl SessionConfig {
    pub fn player(timed: bool) -> Self {
        Self {
            mode: SessionMode::Player,
            starting_lives: STARTING_LIVES,
            time_limit: timed.then_some(TIME_LIMIT_SECONDS),
        }
    }

    pub fn trial() -> Self {
        Self {
            mode: SessionMode::Trial,
            starting_lives: TRIAL_ATTEMPTS,
            time_limit: None,
        }
    }

    pub fn is_timed(&self) -> bool {
        self.time_limit.is_some()
    }

    pub fn earns_coins(&self) -> bool {
        self.mode == SessionMode::Player
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::player(true)
    }
}

/// Full state of one play session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Fresh per session; restart produces a new id
    pub id: Uuid,
    pub config: SessionConfig,
    pub lives: u32,
    pub score: u32,
    /// Seconds left on the countdown (stays at 0 when untimed)
    pub time_remaining: u32,
    pub status: SessionStatus,
    /// Puzzle being answered. After game over it still holds the last puzzle.
    pub current_puzzle: Puzzle,
}

impl SessionState {
    pub fn new(config: SessionConfig, puzzle: Puzzle) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            lives: config.starting_lives,
            score: 0,
            time_remaining: config.time_limit.unwrap_or(0),
            status: SessionStatus::Active,
            current_puzzle: puzzle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn is_game_over(&self) -> bool {
        self.status == SessionStatus::GameOver
    }
}
