//! Play session: lives, score, countdown and the game-over transition.

pub mod logic;
pub mod types;

pub use logic::{
    parse_answer, restart, start, submit_answer, tick, AnswerOutcome, SessionError,
    ValidationError,
};
pub use types::{SessionConfig, SessionMode, SessionState, SessionStatus};
