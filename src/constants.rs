// Session
pub const STARTING_LIVES: u32 = 3;
pub const TIME_LIMIT_SECONDS: u32 = 60;
pub const SCORE_PER_CORRECT: u32 = 10;
pub const TICK_INTERVAL_MS: u64 = 1000;

// Trial mode (anonymous play)
pub const TRIAL_ATTEMPTS: u32 = 3;

// Economy
pub const MILESTONE_BAND: u32 = 30;
pub const COINS_PER_MILESTONE: u64 = 1;
pub const END_OF_SESSION_DIVISOR: u32 = 10;

// Puzzles
pub const PLACEHOLDER: &str = "\u{1F34C}"; // 🍌
pub const FALLBACK_PROMPT: &str = "\u{1F34C} + 2 = 5";
pub const FALLBACK_SOLUTION: u32 = 3;
/// Upper bound for any number appearing in a puzzle, solution included.
pub const MAX_PUZZLE_VALUE: u32 = 100;

// Themes
pub const DEFAULT_THEME_ID: &str = "default";
pub const IMAGE_BACKGROUND_SIZE: &str = "1500px auto";

// Sync
pub const DEFAULT_API_BASE: &str = "http://localhost:8001/banamatix_backend";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

// UI
pub const MAX_NOTICES: usize = 5;
pub const NOTICE_TTL_SECONDS: i64 = 4;
