//! Coin reward accrual.
//!
//! Rewards are keyed on what has already been credited (the highest band
//! reached, or whether the session has been settled), never on how many
//! times an event was delivered, so replays cannot double-credit.

use super::{EconomyProfile, RewardPolicy};
use crate::constants::{COINS_PER_MILESTONE, END_OF_SESSION_DIVISOR, MILESTONE_BAND};

/// Band index of a score: 0 for 0..29, 1 for 30..59, ...
pub fn milestone_index(score: u32) -> u32 {
    score / MILESTONE_BAND
}

/// Coins earned by moving from `old_score` to `new_score` under the milestone scheme.
pub fn milestone_award(old_score: u32, new_score: u32) -> u64 {
    let crossed = milestone_index(new_score).saturating_sub(milestone_index(old_score));
    u64::from(crossed) * COINS_PER_MILESTONE
}

/// Coins earned at the end of a session under the end-of-session scheme.
pub fn end_of_session_award(final_score: u32) -> u64 {
    u64::from(final_score / END_OF_SESSION_DIVISOR)
}

/// Per-session reward bookkeeping. Reset when a new session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    policy: RewardPolicy,
    /// Highest milestone band already paid out this session
    credited_band: u32,
    /// End-of-session reward already paid out
    settled: bool,
}

impl Ledger {
    pub fn new(policy: RewardPolicy) -> Self {
        Self {
            policy,
            credited_band: 0,
            settled: false,
        }
    }

    pub fn policy(&self) -> RewardPolicy {
        self.policy
    }

    pub fn credited_band(&self) -> u32 {
        self.credited_band
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Forget what was credited; called when a fresh session begins.
    pub fn reset(&mut self) {
        self.credited_band = 0;
        self.settled = false;
    }

    /// Apply the reward for a new score. Returns the updated profile.
    pub fn on_score_changed(&mut self, new_score: u32, profile: &EconomyProfile) -> EconomyProfile {
        let mut updated = profile.clone();
        if self.policy != RewardPolicy::Milestone {
            return updated;
        }

        let credited_score = self.credited_band * MILESTONE_BAND;
        let coins = milestone_award(credited_score, new_score);
        if coins > 0 {
            updated.coins += coins;
            self.credited_band = milestone_index(new_score);
            tracing::info!(score = new_score, coins, total = updated.coins, "milestone reward");
        }
        updated
    }

    /// Settle the finished session: record the high score and, for the
    /// end-of-session scheme, pay out once.
    pub fn on_game_over(&mut self, final_score: u32, profile: &EconomyProfile) -> EconomyProfile {
        let mut updated = profile.clone();
        updated.high_score = updated.high_score.max(final_score);

        if self.policy == RewardPolicy::EndOfSession && !self.settled {
            let coins = end_of_session_award(final_score);
            updated.coins += coins;
            tracing::info!(score = final_score, coins, total = updated.coins, "session reward");
        }
        self.settled = true;
        updated
    }
}
