//! Economy data structures.

use crate::constants::DEFAULT_THEME_ID;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// A player's coins, best score and theme ownership.
///
/// Invariants: `owned_theme_ids` always contains the default theme and
/// `selected_theme_id` is always owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyProfile {
    pub coins: u64,
    pub high_score: u32,
    pub owned_theme_ids: BTreeSet<String>,
    pub selected_theme_id: String,
}

impl Default for EconomyProfile {
    fn default() -> Self {
        let mut owned = BTreeSet::new();
        owned.insert(DEFAULT_THEME_ID.to_string());
        Self {
            coins: 0,
            high_score: 0,
            owned_theme_ids: owned,
            selected_theme_id: DEFAULT_THEME_ID.to_string(),
        }
    }
}

impl EconomyProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owns(&self, theme_id: &str) -> bool {
        self.owned_theme_ids.contains(theme_id)
    }

    /// Restore the ownership invariants on data from an untrusted source.
    pub fn normalized(mut self) -> Self {
        self.owned_theme_ids.retain(|id| !id.trim().is_empty());
        self.owned_theme_ids.insert(DEFAULT_THEME_ID.to_string());
        if !self.owns(&self.selected_theme_id) {
            self.selected_theme_id = DEFAULT_THEME_ID.to_string();
        }
        self
    }

    pub fn is_consistent(&self) -> bool {
        self.owns(DEFAULT_THEME_ID) && self.owns(&self.selected_theme_id)
    }
}

/// Coin reward scheme. Exactly one is active for a run of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPolicy {
    /// One coin each time the score enters a new band of 30
    #[default]
    Milestone,
    /// floor(final score / 10) coins once the session ends
    EndOfSession,
}

impl RewardPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Milestone => "milestone",
            Self::EndOfSession => "end_of_session",
        }
    }
}

/// A store action that was refused. The profile is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("Not enough coins! ({coins}/{price})")]
    InsufficientFunds { price: u64, coins: u64 },
    #[error("Already unlocked!")]
    AlreadyOwned,
    #[error("Theme not unlocked yet")]
    NotOwned,
    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_owns_default_theme() {
        let profile = EconomyProfile::new();
        assert!(profile.owns("default"));
        assert_eq!(profile.selected_theme_id, "default");
        assert_eq!(profile.coins, 0);
        assert!(profile.is_consistent());
    }

    #[test]
    fn test_normalized_repairs_selection() {
        let mut profile = EconomyProfile::new();
        profile.owned_theme_ids.clear();
        profile.selected_theme_id = "royal".to_string();

        let profile = profile.normalized();
        assert!(profile.owns("default"));
        assert_eq!(profile.selected_theme_id, "default");
    }

    #[test]
    fn test_normalized_keeps_valid_selection() {
        let mut profile = EconomyProfile::new();
        profile.owned_theme_ids.insert("dark".to_string());
        profile.selected_theme_id = "dark".to_string();

        let profile = profile.normalized();
        assert_eq!(profile.selected_theme_id, "dark");
    }

    #[test]
    fn test_profile_json_missing_fields() {
        let profile: EconomyProfile = serde_json::from_str(r#"{"coins": 7}"#).unwrap();
        assert_eq!(profile.coins, 7);
        assert!(profile.owns("default"));
    }

    #[test]
    fn test_reward_policy_serde() {
        let policy: RewardPolicy = serde_json::from_str("\"end_of_session\"").unwrap();
        assert_eq!(policy, RewardPolicy::EndOfSession);
        assert_eq!(RewardPolicy::default().name(), "milestone");
    }
}
