//! Profile sync between the local cache and the remote profile store.
//!
//! Fetch failures fall back to a default profile; push failures are
//! dropped. Both only ever produce a warning.

pub mod store;
pub mod types;
pub mod worker;

pub use store::{HttpProfileStore, MemoryProfileStore, ProfileStore};
pub use types::{
    decode_profile_response, decode_push_response, ProfileRecord, SyncError, SyncEvent,
};
pub use worker::SyncWorker;

use crate::economy::EconomyProfile;

/// Turn a fetch result into a usable profile plus an optional warning.
pub fn resolve_fetch(
    user: &str,
    result: Result<EconomyProfile, SyncError>,
) -> (EconomyProfile, Option<SyncError>) {
    match result {
        Ok(profile) => (profile, None),
        Err(e) => {
            tracing::warn!(user, error = %e, "profile fetch failed, using default profile");
            (EconomyProfile::default(), Some(e))
        }
    }
}

/// Fetch a profile synchronously, falling back to a default profile.
pub fn fetch_profile(
    store: &dyn ProfileStore,
    user: &str,
) -> (EconomyProfile, Option<SyncError>) {
    resolve_fetch(user, store.fetch(user).map(ProfileRecord::into_profile))
}

/// Push a profile once. A failure is logged and returned, never retried.
pub fn push_profile(
    store: &dyn ProfileStore,
    user: &str,
    profile: &EconomyProfile,
) -> Option<SyncError> {
    match store.push(&ProfileRecord::from_profile(user, profile)) {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(user, error = %e, "profile push failed");
            Some(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_profile_falls_back_on_missing_user() {
        let store = MemoryProfileStore::new();
        let (profile, warning) = fetch_profile(&store, "ghost");
        assert_eq!(profile, EconomyProfile::default());
        assert_eq!(warning, Some(SyncError::NotFound("ghost".to_string())));
    }

    #[test]
    fn test_fetch_profile_success() {
        let store = MemoryProfileStore::with_record(ProfileRecord {
            username: "kiwi".to_string(),
            coins: 40,
            themes: "default,dark".to_string(),
            themes_s: "dark".to_string(),
            high_score: 90,
        });
        let (profile, warning) = fetch_profile(&store, "kiwi");
        assert!(warning.is_none());
        assert_eq!(profile.coins, 40);
        assert_eq!(profile.selected_theme_id, "dark");
        assert_eq!(profile.high_score, 90);
    }

    #[test]
    fn test_push_profile_swallows_failure() {
        let store = MemoryProfileStore::new();
        store.set_offline(true);
        let warning = push_profile(&store, "kiwi", &EconomyProfile::default());
        assert!(matches!(warning, Some(SyncError::Transport(_))));
        assert!(store.record("kiwi").is_none());
    }

    #[test]
    fn test_push_then_fetch() {
        let store = MemoryProfileStore::new();
        let mut profile = EconomyProfile::default();
        profile.coins = 3;
        assert!(push_profile(&store, "kiwi", &profile).is_none());

        let (fetched, _) = fetch_profile(&store, "kiwi");
        assert_eq!(fetched, profile);
    }
}
