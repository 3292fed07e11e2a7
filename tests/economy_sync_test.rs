//! Integration test: Economy and profile sync
//!
//! Tests theme purchases against the ledger rules and the round trip of a
//! profile through the store: fetch fallback, wire format tolerance and the
//! unsynced degradation when the store is unreachable.

use banamatix::economy::{
    purchase_theme, select_theme, EconomyError, EconomyProfile, RewardPolicy,
};
use banamatix::game::{Game, GameEvent, ProfileSync};
use banamatix::notice::NoticeLevel;
use banamatix::puzzle::RandomPuzzleSource;
use banamatix::session::SessionConfig;
use banamatix::sync::{
    decode_profile_response, fetch_profile, push_profile, HttpProfileStore, MemoryProfileStore,
    ProfileRecord, ProfileStore, SyncError, SyncWorker,
};
use banamatix::themes::{all_themes, find_theme};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(2);

fn profile_with(coins: u64) -> EconomyProfile {
    EconomyProfile {
        coins,
        ..EconomyProfile::default()
    }
}

fn player_game(user: &str, store: Arc<dyn ProfileStore>) -> Game {
    Game::new(
        SessionConfig::player(true),
        RewardPolicy::Milestone,
        Some(user.to_string()),
        Box::new(RandomPuzzleSource::new(ChaCha8Rng::seed_from_u64(42))),
        Some(SyncWorker::spawn(store)),
    )
}

// =============================================================================
// Store rules
// =============================================================================

#[test]
fn test_purchase_without_funds_is_rejected_unchanged() {
    let profile = profile_with(40);
    let result = purchase_theme("dark", &profile);

    assert_eq!(
        result,
        Err(EconomyError::InsufficientFunds {
            price: 50,
            coins: 40
        })
    );
    assert_eq!(profile.coins, 40);
    assert!(!profile.owns("dark"));
}

#[test]
fn test_buy_every_theme_then_switch_back() {
    let total: u64 = all_themes().iter().map(|t| t.price).sum();
    let mut profile = profile_with(total);

    for theme in all_themes().iter().filter(|t| !t.is_free()) {
        profile = purchase_theme(theme.id, &profile).unwrap();
        assert_eq!(profile.selected_theme_id, theme.id);
        assert!(profile.is_consistent());
    }
    assert_eq!(profile.coins, 0);

    profile = select_theme("default", &profile).unwrap();
    assert_eq!(profile.selected_theme_id, "default");
    assert_eq!(profile.owned_theme_ids.len(), all_themes().len());
}

#[test]
fn test_catalog_prices() {
    assert_eq!(find_theme("default").map(|t| t.price), Some(0));
    assert_eq!(find_theme("dark").map(|t| t.price), Some(50));
    assert_eq!(find_theme("royal").map(|t| t.price), Some(100));
}

// =============================================================================
// Store round trip
// =============================================================================

#[test]
fn test_profile_round_trips_through_store() {
    let store = MemoryProfileStore::new();
    let mut profile = purchase_theme("dark", &profile_with(75)).unwrap();
    profile.high_score = 120;

    assert_eq!(push_profile(&store, "kiwi", &profile), None);
    let record = store.record("kiwi").unwrap();
    assert_eq!(record.themes_s, "dark");

    let (fetched, warning) = fetch_profile(&store, "kiwi");
    assert!(warning.is_none());
    assert_eq!(fetched, profile);
}

#[test]
fn test_legacy_envelope_decodes() {
    let body = r#"{"status":"success","user":{"username":"kiwi","coins":"12","themes":"default,royal","themes_s":"royal","highScore":90}}"#;
    let record = decode_profile_response(body).unwrap();
    let profile = record.into_profile();

    assert_eq!(profile.coins, 12);
    assert_eq!(profile.selected_theme_id, "royal");
    assert!(profile.owns("royal"));
    assert_eq!(profile.high_score, 90);
}

#[test]
fn test_unreachable_store_degrades_to_default() {
    let store = HttpProfileStore::new("http://127.0.0.1:9", None, 1);
    let (profile, warning) = fetch_profile(&store, "kiwi");

    assert_eq!(profile, EconomyProfile::default());
    assert!(matches!(warning, Some(SyncError::Transport(_))));
}

// =============================================================================
// Game against a store
// =============================================================================

#[test]
fn test_missing_profile_plays_unsynced() {
    let store = Arc::new(MemoryProfileStore::new());
    let mut game = player_game("ghost", store.clone());
    assert!(game.wait_sync(WAIT));

    assert_eq!(game.profile_sync(), ProfileSync::Local);
    assert!(game.notices.has_level(NoticeLevel::Warning));
    assert!(game.session.is_active());

    for _ in 0..3 {
        let answer = game.session.current_puzzle.solution.to_string();
        game.handle(GameEvent::Submit(answer));
    }
    assert_eq!(game.profile.coins, 1);
    assert_eq!(store.push_count(), 0);
}

#[test]
fn test_earned_coins_buy_a_theme_and_sync() {
    let store = Arc::new(MemoryProfileStore::with_record(ProfileRecord {
        username: "kiwi".to_string(),
        coins: 45,
        themes: "default".to_string(),
        themes_s: "default".to_string(),
        high_score: 0,
    }));
    let mut game = player_game("kiwi", store.clone());
    assert!(game.wait_sync(WAIT));
    assert_eq!(game.profile.coins, 45);

    game.handle(GameEvent::Purchase("dark".to_string()));
    assert_eq!(game.profile.coins, 45);
    assert_eq!(
        game.notices.latest().map(|n| n.level),
        Some(NoticeLevel::Error)
    );

    // 150 points crosses five milestones.
    for _ in 0..15 {
        let answer = game.session.current_puzzle.solution.to_string();
        game.handle(GameEvent::Submit(answer));
    }
    assert_eq!(game.profile.coins, 50);

    game.handle(GameEvent::Purchase("dark".to_string()));
    assert_eq!(game.profile.coins, 0);
    assert_eq!(game.style.theme_id.as_deref(), Some("dark"));

    // Five coin pushes and one purchase push.
    for _ in 0..6 {
        assert!(game.wait_sync(WAIT));
    }
    let record = store.record("kiwi").unwrap();
    assert_eq!(record.coins, 0);
    assert_eq!(record.themes_s, "dark");
    assert_eq!(store.push_count(), 6);
}
