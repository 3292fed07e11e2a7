//! The game context: one session, its cached profile and everything that
//! mutates them.
//!
//! Events are handled strictly one at a time. Every profile mutation is
//! paired with a push once the remote profile has been loaded. Until the
//! entry fetch completes, coins earned are held as a pending delta and
//! credited onto the fetched profile. If the fetch fails the game keeps
//! playing on a local default profile and stops pushing.

use crate::economy::{purchase_theme, select_theme, EconomyProfile, Ledger, RewardPolicy};
use crate::notice::NoticeQueue;
use crate::puzzle::PuzzleSource;
use crate::session::{self, parse_answer, SessionConfig, SessionMode, SessionState};
use crate::sync::{resolve_fetch, SyncEvent, SyncWorker};
use crate::themes::{apply_theme, default_theme, find_theme, StyleScope};
use std::time::Duration;

/// A discrete input to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Raw answer text as typed
    Submit(String),
    /// One second of countdown
    Tick,
    Restart,
    Purchase(String),
    Select(String),
    Logout,
    Sync(SyncEvent),
}

/// Where the cached profile stands relative to the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSync {
    /// Entry fetch in flight
    Pending,
    /// Loaded from the store; mutations are pushed
    Synced,
    /// No store, or the fetch failed; mutations stay local
    Local,
}

pub struct Game {
    pub user: Option<String>,
    pub session: SessionState,
    pub profile: EconomyProfile,
    pub ledger: Ledger,
    pub notices: NoticeQueue,
    pub style: StyleScope,
    profile_sync: ProfileSync,
    /// Coins earned while the entry fetch was in flight
    pending_coins: u64,
    puzzles: Box<dyn PuzzleSource>,
    sync: Option<SyncWorker>,
    logged_out: bool,
}

impl Game {
    /// Enter a session. With a user and a sync worker the profile fetch is
    /// requested immediately; its completion arrives later as a sync event.
    pub fn new(
        config: SessionConfig,
        policy: RewardPolicy,
        user: Option<String>,
        mut puzzles: Box<dyn PuzzleSource>,
        sync: Option<SyncWorker>,
    ) -> Self {
        let session = session::start(config, puzzles.as_mut());
        let mut game = Self {
            user,
            session,
            profile: EconomyProfile::default(),
            ledger: Ledger::new(policy),
            notices: NoticeQueue::new(),
            style: StyleScope::new(),
            profile_sync: ProfileSync::Local,
            pending_coins: 0,
            puzzles,
            sync,
            logged_out: false,
        };
        game.apply_theme_id(&game.profile.selected_theme_id.clone());

        if let (Some(user), Some(worker)) = (game.user.as_deref(), game.sync.as_ref()) {
            match worker.request_fetch(user) {
                Ok(()) => game.profile_sync = ProfileSync::Pending,
                Err(e) => {
                    tracing::warn!(error = %e, "could not request profile");
                    game.notices.warning("\u{26A0}\u{FE0F} Could not load your profile");
                }
            }
        }
        game
    }

    pub fn profile_sync(&self) -> ProfileSync {
        self.profile_sync
    }

    pub fn is_logged_out(&self) -> bool {
        self.logged_out
    }

    pub fn is_trial(&self) -> bool {
        self.session.config.mode == SessionMode::Trial
    }

    /// Handle one event to completion.
    pub fn handle(&mut self, event: GameEvent) {
        if self.logged_out {
            return;
        }
        match event {
            GameEvent::Submit(raw) => self.submit(&raw),
            GameEvent::Tick => self.tick(),
            GameEvent::Restart => self.restart(),
            GameEvent::Purchase(id) => self.purchase(&id),
            GameEvent::Select(id) => self.select(&id),
            GameEvent::Logout => self.logout(),
            GameEvent::Sync(sync_event) => self.on_sync(sync_event),
        }
    }

    /// Handle every sync completion that has already arrived.
    pub fn poll_sync(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.sync.as_ref().and_then(SyncWorker::try_next_event) {
            self.handle(GameEvent::Sync(event));
            handled += 1;
        }
        handled
    }

    /// Wait up to `timeout` for one sync completion and handle it.
    pub fn wait_sync(&mut self, timeout: Duration) -> bool {
        let event = self
            .sync
            .as_ref()
            .and_then(|worker| worker.next_event_timeout(timeout));
        match event {
            Some(event) => {
                self.handle(GameEvent::Sync(event));
                true
            }
            None => false,
        }
    }

    /// Stop syncing, letting queued pushes finish first.
    pub fn shutdown(&mut self) {
        if let Some(worker) = self.sync.take() {
            worker.shutdown();
        }
    }

    /// Show a theme without touching the profile (e.g. the locally remembered one).
    pub fn preview_theme(&mut self, theme_id: &str) {
        self.apply_theme_id(theme_id);
    }

    fn submit(&mut self, raw: &str) {
        let value = match parse_answer(raw) {
            Ok(v) => v,
            Err(e) => {
                self.notices.error(e.to_string());
                return;
            }
        };

        let outcome = match session::submit_answer(&mut self.session, value, self.puzzles.as_mut())
        {
            Ok(outcome) => outcome,
            Err(e) => {
                self.notices.error(e.to_string());
                return;
            }
        };

        if outcome.correct {
            self.notices.success("Correct! \u{1F389}");
        } else if !outcome.game_over {
            self.notices.error(format!(
                "Wrong answer! {} attempts left",
                outcome.lives
            ));
        }

        if outcome.score_changed() && self.session.config.earns_coins() {
            let updated = self.ledger.on_score_changed(outcome.score, &self.profile);
            self.credit(updated);
        }

        if outcome.game_over {
            if self.is_trial() {
                self.notices.error("Trial ended! Please login to continue playing.");
            } else {
                self.notices.error("No attempts left! Game over.");
            }
            self.on_game_over();
        }
    }

    fn tick(&mut self) {
        if session::tick(&mut self.session) {
            self.notices.error("Time's up! Game over.");
            self.on_game_over();
        }
    }

    fn on_game_over(&mut self) {
        if !self.session.config.earns_coins() {
            return;
        }
        let updated = self.ledger.on_game_over(self.session.score, &self.profile);
        self.credit(updated);
    }

    /// Commit a ledger result, announcing any coins it added.
    fn credit(&mut self, updated: EconomyProfile) {
        let earned = updated.coins.saturating_sub(self.profile.coins);
        if earned > 0 {
            let plural = if earned == 1 { "" } else { "s" };
            self.notices.success(format!(
                "\u{1F34C} You earned {} Banana Coin{}!",
                earned, plural
            ));
            if self.profile_sync == ProfileSync::Pending {
                self.pending_coins += earned;
            }
        }
        self.commit(updated);
    }

    fn restart(&mut self) {
        session::restart(&mut self.session, self.puzzles.as_mut());
        self.ledger.reset();
    }

    fn purchase(&mut self, theme_id: &str) {
        if !self.store_open() {
            return;
        }
        match purchase_theme(theme_id, &self.profile) {
            Ok(updated) => {
                let name = find_theme(theme_id).map_or(theme_id, |t| t.display_name);
                self.notices.info(format!("Theme '{}' unlocked! \u{1F308}", name));
                self.commit(updated);
                self.apply_theme_id(theme_id);
            }
            Err(e) => self.notices.error(e.to_string()),
        }
    }

    fn select(&mut self, theme_id: &str) {
        if !self.store_open() {
            return;
        }
        match select_theme(theme_id, &self.profile) {
            Ok(updated) => {
                let name = find_theme(theme_id).map_or(theme_id, |t| t.display_name);
                self.notices.info(format!("Theme applied: {} \u{1F3A8}", name));
                self.commit(updated);
                self.apply_theme_id(theme_id);
            }
            Err(e) => self.notices.error(e.to_string()),
        }
    }

    fn store_open(&mut self) -> bool {
        if self.user.is_none() {
            self.notices.error("Log in to use the store");
            return false;
        }
        if self.profile_sync == ProfileSync::Pending {
            self.notices.info("Loading your profile...");
            return false;
        }
        true
    }

    /// Discard the local session. Nothing is pushed.
    fn logout(&mut self) {
        tracing::info!(user = ?self.user, "logout");
        self.sync = None;
        self.user = None;
        self.profile = EconomyProfile::default();
        self.ledger.reset();
        self.pending_coins = 0;
        self.profile_sync = ProfileSync::Local;
        self.notices.clear();
        self.apply_theme_id(default_theme().id);
        self.logged_out = true;
    }

    fn on_sync(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Fetched { user, result } => {
                if self.user.as_deref() != Some(user.as_str())
                    || self.profile_sync != ProfileSync::Pending
                {
                    return;
                }
                let failed = result.is_err();
                let (mut fetched, warning) = resolve_fetch(&user, result);
                if let Some(e) = warning {
                    self.notices.warning(format!(
                        "\u{26A0}\u{FE0F} Could not load your profile ({}). Coins won't be saved.",
                        e
                    ));
                }

                let remote_high_score = fetched.high_score;
                fetched.coins += self.pending_coins;
                fetched.high_score = remote_high_score.max(self.profile.high_score);
                let changed_locally =
                    self.pending_coins > 0 || fetched.high_score > remote_high_score;
                self.pending_coins = 0;
                self.profile = fetched;

                if failed {
                    self.profile_sync = ProfileSync::Local;
                } else {
                    self.profile_sync = ProfileSync::Synced;
                    tracing::info!(user = %user, coins = self.profile.coins, "profile loaded");
                    if changed_locally {
                        self.push();
                    }
                }
                self.apply_theme_id(&self.profile.selected_theme_id.clone());
            }
            SyncEvent::Pushed { user, coins, result } => match result {
                Ok(()) => tracing::debug!(user = %user, coins, "profile pushed"),
                Err(e) => {
                    tracing::warn!(user = %user, error = %e, "profile push dropped");
                    self.notices.warning("\u{26A0}\u{FE0F} Failed to sync with server");
                }
            },
        }
    }

    fn commit(&mut self, updated: EconomyProfile) {
        debug_assert!(updated.is_consistent());
        if updated == self.profile {
            return;
        }
        self.profile = updated;
        if self.profile_sync == ProfileSync::Synced {
            self.push();
        }
    }

    fn push(&mut self) {
        let (Some(user), Some(worker)) = (self.user.as_deref(), self.sync.as_ref()) else {
            return;
        };
        if let Err(e) = worker.request_push(user, &self.profile) {
            tracing::warn!(error = %e, "could not queue profile push");
            self.notices.warning("\u{26A0}\u{FE0F} Failed to sync with server");
        }
    }

    fn apply_theme_id(&mut self, theme_id: &str) {
        let theme = find_theme(theme_id).unwrap_or_else(default_theme);
        apply_theme(&mut self.style, theme);
    }
}
