//! Remote profile store clients.

use super::types::{decode_profile_response, decode_push_response, ProfileRecord, SyncError};
use crate::constants::{DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT_SECS};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// The remote side of profile sync. Implementations are called from the
/// sync worker thread.
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile of `user`.
    fn fetch(&self, user: &str) -> Result<ProfileRecord, SyncError>;

    /// Replace the stored profile with `record`.
    fn push(&self, record: &ProfileRecord) -> Result<(), SyncError>;
}

/// JSON-over-HTTP profile store.
///
/// Pushes go to `update_user.php` (coins and owned themes) and, when the
/// selection changed, to `update_theme.php` (`{username, theme}`), matching
/// the PHP backend. That backend has no fetch endpoint of its own (only
/// `login.php` returns the user envelope), so fetches assume a
/// `get_user.php?username=` endpoint answering with the same envelope.
pub struct HttpProfileStore {
    agent: ureq::Agent,
    api_base: String,
    auth_token: Option<String>,
    /// Last selection known to the remote side, per user.
    selections: Mutex<HashMap<String, String>>,
}

impl HttpProfileStore {
    pub fn new(api_base: &str, auth_token: Option<String>, timeout_secs: u64) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent("banamatix")
            .build();
        Self {
            agent,
            api_base: api_base.trim_end_matches('/').to_string(),
            auth_token,
            selections: Mutex::new(HashMap::new()),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_base, endpoint)
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        match &self.auth_token {
            Some(token) => request.set("Authorization", token),
            None => request,
        }
    }

    fn post_json(
        &self,
        endpoint: &str,
        user: &str,
        payload: impl serde::Serialize,
    ) -> Result<(), SyncError> {
        let request = self.authorize(self.agent.post(&self.url(endpoint)));
        let body = request
            .send_json(payload)
            .map_err(|e| map_ureq_error(e, user))?
            .into_string()
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        decode_push_response(&body)
    }

    fn selection_changed(&self, record: &ProfileRecord) -> bool {
        if record.themes_s.is_empty() {
            return false;
        }
        match self.selections.lock() {
            Ok(selections) => selections.get(&record.username) != Some(&record.themes_s),
            Err(_) => true,
        }
    }

    fn remember_selection(&self, user: &str, theme: &str) {
        if let Ok(mut selections) = self.selections.lock() {
            selections.insert(user.to_string(), theme.to_string());
        }
    }
}

impl Default for HttpProfileStore {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, None, DEFAULT_REQUEST_TIMEOUT_SECS)
    }
}

fn map_ureq_error(error: ureq::Error, user: &str) -> SyncError {
    match error {
        ureq::Error::Status(404, _) => SyncError::NotFound(user.to_string()),
        ureq::Error::Status(code, _) => SyncError::Status(code),
        ureq::Error::Transport(t) => SyncError::Transport(t.to_string()),
    }
}

impl ProfileStore for HttpProfileStore {
    fn fetch(&self, user: &str) -> Result<ProfileRecord, SyncError> {
        let request = self
            .authorize(self.agent.get(&self.url("get_user.php")))
            .query("username", user);
        let body = request
            .call()
            .map_err(|e| map_ureq_error(e, user))?
            .into_string()
            .map_err(|e| SyncError::Decode(e.to_string()))?;
        let record = decode_profile_response(&body)?;
        if !record.themes_s.is_empty() {
            self.remember_selection(user, &record.themes_s);
        }
        Ok(record)
    }

    /// `update_user.php` ignores the selection, so a changed selection is
    /// sent separately. Either failure is returned as is; nothing is retried.
    fn push(&self, record: &ProfileRecord) -> Result<(), SyncError> {
        self.post_json("update_user.php", &record.username, record)?;

        if self.selection_changed(record) {
            let payload = serde_json::json!({
                "username": record.username,
                "theme": record.themes_s,
            });
            self.post_json("update_theme.php", &record.username, payload)?;
            self.remember_selection(&record.username, &record.themes_s);
            tracing::debug!(user = %record.username, theme = %record.themes_s, "selection pushed");
        }
        Ok(())
    }
}

/// In-process profile store, used for offline play and tests.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    records: Mutex<HashMap<String, ProfileRecord>>,
    offline: AtomicBool,
    pushes: AtomicUsize,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: ProfileRecord) -> Self {
        let store = Self::new();
        store.insert(record);
        store
    }

    pub fn insert(&self, record: ProfileRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(record.username.clone(), record);
        }
    }

    pub fn record(&self, user: &str) -> Option<ProfileRecord> {
        self.records.lock().ok()?.get(user).cloned()
    }

    /// Simulate the network going away (or coming back).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of pushes that reached the store.
    pub fn push_count(&self) -> usize {
        self.pushes.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), SyncError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(SyncError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn fetch(&self, user: &str) -> Result<ProfileRecord, SyncError> {
        self.check_online()?;
        self.record(user)
            .ok_or_else(|| SyncError::NotFound(user.to_string()))
    }

    fn push(&self, record: &ProfileRecord) -> Result<(), SyncError> {
        self.check_online()?;
        self.insert(record.clone());
        self.pushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
