//! Background sync worker.
//!
//! Requests are queued to a single thread and executed in order, so pushes
//! reach the store in the order the profile was mutated. Completions come
//! back on a channel and are picked up by the event loop as later events.

use super::store::ProfileStore;
use super::types::{ProfileRecord, SyncError, SyncEvent};
use crate::economy::EconomyProfile;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

enum SyncCommand {
    Fetch { user: String },
    Push { record: ProfileRecord },
    Shutdown,
}

pub struct SyncWorker {
    commands: Sender<SyncCommand>,
    events: Receiver<SyncEvent>,
    handle: Option<JoinHandle<()>>,
}

impl SyncWorker {
    pub fn spawn(store: Arc<dyn ProfileStore>) -> Self {
        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let handle = thread::spawn(move || run(store, command_rx, event_tx));
        Self {
            commands: command_tx,
            events: event_rx,
            handle: Some(handle),
        }
    }

    pub fn request_fetch(&self, user: &str) -> Result<(), SyncError> {
        self.send(SyncCommand::Fetch {
            user: user.to_string(),
        })
    }

    /// Queue a best-effort push of the full profile. Never retried.
    pub fn request_push(&self, user: &str, profile: &EconomyProfile) -> Result<(), SyncError> {
        self.send(SyncCommand::Push {
            record: ProfileRecord::from_profile(user, profile),
        })
    }

    /// Next completed request, if any, without blocking.
    pub fn try_next_event(&self) -> Option<SyncEvent> {
        self.events.try_recv().ok()
    }

    /// Wait up to `timeout` for the next completed request.
    pub fn next_event_timeout(&self, timeout: Duration) -> Option<SyncEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn send(&self, command: SyncCommand) -> Result<(), SyncError> {
        self.commands.send(command).map_err(|_| SyncError::Unavailable)
    }

    /// Stop after the queued requests have run, waiting for the thread.
    pub fn shutdown(mut self) {
        let _ = self.commands.send(SyncCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SyncWorker {
    // Detaches: queued requests may still complete in the background.
    fn drop(&mut self) {
        let _ = self.commands.send(SyncCommand::Shutdown);
    }
}

fn run(store: Arc<dyn ProfileStore>, commands: Receiver<SyncCommand>, events: Sender<SyncEvent>) {
    for command in commands {
        let event = match command {
            SyncCommand::Fetch { user } => {
                let result = store.fetch(&user).map(ProfileRecord::into_profile);
                SyncEvent::Fetched { user, result }
            }
            SyncCommand::Push { record } => {
                let result = store.push(&record);
                SyncEvent::Pushed {
                    user: record.username,
                    coins: record.coins,
                    result,
                }
            }
            SyncCommand::Shutdown => break,
        };
        // Receiver gone means the game has exited; nothing left to report to.
        if events.send(event).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::store::MemoryProfileStore;

    const WAIT: Duration = Duration::from_secs(2);

    #[test]
    fn test_fetch_completion_is_delivered() {
        let store = Arc::new(MemoryProfileStore::with_record(ProfileRecord {
            username: "kiwi".to_string(),
            coins: 11,
            ..ProfileRecord::default()
        }));
        let worker = SyncWorker::spawn(store);
        worker.request_fetch("kiwi").unwrap();

        match worker.next_event_timeout(WAIT) {
            Some(SyncEvent::Fetched { user, result }) => {
                assert_eq!(user, "kiwi");
                assert_eq!(result.unwrap().coins, 11);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_pushes_apply_in_order() {
        let store = Arc::new(MemoryProfileStore::new());
        let worker = SyncWorker::spawn(store.clone());

        let mut profile = EconomyProfile::default();
        for coins in 1..=5 {
            profile.coins = coins;
            worker.request_push("kiwi", &profile).unwrap();
        }
        for _ in 0..5 {
            assert!(matches!(
                worker.next_event_timeout(WAIT),
                Some(SyncEvent::Pushed { result: Ok(()), .. })
            ));
        }

        assert_eq!(store.record("kiwi").unwrap().coins, 5);
        assert_eq!(store.push_count(), 5);
    }

    #[test]
    fn test_failed_push_reported_not_retried() {
        let store = Arc::new(MemoryProfileStore::new());
        store.set_offline(true);
        let worker = SyncWorker::spawn(store.clone());
        worker.request_push("kiwi", &EconomyProfile::default()).unwrap();

        assert!(matches!(
            worker.next_event_timeout(WAIT),
            Some(SyncEvent::Pushed { result: Err(SyncError::Transport(_)), .. })
        ));
        store.set_offline(false);
        assert!(worker.next_event_timeout(Duration::from_millis(100)).is_none());
        assert_eq!(store.push_count(), 0);
    }

    #[test]
    fn test_shutdown_flushes_queue() {
        let store = Arc::new(MemoryProfileStore::new());
        let worker = SyncWorker::spawn(store.clone());
        worker.request_push("kiwi", &EconomyProfile::default()).unwrap();
        worker.shutdown();
        assert_eq!(store.push_count(), 1);
    }

    #[test]
    fn test_no_events_when_idle() {
        let worker = SyncWorker::spawn(Arc::new(MemoryProfileStore::new()));
        assert!(worker.try_next_event().is_none());
    }
}
