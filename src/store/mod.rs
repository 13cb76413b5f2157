//! Shared client state persisted in local storage.
//!
//! `AppStore` is the single handle every view goes through for the watchlist,
//! favorites, reviews, accounts and the vanilla preferences. Each successful write
//! is announced on a broadcast channel so views can refresh instead of re-reading.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use crate::error::AppResult;
use crate::models::{Movie, Review, SessionUser, User};
use crate::storage::{MemoryStorage, Storage, StorageKey};

pub mod list;

pub use list::{Identified, ListStore};

const EVENT_CAPACITY: usize = 64;

/// Which client flavour's storage layout is in use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Component,
    Vanilla,
}

impl Variant {
    pub fn watchlist_key(self) -> StorageKey {
        match self {
            Variant::Component => StorageKey::Watchlist,
            Variant::Vanilla => StorageKey::VanillaWatchlist,
        }
    }
}

/// What happened to a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Added(String),
    Removed(String),
    Replaced,
    Cleared,
}

/// Notification sent after a write lands in storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub key: String,
    pub change: StoreChange,
}

pub struct AppStore {
    storage: Arc<dyn Storage>,
    variant: Variant,
    write_lock: Mutex<()>,
    events: broadcast::Sender<StoreEvent>,
}

impl AppStore {
    pub fn new(storage: Arc<dyn Storage>, variant: Variant) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            storage,
            variant,
            write_lock: Mutex::new(()),
            events,
        }
    }

    /// A store over fresh in-memory storage
    pub fn in_memory(variant: Variant) -> Self {
        Self::new(Arc::new(MemoryStorage::new()), variant)
    }

    /// Receives every change made through this store from now on
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn watchlist(&self) -> ListStore<'_, Movie> {
        ListStore::new(self, self.variant.watchlist_key())
    }

    pub fn favorites(&self, user_id: &str) -> ListStore<'_, Movie> {
        ListStore::new(self, StorageKey::Favorites(user_id.to_string()))
    }

    pub fn reviews(&self, movie_id: u64) -> ListStore<'_, Review> {
        ListStore::new(self, StorageKey::Reviews(movie_id))
    }

    pub fn users(&self) -> ListStore<'_, User> {
        ListStore::new(self, StorageKey::Users)
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.read_json(&StorageKey::CurrentUser)
    }

    pub fn set_current_user(&self, user: &SessionUser) -> AppResult<()> {
        let _guard = self.lock_writes();
        self.write_json(&StorageKey::CurrentUser, user)?;
        self.notify(&StorageKey::CurrentUser, StoreChange::Replaced);
        Ok(())
    }

    pub fn clear_current_user(&self) -> AppResult<()> {
        let _guard = self.lock_writes();
        self.storage.remove(&StorageKey::CurrentUser)?;
        self.notify(&StorageKey::CurrentUser, StoreChange::Cleared);
        Ok(())
    }

    /// Free-form preferences object, `{}` when unset or unreadable
    pub fn preferences(&self) -> Map<String, Value> {
        self.read_json(&StorageKey::VanillaPrefs).unwrap_or_default()
    }

    pub fn set_preferences(&self, prefs: &Map<String, Value>) -> AppResult<()> {
        let _guard = self.lock_writes();
        self.write_json(&StorageKey::VanillaPrefs, prefs)?;
        self.notify(&StorageKey::VanillaPrefs, StoreChange::Replaced);
        Ok(())
    }

    /// Last submitted search query, stored as a plain string
    pub fn last_search(&self) -> String {
        match self.storage.get(&StorageKey::VanillaLastSearch) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read last search");
                String::new()
            }
        }
    }

    pub fn set_last_search(&self, query: &str) -> AppResult<()> {
        let _guard = self.lock_writes();
        self.storage.set(&StorageKey::VanillaLastSearch, query)?;
        self.notify(&StorageKey::VanillaLastSearch, StoreChange::Replaced);
        Ok(())
    }

    /// Decodes the JSON under `key`; absent, unreadable and corrupt all read as `None`
    pub(crate) fn read_json<T: DeserializeOwned>(&self, key: &StorageKey) -> Option<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read local storage");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding corrupt local storage entry");
                None
            }
        }
    }

    pub(crate) fn write_json<T: Serialize + ?Sized>(&self, key: &StorageKey, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.storage.set(key, &json)
    }

    pub(crate) fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn notify(&self, key: &StorageKey, change: StoreChange) {
        tracing::debug!(key = %key, change = ?change, "Local storage updated");
        // No receivers is fine
        let _ = self.events.send(StoreEvent {
            key: key.to_string(),
            change,
        });
    }
}

/// Millisecond-epoch identifier, bumped until `taken` rejects it
pub fn time_based_id(taken: impl Fn(&str) -> bool) -> String {
    let mut millis = Utc::now().timestamp_millis();
    loop {
        let id = millis.to_string();
        if !taken(&id) {
            return id;
        }
        millis += 1;
    }
}
