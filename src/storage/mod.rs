//! Local key/value storage.
//!
//! Every persisted collection lives under one fixed key as a JSON string, read and
//! rewritten whole. Backends only move strings; decoding is the store's job.

use crate::error::AppResult;

pub mod file;
pub mod keys;
pub mod memory;

pub use file::FileStorage;
pub use keys::StorageKey;
pub use memory::MemoryStorage;

/// A string-valued key/value area
pub trait Storage: Send + Sync {
    /// Raw value under `key`, `None` when absent
    fn get(&self, key: &StorageKey) -> AppResult<Option<String>>;

    /// Replace the value under `key`
    fn set(&self, key: &StorageKey, value: &str) -> AppResult<()>;

    /// Delete `key`; deleting an absent key succeeds
    fn remove(&self, key: &StorageKey) -> AppResult<()>;
}
