use std::fmt::Display;
use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use super::{AppStore, StoreChange};
use crate::error::{AppError, AppResult};
use crate::models::{Movie, Review, User};
use crate::storage::StorageKey;

/// Items kept in a persisted list, unique by their identifier
pub trait Identified {
    type Id: PartialEq + Display;

    fn id(&self) -> &Self::Id;
}

impl Identified for Movie {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}

impl Identified for Review {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Identified for User {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// A list of `T` persisted under one storage key.
///
/// Reads decode the whole list and degrade to empty on absent or corrupt data.
/// Writes decode, modify and re-encode the whole list while holding the store's
/// write lock, so two writers in this process never interleave. Nothing spans keys.
pub struct ListStore<'a, T> {
    store: &'a AppStore,
    key: StorageKey,
    _item: PhantomData<T>,
}

impl<'a, T> ListStore<'a, T>
where
    T: Identified + Serialize + DeserializeOwned,
{
    pub(super) fn new(store: &'a AppStore, key: StorageKey) -> Self {
        Self {
            store,
            key,
            _item: PhantomData,
        }
    }

    /// All items in insertion order
    pub fn list(&self) -> Vec<T> {
        self.store.read_json(&self.key).unwrap_or_default()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.list().iter().any(|item| item.id() == id)
    }

    /// Inserts `item` unless an item with the same id is present.
    ///
    /// Returns whether the list changed.
    pub fn add(&self, item: T) -> AppResult<bool> {
        let _guard = self.store.lock_writes();
        let mut items = self.list();
        if items.iter().any(|existing| existing.id() == item.id()) {
            return Ok(false);
        }

        let id = item.id().to_string();
        items.push(item);
        self.store.write_json(&self.key, &items)?;
        self.store.notify(&self.key, StoreChange::Added(id));
        Ok(true)
    }

    /// Builds an item from the current list and inserts it, all under the write lock.
    ///
    /// `make` may refuse by returning an error, in which case nothing is written.
    /// An item whose id is already taken is a `Conflict`.
    pub fn insert_with<F>(&self, make: F) -> AppResult<T>
    where
        F: FnOnce(&[T]) -> AppResult<T>,
        T: Clone,
    {
        let _guard = self.store.lock_writes();
        let mut items = self.list();
        let item = make(&items)?;
        if items.iter().any(|existing| existing.id() == item.id()) {
            return Err(AppError::Conflict(format!(
                "{} already holds an item with id {}",
                self.key,
                item.id()
            )));
        }

        let id = item.id().to_string();
        items.push(item.clone());
        self.store.write_json(&self.key, &items)?;
        self.store.notify(&self.key, StoreChange::Added(id));
        Ok(item)
    }

    /// Filters out the item with `id`.
    ///
    /// Returns whether the list changed; an unknown id leaves storage untouched.
    pub fn remove(&self, id: &T::Id) -> AppResult<bool> {
        let _guard = self.store.lock_writes();
        let mut items = self.list();
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Ok(false);
        }

        self.store.write_json(&self.key, &items)?;
        self.store.notify(&self.key, StoreChange::Removed(id.to_string()));
        Ok(true)
    }
}
