//! Generic concurrent key-value repository.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// `HashMap` behind a single read/write lock.
///
/// Design:
/// - 読み手は並行、書き手は直列化（粗いロック 1 本）
/// - 値は丸ごと入れ替えるので、poison しても途中状態は残らない → recover する
/// - Values are cloned out; callers never hold a reference into the map.
pub struct Repository<K, V> {
    data: RwLock<HashMap<K, V>>,
}

impl<K, V> Repository<K, V> {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, V>> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, V>> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K: Eq + Hash, V: Clone> Repository<K, V> {
    /// Insert or replace the value for `key`.
    pub fn set(&self, key: K, value: V) {
        self.write().insert(key, value);
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.read().get(key).cloned()
    }

    /// Copy of every value at call time, in no particular order.
    pub fn get_all(&self) -> Vec<V> {
        self.read().values().cloned().collect()
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.write().remove(key)
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Run `f` over the values under one read lock (no copies).
    pub fn inspect<R>(&self, f: impl FnOnce(&HashMap<K, V>) -> R) -> R {
        f(&self.read())
    }
}

impl<K, V> Default for Repository<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
