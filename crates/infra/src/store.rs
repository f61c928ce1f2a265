use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{Arc, RwLock};

/// Owner-scoped key/value store.
///
/// Every record lives under a scope (the owning user for contacts, the owning
/// contact for addresses); reads never cross scopes.
pub trait ScopedStore<S, K, V>: Send + Sync {
    fn get(&self, scope: &S, key: &K) -> Option<V>;
    fn upsert(&self, scope: S, key: K, value: V);
    /// Inserts only when the key is vacant; the check and the write share
    /// one lock. Returns `false` when a record already exists.
    fn insert_if_absent(&self, scope: S, key: K, value: V) -> bool;
    fn remove(&self, scope: &S, key: &K) -> Option<V>;
    /// Records in the scope, ordered by key.
    fn list(&self, scope: &S) -> Vec<V>;
    /// Every record across all scopes, ordered by (scope, key).
    fn all(&self) -> Vec<V>;
    /// Drop every record in the scope (cascading deletes).
    fn clear_scope(&self, scope: &S);
}

impl<S, K, V, T> ScopedStore<S, K, V> for Arc<T>
where
    T: ScopedStore<S, K, V> + ?Sized,
{
    fn get(&self, scope: &S, key: &K) -> Option<V> {
        (**self).get(scope, key)
    }

    fn upsert(&self, scope: S, key: K, value: V) {
        (**self).upsert(scope, key, value)
    }

    fn insert_if_absent(&self, scope: S, key: K, value: V) -> bool {
        (**self).insert_if_absent(scope, key, value)
    }

    fn remove(&self, scope: &S, key: &K) -> Option<V> {
        (**self).remove(scope, key)
    }

    fn list(&self, scope: &S) -> Vec<V> {
        (**self).list(scope)
    }

    fn all(&self) -> Vec<V> {
        (**self).all()
    }

    fn clear_scope(&self, scope: &S) {
        (**self).clear_scope(scope)
    }
}

/// In-memory scoped store for tests/dev.
#[derive(Debug)]
pub struct InMemoryScopedStore<S, K, V> {
    inner: RwLock<BTreeMap<(S, K), V>>,
}

impl<S: Ord, K: Ord, V> InMemoryScopedStore<S, K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<S: Ord, K: Ord, V> Default for InMemoryScopedStore<S, K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, K, V> ScopedStore<S, K, V> for InMemoryScopedStore<S, K, V>
where
    S: Clone + Ord + Send + Sync + 'static,
    K: Clone + Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, scope: &S, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(&(scope.clone(), key.clone())).cloned()
    }

    fn upsert(&self, scope: S, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert((scope, key), value);
        }
    }

    fn insert_if_absent(&self, scope: S, key: K, value: V) -> bool {
        let Ok(mut map) = self.inner.write() else {
            return false;
        };
        match map.entry((scope, key)) {
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    fn remove(&self, scope: &S, key: &K) -> Option<V> {
        let mut map = self.inner.write().ok()?;
        map.remove(&(scope.clone(), key.clone()))
    }

    fn list(&self, scope: &S) -> Vec<V> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        map.iter()
            .filter_map(|((s, _k), v)| if s == scope { Some(v.clone()) } else { None })
            .collect()
    }

    fn all(&self) -> Vec<V> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn clear_scope(&self, scope: &S) {
        if let Ok(mut map) = self.inner.write() {
            map.retain(|(s, _k), _v| s != scope);
        }
    }
}
