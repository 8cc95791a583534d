//! Compare Selection (persisted selection set)
//!
//! The ordered set of breed ids the user has picked for comparison.
//! Bounded at four entries, persisted to an injected key-value store on
//! every mutation, and rehydrated at startup. Capacity and duplicate
//! violations are boolean results, never errors; a broken or corrupt
//! store degrades to in-memory-only operation.

use anyhow::Result;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Maximum number of breeds in one comparison.
pub const MAX_COMPARE: usize = 4;

/// Fixed key the selection persists under.
pub const STORAGE_KEY: &str = "breed-compare-selection";

/// Client-local key-value persistence capability. Injected so the UI can
/// supply browser local storage while tests and server-side callers use
/// [`MemoryStore`].
pub trait SelectionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store for tests and stateless deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl SelectionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// SelectionStore is object-safe, and boxed or borrowed stores are stores
// themselves, so callers can keep ownership or pick a backend at runtime.
impl SelectionStore for Box<dyn SelectionStore> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<S: SelectionStore> SelectionStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// The user's comparison basket: at most [`MAX_COMPARE`] breed ids, in
/// selection order, with no duplicates.
///
/// Ids are not validated against the catalog here; a persisted id whose
/// breed has since disappeared is dropped at projection time instead
/// (`crate::compare::project`).
pub struct CompareSelection<S: SelectionStore> {
    ids: SmallVec<[String; MAX_COMPARE]>,
    store: S,
}

impl<S: SelectionStore> CompareSelection<S> {
    /// Rehydrate the selection from the store. A missing or corrupt
    /// persisted value yields an empty selection; a persisted list that
    /// violates the capacity or uniqueness invariant is repaired.
    pub fn load(store: S) -> Self {
        let ids = match store.get(STORAGE_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => sanitize(list),
                Err(_) => {
                    tracing::warn!("Discarding corrupt persisted compare selection");
                    SmallVec::new()
                }
            },
            None => SmallVec::new(),
        };

        CompareSelection { ids, store }
    }

    /// Append `id`. Returns `false` without mutating if the id is
    /// already selected or the selection is full.
    pub fn add(&mut self, id: &str) -> bool {
        if self.ids.len() >= MAX_COMPARE || self.is_selected(id) {
            return false;
        }
        self.ids.push(id.to_string());
        self.persist();
        true
    }

    /// Remove `id` if selected; no-op otherwise.
    pub fn remove(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|x| x == id) {
            self.ids.remove(pos);
            self.persist();
        }
    }

    /// Remove `id` if selected (returning `false`), otherwise add it and
    /// return whether the add succeeded.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            self.remove(id);
            false
        } else {
            self.add(id)
        }
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.persist();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    pub fn can_add_more(&self) -> bool {
        self.ids.len() < MAX_COMPARE
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Write the full list to the store. A write failure is logged and
    /// swallowed; the in-memory state stays authoritative for the
    /// session.
    fn persist(&mut self) {
        let encoded = match serde_json::to_string(self.ids.as_slice()) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!("Failed to encode compare selection: {}", err);
                return;
            }
        };
        if let Err(err) = self.store.set(STORAGE_KEY, &encoded) {
            tracing::warn!("Failed to persist compare selection: {}", err);
        }
    }
}

/// Enforce uniqueness and capacity on a rehydrated list, preserving the
/// order of first occurrence.
fn sanitize(list: Vec<String>) -> SmallVec<[String; MAX_COMPARE]> {
    let mut ids: SmallVec<[String; MAX_COMPARE]> = SmallVec::new();
    for id in list {
        if ids.len() == MAX_COMPARE {
            break;
        }
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
