//! The shared, in-memory produce registry

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{RegistryError, RegistryResult};
use crate::record::{Code, Produce};

/// Registry contents. Every code in `codes` has exactly one record in
/// `records`, and vice versa.
#[derive(Debug, Default)]
struct Inventory {
    records: Vec<Produce>,
    codes: HashSet<Code>,
}

/// A concurrency-safe registry of produce records.
///
/// Records are kept in insertion order, alongside a membership index of
/// codes so duplicate checks don't need to walk the records. Both live
/// behind one reader/writer lock: lookups and listings share the lock,
/// while insertions and deletions take it exclusively.
///
/// `Registry` is a handle; clones share the same underlying records.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<Inventory>>,
}

impl Registry {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to the registry.
    ///
    /// The duplicate check first runs under the shared lock, so rejected
    /// duplicates never wait on the exclusive lock. Membership is checked
    /// again once the exclusive lock is held, since another writer may
    /// have inserted the same code in between.
    pub fn add(&self, produce: Produce) -> RegistryResult<()> {
        if self.inner.read().codes.contains(produce.code()) {
            tracing::trace!(code = %produce.code(), "Rejected duplicate produce");
            return Err(RegistryError::Duplicate(produce.code().clone()));
        }

        let mut inventory = self.inner.write();
        if !inventory.codes.insert(produce.code().clone()) {
            tracing::trace!(code = %produce.code(), "Rejected duplicate produce after lock");
            return Err(RegistryError::Duplicate(produce.code().clone()));
        }

        tracing::debug!(code = %produce.code(), name = %produce.name(), price = %produce.price(), "Added produce");
        inventory.records.push(produce);
        Ok(())
    }

    /// Remove the record with the given code, returning it.
    ///
    /// The remaining records keep their relative order.
    pub fn delete(&self, code: &Code) -> RegistryResult<Produce> {
        let mut inventory = self.inner.write();

        let Some(index) = inventory
            .records
            .iter()
            .position(|produce| produce.code() == code)
        else {
            tracing::trace!(%code, "No produce to delete");
            return Err(RegistryError::NotFound(code.clone()));
        };

        let produce = inventory.records.remove(index);
        inventory.codes.remove(code);

        tracing::debug!(%code, "Deleted produce");
        Ok(produce)
    }

    /// A snapshot of all records, in the order they were added
    pub fn list(&self) -> Vec<Produce> {
        self.inner.read().records.clone()
    }

    /// Check whether a record with this code is present
    pub fn contains(&self, code: &Code) -> bool {
        self.inner.read().codes.contains(code)
    }

    /// Get a copy of the record with this code
    pub fn get(&self, code: &Code) -> Option<Produce> {
        let inventory = self.inner.read();
        if !inventory.codes.contains(code) {
            return None;
        }

        inventory
            .records
            .iter()
            .find(|produce| produce.code() == code)
            .cloned()
    }

    /// Number of records in the registry
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Check whether the registry has no records
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }
}
