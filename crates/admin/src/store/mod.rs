//! In-memory record store for products, orders and customers.
//!
//! Every operation is a pure transformation: it borrows the current sequence
//! and returns a new one (or a lazy view). Committing the result is the
//! caller's job, normally through [`Collection::commit`].
//!
//! Collections hold tens of records, so there is no indexing: each search or
//! bulk action scans the whole sequence.

pub mod query;

use std::collections::HashSet;
use std::hash::Hash;

pub use query::{CustomerQuery, OrderQuery, ProductQuery};

/// A record with a stable identifier.
pub trait Record: Clone {
    /// Identifier type.
    type Id: Eq + Hash + Clone;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;
}

/// A shallow patch: each field it carries overrides the record's field.
pub trait Patch<T> {
    /// Merge this patch into `record`.
    fn apply(&self, record: &mut T);
}

/// Prepend `record`. No deduplication.
#[must_use]
pub fn insert<T: Clone>(records: &[T], record: T) -> Vec<T> {
    let mut next = Vec::with_capacity(records.len() + 1);
    next.push(record);
    next.extend_from_slice(records);
    next
}

/// Lazy view of the records satisfying `predicate`, in original order.
pub fn filter_by<'a, T, P>(records: &'a [T], predicate: P) -> impl Iterator<Item = &'a T> + 'a
where
    T: 'a,
    P: Fn(&T) -> bool + 'a,
{
    records.iter().filter(move |record| predicate(*record))
}

/// Apply `patch` to every record whose id is in `ids`; others pass through.
#[must_use]
pub fn bulk_update<T, P>(records: &[T], ids: &HashSet<T::Id>, patch: &P) -> Vec<T>
where
    T: Record,
    P: Patch<T>,
{
    records
        .iter()
        .map(|record| {
            let mut next = record.clone();
            if ids.contains(record.id()) {
                patch.apply(&mut next);
            }
            next
        })
        .collect()
}

/// The records whose id is not in `ids`. Unknown ids are ignored.
#[must_use]
pub fn bulk_delete<T: Record>(records: &[T], ids: &HashSet<T::Id>) -> Vec<T> {
    records
        .iter()
        .filter(|record| !ids.contains(record.id()))
        .cloned()
        .collect()
}

/// Held state for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    #[must_use]
    pub const fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Current snapshot.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace the held sequence with `records`.
    pub fn commit(&mut self, records: Vec<T>) {
        self.records = records;
    }

    /// Empty the collection.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Prepend and commit.
    pub fn insert(&mut self, record: T) {
        let next = insert(&self.records, record);
        self.commit(next);
    }

    /// Patch and commit. Returns how many records matched.
    pub fn bulk_update<P: Patch<T>>(&mut self, ids: &HashSet<T::Id>, patch: &P) -> usize {
        let matched = self.count_matching(ids);
        let next = bulk_update(&self.records, ids, patch);
        self.commit(next);
        matched
    }

    /// Delete and commit. Returns how many records were removed.
    pub fn bulk_delete(&mut self, ids: &HashSet<T::Id>) -> usize {
        let before = self.records.len();
        let next = bulk_delete(&self.records, ids);
        self.commit(next);
        before - self.records.len()
    }

    fn count_matching(&self, ids: &HashSet<T::Id>) -> usize {
        self.records
            .iter()
            .filter(|record| ids.contains(record.id()))
            .count()
    }
}
