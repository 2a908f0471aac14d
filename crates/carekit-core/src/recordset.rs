//! Filterable views over patient record collections.
//!
//! A [`RecordSet`] borrows records from the snapshot and exposes the pure
//! combinators the measures are written in terms of. Combinators never
//! reorder records; host order is preserved.

use crate::time::RecordDateTime;
use crate::vocabulary::{Coding, ValueSet};

/// Records that carry coded concepts matchable against a [`ValueSet`].
pub trait Coded {
    fn codings(&self) -> &[Coding];
}

/// Records with a single authoritative instant used for before/after tests.
pub trait Timestamped {
    fn recorded_at(&self) -> RecordDateTime;
}

/// A borrowed, filterable view over one record collection.
#[derive(Debug, Clone)]
pub struct RecordSet<'a, T> {
    records: Vec<&'a T>,
}

impl<'a, T> RecordSet<'a, T> {
    pub fn from_slice(records: &'a [T]) -> Self {
        Self {
            records: records.iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.records.iter().copied()
    }

    /// Last record in host order.
    pub fn last(&self) -> Option<&'a T> {
        self.records.last().copied()
    }

    /// Keep records satisfying the predicate.
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Self {
        Self {
            records: self
                .records
                .iter()
                .copied()
                .filter(|r| pred(*r))
                .collect(),
        }
    }

    pub fn any(&self, pred: impl Fn(&T) -> bool) -> bool {
        self.records.iter().any(|r| pred(*r))
    }
}

impl<'a, T: Coded> RecordSet<'a, T> {
    /// Keep records whose codings intersect the value set.
    pub fn find(&self, value_set: &ValueSet) -> Self {
        self.filter(|r| value_set.matches_any(r.codings()))
    }
}

impl<'a, T: Timestamped> RecordSet<'a, T> {
    /// Keep records strictly after the given instant.
    pub fn after(&self, instant: RecordDateTime) -> Self {
        self.filter(|r| r.recorded_at() > instant)
    }

    /// Keep records strictly before the given instant.
    pub fn before(&self, instant: RecordDateTime) -> Self {
        self.filter(|r| r.recorded_at() < instant)
    }

    /// Latest instant across the set.
    pub fn latest(&self) -> Option<RecordDateTime> {
        self.records.iter().map(|r| r.recorded_at()).max()
    }
}

impl<'a, T> IntoIterator for RecordSet<'a, T> {
    type Item = &'a T;
    type IntoIter = std::vec::IntoIter<&'a T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
