//! Order stores.
//!
//! An [`OrderStore`] is the display/serialization sequence of one content
//! map. It never owns entity content, only positions. Membership must equal
//! the key set of the matching map at the end of every action; see
//! [`OrderStore::mismatch`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Oid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStore(Vec<Oid>);

/// Difference between an order store and the key set it mirrors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderMismatch {
    /// Keys of the content map absent from the order.
    pub missing: Vec<Oid>,
    /// Order entries with no content.
    pub unknown: Vec<Oid>,
    /// Entries listed more than once.
    pub duplicates: Vec<Oid>,
}

impl OrderMismatch {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unknown.is_empty() && self.duplicates.is_empty()
    }
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Oid> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Oid] {
        &self.0
    }

    pub fn contains(&self, oid: &Oid) -> bool {
        self.0.contains(oid)
    }

    pub fn position(&self, oid: &Oid) -> Option<usize> {
        self.0.iter().position(|o| o == oid)
    }

    /// Append identifiers in the given order, skipping ones already present.
    pub fn add<'a>(&mut self, oids: impl IntoIterator<Item = &'a Oid>) {
        for oid in oids {
            if !self.0.contains(oid) {
                self.0.push(oid.clone());
            }
        }
    }

    /// Remove identifiers by value. Absent identifiers are ignored and the
    /// relative order of the remaining entries is kept.
    pub fn remove(&mut self, oids: &[Oid]) {
        self.0.retain(|oid| !oids.contains(oid));
    }

    /// Bulk replacement: all removals first, then the additions are appended
    /// in the order given. An identifier listed in both sets keeps its
    /// current position.
    pub fn apply(&mut self, removed: &[Oid], added: &[Oid]) {
        self.0
            .retain(|oid| !removed.contains(oid) || added.contains(oid));
        self.add(added);
    }

    /// Replace the whole sequence. Returns `false` and leaves the store
    /// untouched unless `sequence` is a permutation of the current entries.
    pub fn reorder(&mut self, sequence: Vec<Oid>) -> bool {
        if !self.is_permutation(&sequence) {
            return false;
        }
        self.0 = sequence;
        true
    }

    pub fn is_permutation(&self, sequence: &[Oid]) -> bool {
        if sequence.len() != self.0.len() {
            return false;
        }
        let current: BTreeSet<&Oid> = self.0.iter().collect();
        let proposed: BTreeSet<&Oid> = sequence.iter().collect();
        proposed.len() == sequence.len() && current == proposed
    }

    /// Sort ascending by a display key. Entries with equal keys keep their
    /// relative order: the original position is part of the sort key, so the
    /// result does not depend on the stability of the underlying algorithm.
    pub fn sort_by_key<K, F>(&mut self, mut key: F)
    where
        K: Ord,
        F: FnMut(&Oid) -> K,
    {
        let mut decorated: Vec<(K, usize, Oid)> = self
            .0
            .drain(..)
            .enumerate()
            .map(|(index, oid)| (key(&oid), index, oid))
            .collect();
        decorated.sort_unstable_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        self.0 = decorated.into_iter().map(|(_, _, oid)| oid).collect();
    }

    /// Symmetric difference between the listed identifiers and the key set of
    /// the content map, plus identifiers listed more than once.
    pub fn symmetric_difference<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a Oid>,
    ) -> OrderMismatch {
        let keys: BTreeSet<&Oid> = keys.into_iter().collect();
        let mut seen = BTreeSet::new();
        let mut mismatch = OrderMismatch::default();
        for oid in &self.0 {
            if !seen.insert(oid) {
                mismatch.duplicates.push(oid.clone());
            } else if !keys.contains(oid) {
                mismatch.unknown.push(oid.clone());
            }
        }
        mismatch.missing = keys
            .into_iter()
            .filter(|k| !seen.contains(k))
            .cloned()
            .collect();
        mismatch
    }
}

impl FromIterator<Oid> for OrderStore {
    fn from_iter<I: IntoIterator<Item = Oid>>(iter: I) -> Self {
        let mut store = Self::new();
        for oid in iter {
            if !store.0.contains(&oid) {
                store.0.push(oid);
            }
        }
        store
    }
}

impl<'a> IntoIterator for &'a OrderStore {
    type Item = &'a Oid;
    type IntoIter = std::slice::Iter<'a, Oid>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn oids(values: &[&str]) -> Vec<Oid> {
        values.iter().map(|v| Oid::new(*v).unwrap()).collect()
    }

    fn store(values: &[&str]) -> OrderStore {
        oids(values).into_iter().collect()
    }

    fn names(store: &OrderStore) -> Vec<&str> {
        store.iter().map(Oid::as_str).collect()
    }

    #[test]
    fn removing_absent_id_is_noop() {
        let mut order = store(&["A", "B", "C"]);
        order.remove(&oids(&["Z"]));
        assert_eq!(names(&order), vec!["A", "B", "C"]);
    }

    #[test]
    fn remove_is_by_value() {
        let mut order = store(&["A", "B", "C", "D"]);
        order.remove(&oids(&["D", "Z", "B"]));
        assert_eq!(names(&order), vec!["A", "C"]);
    }

    #[test]
    fn apply_removes_before_appending() {
        let mut order = store(&["A", "B", "X"]);
        order.apply(&oids(&["A", "B"]), &oids(&["C", "D"]));
        assert_eq!(names(&order), vec!["X", "C", "D"]);
    }

    #[test]
    fn apply_keeps_position_of_replaced_id() {
        let mut order = store(&["A", "B", "X"]);
        order.apply(&oids(&["A", "B"]), &oids(&["B", "C"]));
        assert_eq!(names(&order), vec!["B", "X", "C"]);
    }

    #[test]
    fn reorder_requires_permutation() {
        let mut order = store(&["A", "B", "C"]);
        assert!(!order.reorder(oids(&["A", "B"])));
        assert!(!order.reorder(oids(&["A", "A", "B"])));
        assert!(!order.reorder(oids(&["A", "B", "Z"])));
        assert_eq!(names(&order), vec!["A", "B", "C"]);

        assert!(order.reorder(oids(&["C", "A", "B"])));
        assert_eq!(names(&order), vec!["C", "A", "B"]);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let labels: BTreeMap<Oid, &str> = oids(&["P", "Q", "R"])
            .into_iter()
            .zip(["B", "A", "A"])
            .collect();

        let mut order = store(&["P", "Q", "R"]);
        order.sort_by_key(|oid| labels[oid]);
        assert_eq!(names(&order), vec!["Q", "R", "P"]);

        let mut order = store(&["P", "R", "Q"]);
        order.sort_by_key(|oid| labels[oid]);
        assert_eq!(names(&order), vec!["R", "Q", "P"]);
    }

    #[test]
    fn symmetric_difference_reports_both_directions() {
        let order = store(&["A", "B"]);
        let keys = oids(&["B", "C"]);
        let mismatch = order.symmetric_difference(&keys);
        assert_eq!(mismatch.missing, oids(&["C"]));
        assert_eq!(mismatch.unknown, oids(&["A"]));
        assert!(mismatch.duplicates.is_empty());
    }
}
