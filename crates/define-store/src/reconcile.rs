//! Reconciliation of incoming entities against the local document.
//!
//! Incoming entities (a reloaded terminology release, comments imported
//! from another study) are classified before anything is dispatched:
//!
//! - **unchanged**: an equivalent local entity exists
//! - **conflict**: the same identifier carries different content
//! - **new**: nothing local matches
//!
//! Conflicts are returned to the caller and only resolved through an
//! explicit [`Resolution`]; nothing is merged silently.

use std::collections::BTreeMap;

use define_model::{Entity, Oid};
use serde::{Deserialize, Serialize};

use crate::action::BulkReplace;
use crate::compare::SemanticEq;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict<T> {
    pub local: T,
    pub incoming: T,
}

impl<T: Entity> Conflict<T> {
    pub fn oid(&self) -> &Oid {
        self.local.oid()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    KeepLocal,
    AdoptIncoming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation<T> {
    /// Incoming identifiers whose content already exists locally.
    pub unchanged: Vec<Oid>,
    /// Incoming identifier to the identifier of its local equivalent, for
    /// entities matched under a different identifier. Callers use it to
    /// renumber references in the incoming data.
    pub oid_map: BTreeMap<Oid, Oid>,
    pub conflicts: Vec<Conflict<T>>,
    pub new: Vec<T>,
}

impl<T> Default for Reconciliation<T> {
    fn default() -> Self {
        Self {
            unchanged: Vec::new(),
            oid_map: BTreeMap::new(),
            conflicts: Vec::new(),
            new: Vec::new(),
        }
    }
}

impl<T: Entity + Clone> Reconciliation<T> {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Whether applying the reconciliation would change nothing.
    pub fn is_noop(&self) -> bool {
        self.conflicts.is_empty() && self.new.is_empty()
    }

    /// Bulk replacement adding the new entities and the conflicts resolved
    /// with [`Resolution::AdoptIncoming`]. Conflicts without a resolution
    /// keep the local version.
    pub fn into_replacement(self, resolutions: &BTreeMap<Oid, Resolution>) -> BulkReplace<T> {
        let mut bulk = BulkReplace::default();
        for conflict in self.conflicts {
            if resolutions.get(conflict.oid()) == Some(&Resolution::AdoptIncoming) {
                bulk.removed.push(conflict.local.oid().clone());
                bulk.added.push(conflict.incoming);
            }
        }
        bulk.added.extend(self.new);
        bulk
    }
}

/// Classify each incoming entity against `local`.
pub fn reconcile<T>(
    local: &BTreeMap<Oid, T>,
    incoming: impl IntoIterator<Item = T>,
) -> Reconciliation<T>
where
    T: Entity + SemanticEq + Clone,
{
    let mut result = Reconciliation::default();
    for entity in incoming {
        let oid = entity.oid().clone();
        if let Some(existing) = local.get(&oid) {
            if existing.is_equivalent(&entity) {
                result.unchanged.push(oid);
            } else {
                result.conflicts.push(Conflict {
                    local: existing.clone(),
                    incoming: entity,
                });
            }
        } else if let Some(equivalent) = local.values().find(|l| l.is_equivalent(&entity)) {
            result.oid_map.insert(oid.clone(), equivalent.oid().clone());
            result.unchanged.push(oid);
        } else {
            result.new.push(entity);
        }
    }
    result
}
