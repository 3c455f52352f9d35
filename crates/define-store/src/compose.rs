//! Document composer.
//!
//! Builds the next frame from the present one. The present frame is never
//! modified: the composer clones it, threads the action through every
//! reducer, cleans up orphans and verifies the result. On error the working
//! copy is dropped.

use std::collections::BTreeSet;

use define_model::{Document, MetadataVersion, Oid, OidKind, StdConstants};
use tracing::debug;

use crate::action::Action;
use crate::error::{Result, StoreError};
use crate::integrity;
use crate::reducers::{
    code_lists, comments, item_defs, item_groups, leafs, methods, order, result_displays,
    standards, study, terminology,
};
use crate::references::{purge_all, referenced_oids};

/// Kinds whose identifiers can disappear as the result of an action.
const CONTENT_KINDS: [OidKind; 11] = [
    OidKind::ItemGroup,
    OidKind::ItemRef,
    OidKind::ItemDef,
    OidKind::CodeList,
    OidKind::CodeListItem,
    OidKind::Standard,
    OidKind::Comment,
    OidKind::Method,
    OidKind::Leaf,
    OidKind::ResultDisplay,
    OidKind::AnalysisResult,
];

#[derive(Debug, Clone, Default)]
pub struct DocumentComposer {
    constants: StdConstants,
}

impl DocumentComposer {
    pub fn new(constants: StdConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &StdConstants {
        &self.constants
    }

    /// Compose the document that follows `prev` under `action`.
    pub fn compose(&self, prev: &Document, action: &Action) -> Result<Document> {
        let next = match action {
            Action::Load(document) | Action::Replace(document) => document.as_ref().clone(),
            _ => {
                let mut next = prev.clone();
                reduce(&mut next, action)?;
                sweep_orphans(prev.mdv(), next.mdv_mut());
                unload_orphaned_terminology(prev, &mut next);
                next
            }
        };

        let report = integrity::verify(&next, &self.constants);
        if report.is_empty() {
            Ok(next)
        } else {
            Err(StoreError::Integrity(report))
        }
    }
}

fn reduce(next: &mut Document, action: &Action) -> Result<()> {
    study::reduce(&mut next.study, action)?;
    terminology::reduce(&mut next.terminology, action)?;

    let mdv = next.mdv_mut();
    item_groups::reduce(&mut mdv.item_groups, action)?;
    item_defs::reduce(&mut mdv.item_defs, action)?;
    code_lists::reduce(&mut mdv.code_lists, action)?;
    standards::reduce(&mut mdv.standards, action)?;
    comments::reduce(&mut mdv.comments, action)?;
    methods::reduce(&mut mdv.methods, action)?;
    leafs::reduce(&mut mdv.leafs, action)?;
    result_displays::reduce(&mut mdv.result_displays, &mut mdv.analysis_results, action)?;
    order::reduce(mdv, action)
}

fn content_oids(mdv: &MetadataVersion) -> BTreeSet<Oid> {
    CONTENT_KINDS
        .iter()
        .flat_map(|kind| mdv.keys_of(*kind))
        .cloned()
        .collect()
}

/// Unload the packages of standards removed by this action.
fn unload_orphaned_terminology(prev: &Document, next: &mut Document) {
    let standards = &next.study.metadata_version.standards;
    next.terminology
        .retain(|oid, _| standards.contains_key(oid) || !prev.mdv().standards.contains_key(oid));
}

/// Remove references to deleted identifiers, then drop entities that lost
/// their last reference.
///
/// Only item definitions, comments and methods that were referenced in the
/// previous frame are swept: an entity added unreferenced stays. Dropping
/// one entity can orphan another (an item definition's comment), so the
/// sweep repeats until nothing changes. Analysis results not listed by any
/// result display are dropped first.
fn sweep_orphans(prev: &MetadataVersion, next: &mut MetadataVersion) {
    let removed: BTreeSet<Oid> = content_oids(prev)
        .difference(&content_oids(next))
        .cloned()
        .collect();
    if !removed.is_empty() {
        debug!(count = removed.len(), "purging references to removed entities");
        purge_all(next, &removed);
    }

    let listed: BTreeSet<&Oid> = next
        .result_displays
        .values()
        .flat_map(|display| &display.analysis_result_oids)
        .collect();
    next.analysis_results.retain(|oid, _| listed.contains(oid));

    let previously_referenced = referenced_oids(prev);
    loop {
        let referenced = referenced_oids(next);
        let orphans: Vec<Oid> = next
            .item_defs
            .keys()
            .chain(next.comments.keys())
            .chain(next.methods.keys())
            .filter(|oid| previously_referenced.contains(*oid) && !referenced.contains(*oid))
            .cloned()
            .collect();
        if orphans.is_empty() {
            break;
        }
        debug!(count = orphans.len(), "dropping orphaned entities");
        for oid in &orphans {
            next.item_defs.remove(oid);
            next.comments.remove(oid);
            next.methods.remove(oid);
        }
    }
}
