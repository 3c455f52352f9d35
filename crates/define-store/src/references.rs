//! Cross-references between entities.
//!
//! [`References`] lists the identifiers an entity points at and removes
//! references to deleted identifiers. The composer uses it for orphan
//! cleanup and the integrity check for dangling-reference detection.

use std::collections::BTreeSet;

use define_model::{
    AnalysisResult, CodeList, Comment, DocumentRef, ItemDef, ItemGroup, MetadataVersion, Method,
    Oid, OidKind, ResultDisplay, Standard,
};

/// One outgoing reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    pub field: &'static str,
    pub kind: OidKind,
    pub oid: &'a Oid,
}

impl<'a> Reference<'a> {
    fn new(field: &'static str, kind: OidKind, oid: &'a Oid) -> Self {
        Self { field, kind, oid }
    }
}

pub trait References {
    fn references(&self) -> Vec<Reference<'_>>;

    /// Drop every reference to an identifier in `removed`.
    fn purge(&mut self, removed: &BTreeSet<Oid>);
}

fn push_opt<'a>(
    out: &mut Vec<Reference<'a>>,
    field: &'static str,
    kind: OidKind,
    oid: Option<&'a Oid>,
) {
    if let Some(oid) = oid {
        out.push(Reference::new(field, kind, oid));
    }
}

fn push_documents<'a>(out: &mut Vec<Reference<'a>>, documents: &'a [DocumentRef]) {
    out.extend(
        documents
            .iter()
            .map(|d| Reference::new("documents", OidKind::Leaf, &d.leaf_oid)),
    );
}

fn purge_opt(slot: &mut Option<Oid>, removed: &BTreeSet<Oid>) {
    if slot.as_ref().is_some_and(|oid| removed.contains(oid)) {
        *slot = None;
    }
}

fn purge_documents(documents: &mut Vec<DocumentRef>, removed: &BTreeSet<Oid>) {
    documents.retain(|d| !removed.contains(&d.leaf_oid));
}

impl References for ItemGroup {
    fn references(&self) -> Vec<Reference<'_>> {
        let mut out = Vec::new();
        push_opt(&mut out, "comment_oid", OidKind::Comment, self.comment_oid.as_ref());
        push_opt(&mut out, "standard_oid", OidKind::Standard, self.standard_oid.as_ref());
        push_opt(
            &mut out,
            "archive_location_oid",
            OidKind::Leaf,
            self.archive_location_oid.as_ref(),
        );
        for item_ref in &self.item_refs {
            out.push(Reference::new("item_oid", OidKind::ItemDef, &item_ref.item_oid));
            push_opt(&mut out, "method_oid", OidKind::Method, item_ref.method_oid.as_ref());
        }
        out
    }

    fn purge(&mut self, removed: &BTreeSet<Oid>) {
        purge_opt(&mut self.comment_oid, removed);
        purge_opt(&mut self.standard_oid, removed);
        purge_opt(&mut self.archive_location_oid, removed);
        self.item_refs
            .retain(|r| !removed.contains(&r.item_oid) && !removed.contains(&r.oid));
        for item_ref in &mut self.item_refs {
            purge_opt(&mut item_ref.method_oid, removed);
        }
    }
}

impl References for ItemDef {
    fn references(&self) -> Vec<Reference<'_>> {
        let mut out = Vec::new();
        push_opt(&mut out, "code_list_oid", OidKind::CodeList, self.code_list_oid.as_ref());
        push_opt(&mut out, "comment_oid", OidKind::Comment, self.comment_oid.as_ref());
        for origin in &self.origins {
            push_documents(&mut out, &origin.documents);
        }
        out
    }

    fn purge(&mut self, removed: &BTreeSet<Oid>) {
        purge_opt(&mut self.code_list_oid, removed);
        purge_opt(&mut self.comment_oid, removed);
        for origin in &mut self.origins {
            purge_documents(&mut origin.documents, removed);
        }
    }
}

impl References for CodeList {
    fn references(&self) -> Vec<Reference<'_>> {
        let mut out = Vec::new();
        push_opt(&mut out, "standard_oid", OidKind::Standard, self.standard_oid.as_ref());
        push_opt(&mut out, "comment_oid", OidKind::Comment, self.comment_oid.as_ref());
        out
    }

    fn purge(&mut self, removed: &BTreeSet<Oid>) {
        purge_opt(&mut self.standard_oid, removed);
        purge_opt(&mut self.comment_oid, removed);
    }
}

impl References for Standard {
    fn references(&self) -> Vec<Reference<'_>> {
        let mut out = Vec::new();
        push_opt(&mut out, "comment_oid", OidKind::Comment, self.comment_oid.as_ref());
        out
    }

    fn purge(&mut self, removed: &BTreeSet<Oid>) {
        purge_opt(&mut self.comment_oid, removed);
    }
}

impl References for Comment {
    fn references(&self) -> Vec<Reference<'_>> {
        let mut out = Vec::new();
        push_documents(&mut out, &self.documents);
        out
    }

    fn purge(&mut self, removed: &BTreeSet<Oid>) {
        purge_documents(&mut self.documents, removed);
    }
}

impl References for Method {
    fn references(&self) -> Vec<Reference<'_>> {
        let mut out = Vec::new();
        push_documents(&mut out, &self.documents);
        out
    }

    fn purge(&mut self, removed: &BTreeSet<Oid>) {
        purge_documents(&mut self.documents, removed);
    }
}

impl References for ResultDisplay {
    fn references(&self) -> Vec<Reference<'_>> {
        let mut out: Vec<_> = self
            .analysis_result_oids
            .iter()
            .map(|oid| Reference::new("analysis_result_oids", OidKind::AnalysisResult, oid))
            .collect();
        push_documents(&mut out, &self.documents);
        out
    }

    fn purge(&mut self, removed: &BTreeSet<Oid>) {
        self.analysis_result_oids.retain(|oid| !removed.contains(oid));
        purge_documents(&mut self.documents, removed);
    }
}

impl References for AnalysisResult {
    fn references(&self) -> Vec<Reference<'_>> {
        let mut out = Vec::new();
        push_opt(&mut out, "parameter_oid", OidKind::ItemDef, self.parameter_oid.as_ref());
        out.extend(
            self.analysis_dataset_oids
                .iter()
                .map(|oid| Reference::new("analysis_dataset_oids", OidKind::ItemGroup, oid)),
        );
        push_documents(&mut out, &self.documents);
        push_opt(&mut out, "comment_oid", OidKind::Comment, self.comment_oid.as_ref());
        out
    }

    fn purge(&mut self, removed: &BTreeSet<Oid>) {
        purge_opt(&mut self.parameter_oid, removed);
        self.analysis_dataset_oids
            .retain(|oid| !removed.contains(oid));
        purge_documents(&mut self.documents, removed);
        purge_opt(&mut self.comment_oid, removed);
    }
}

/// Every reference in the metadata version, paired with its source entity.
pub fn all_references(mdv: &MetadataVersion) -> Vec<(&Oid, Reference<'_>)> {
    fn collect<'a, T: References + 'a>(
        out: &mut Vec<(&'a Oid, Reference<'a>)>,
        entities: impl Iterator<Item = (&'a Oid, &'a T)>,
    ) {
        for (source, entity) in entities {
            out.extend(entity.references().into_iter().map(|r| (source, r)));
        }
    }

    let mut out = Vec::new();
    collect(&mut out, mdv.item_groups.iter());
    collect(&mut out, mdv.item_defs.iter());
    collect(&mut out, mdv.code_lists.iter());
    collect(&mut out, mdv.standards.iter());
    collect(&mut out, mdv.comments.iter());
    collect(&mut out, mdv.methods.iter());
    collect(&mut out, mdv.result_displays.iter());
    collect(&mut out, mdv.analysis_results.iter());
    out
}

/// Set of identifiers referenced from anywhere in the metadata version.
pub fn referenced_oids(mdv: &MetadataVersion) -> BTreeSet<Oid> {
    all_references(mdv)
        .into_iter()
        .map(|(_, r)| r.oid.clone())
        .collect()
}

/// Remove references to `removed` from every entity.
pub fn purge_all(mdv: &mut MetadataVersion, removed: &BTreeSet<Oid>) {
    fn purge<'a, T: References + 'a>(
        entities: impl Iterator<Item = &'a mut T>,
        removed: &BTreeSet<Oid>,
    ) {
        for entity in entities {
            entity.purge(removed);
        }
    }

    purge(mdv.item_groups.values_mut(), removed);
    purge(mdv.item_defs.values_mut(), removed);
    purge(mdv.code_lists.values_mut(), removed);
    purge(mdv.standards.values_mut(), removed);
    purge(mdv.comments.values_mut(), removed);
    purge(mdv.methods.values_mut(), removed);
    purge(mdv.result_displays.values_mut(), removed);
    purge(mdv.analysis_results.values_mut(), removed);
}
