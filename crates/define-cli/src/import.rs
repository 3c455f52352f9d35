//! Import of comments, methods, leafs and code lists from another document.
//!
//! Each collection is reconciled separately; the result is shown to the user
//! and, on request, turned into bulk replace actions. Conflicts are resolved
//! all one way: either every local version stays or every incoming version
//! wins.
//!
//! Collections are reconciled leafs first, then comments and methods, then
//! code lists. Incoming references to an entity matched under a different
//! identifier are renumbered to the local identifier before the dependent
//! collection is classified.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use define_model::{
    CodeList, Comment, Document, DocumentRef, Entity, Leaf, Method, Oid, OrderStore,
};
use define_store::{
    Action, CodeListAction, CommentAction, LeafAction, MethodAction, Reconciliation, Resolution,
    reconcile,
};

/// Per-collection counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub collection: &'static str,
    pub unchanged: usize,
    /// Matched under a different identifier.
    pub renamed: usize,
    pub new: usize,
    pub conflicts: Vec<Oid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub leafs: Reconciliation<Leaf>,
    pub comments: Reconciliation<Comment>,
    pub methods: Reconciliation<Method>,
    pub code_lists: Reconciliation<CodeList>,
}

fn ordered<'a, T: Clone + 'a>(
    order: &'a OrderStore,
    map: &'a BTreeMap<Oid, T>,
) -> impl Iterator<Item = T> + 'a {
    order.iter().filter_map(|oid| map.get(oid)).cloned()
}

fn renumber(slot: &mut Option<Oid>, oid_map: &BTreeMap<Oid, Oid>) {
    if let Some(local) = slot.as_ref().and_then(|oid| oid_map.get(oid)) {
        *slot = Some(local.clone());
    }
}

fn renumber_documents(documents: &mut [DocumentRef], leaf_map: &BTreeMap<Oid, Oid>) {
    for document in documents {
        if let Some(local) = leaf_map.get(&document.leaf_oid) {
            document.leaf_oid = local.clone();
        }
    }
}

fn row<T: Entity + Clone>(collection: &'static str, rec: &Reconciliation<T>) -> ImportRow {
    ImportRow {
        collection,
        unchanged: rec.unchanged.len(),
        renamed: rec.oid_map.len(),
        new: rec.new.len(),
        conflicts: rec.conflicts.iter().map(|c| c.oid().clone()).collect(),
    }
}

fn resolutions<T: Entity>(
    rec: &Reconciliation<T>,
    resolution: Resolution,
) -> BTreeMap<Oid, Resolution> {
    rec.conflicts
        .iter()
        .map(|c| (c.oid().clone(), resolution))
        .collect()
}

impl ImportReport {
    pub fn build(local: &Document, incoming: &Document) -> Self {
        let local = local.mdv();
        let theirs = incoming.mdv();

        let leafs = reconcile(&local.leafs, ordered(&theirs.order.leafs, &theirs.leafs));
        let comments = reconcile(
            &local.comments,
            theirs.comments.values().cloned().map(|mut comment| {
                renumber_documents(&mut comment.documents, &leafs.oid_map);
                comment
            }),
        );
        let methods = reconcile(
            &local.methods,
            theirs.methods.values().cloned().map(|mut method| {
                renumber_documents(&mut method.documents, &leafs.oid_map);
                method
            }),
        );
        let code_lists = reconcile(
            &local.code_lists,
            ordered(&theirs.order.code_lists, &theirs.code_lists).map(|mut code_list| {
                renumber(&mut code_list.comment_oid, &comments.oid_map);
                code_list
            }),
        );

        Self {
            leafs,
            comments,
            methods,
            code_lists,
        }
    }

    pub fn rows(&self) -> Vec<ImportRow> {
        vec![
            row("leafs", &self.leafs),
            row("comments", &self.comments),
            row("methods", &self.methods),
            row("code lists", &self.code_lists),
        ]
    }

    pub fn is_noop(&self) -> bool {
        self.leafs.is_noop()
            && self.comments.is_noop()
            && self.methods.is_noop()
            && self.code_lists.is_noop()
    }

    pub fn has_conflicts(&self) -> bool {
        self.leafs.has_conflicts()
            || self.comments.has_conflicts()
            || self.methods.has_conflicts()
            || self.code_lists.has_conflicts()
    }

    /// Actions that add the new entities and apply `resolution` to every
    /// conflict. Leafs come first so that imported comments and methods can
    /// point at imported documents.
    pub fn into_actions(self, resolution: Resolution) -> Vec<Action> {
        let mut actions = Vec::new();

        let resolved = resolutions(&self.leafs, resolution);
        let bulk = self.leafs.into_replacement(&resolved);
        if !bulk.is_empty() {
            actions.push(Action::Leaf(LeafAction::Replace(bulk)));
        }

        let resolved = resolutions(&self.comments, resolution);
        let bulk = self.comments.into_replacement(&resolved);
        if !bulk.is_empty() {
            actions.push(Action::Comment(CommentAction::Replace(bulk)));
        }

        let resolved = resolutions(&self.methods, resolution);
        let bulk = self.methods.into_replacement(&resolved);
        if !bulk.is_empty() {
            actions.push(Action::Method(MethodAction::Replace(bulk)));
        }

        let resolved = resolutions(&self.code_lists, resolution);
        let bulk = self.code_lists.into_replacement(&resolved);
        if !bulk.is_empty() {
            actions.push(Action::CodeList(CodeListAction::Replace(bulk)));
        }

        actions
    }

    /// Plain-text rendering, one collection per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for row in self.rows() {
            let _ = write!(
                out,
                "{:<10} unchanged={} renamed={} new={} conflicts={}",
                row.collection,
                row.unchanged,
                row.renamed,
                row.new,
                row.conflicts.len()
            );
            if !row.conflicts.is_empty() {
                let oids: Vec<&str> = row.conflicts.iter().map(Oid::as_str).collect();
                let _ = write!(out, " [{}]", oids.join(", "));
            }
            out.push('\n');
        }
        out.truncate(out.trim_end().len());
        out
    }
}
