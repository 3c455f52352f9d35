//! Reconciling incoming entities and dispatching the outcome.

mod common;

use std::collections::BTreeMap;

use common::{context, oid};
use define_model::{Comment, DocumentRef, Standard, StandardKind};
use define_store::{Action, CommentAction, Resolution, StandardAction, reconcile};

#[test]
fn incoming_comments_are_classified() {
    let ctx = context();
    let local = &ctx.document().mdv().comments;

    // Same content under another identifier.
    let mut imported = Comment::new(oid("COM.IMPORTED.1"), "One record per subject");
    imported.documents.push(DocumentRef::new(oid("LF.ACRF")));

    let incoming = vec![
        imported,
        // Same identifier, new text.
        Comment::new(oid("COM.AGE"), "Age at screening"),
        Comment::new(oid("COM.NEW"), "Collected on the CRF"),
    ];
    let result = reconcile(local, incoming);

    assert_eq!(result.unchanged, vec![oid("COM.IMPORTED.1")]);
    assert_eq!(result.oid_map[&oid("COM.IMPORTED.1")], oid("COM.DM"));
    assert_eq!(result.conflicts.len(), 1);
    assert_eq!(result.conflicts[0].oid(), &oid("COM.AGE"));
    assert_eq!(result.new.len(), 1);
    assert!(result.has_conflicts());
}

#[test]
fn equivalent_terminology_standard_is_a_noop() {
    let ctx = context();
    let mut reloaded = ctx.document().mdv().standards[&oid("STD.CT")].clone();
    reloaded.status = Some(String::new());

    let result = reconcile(&ctx.document().mdv().standards, [reloaded]);
    assert!(result.is_noop());
}

#[test]
fn adopted_conflicts_are_dispatched_as_bulk_replacement() {
    let mut ctx = context();
    let incoming = vec![
        Comment::new(oid("COM.AGE"), "Age at screening"),
        Comment::new(oid("COM.DM"), "Demographics"),
    ];
    let result = reconcile(&ctx.document().mdv().comments, incoming);
    assert_eq!(result.conflicts.len(), 2);

    let resolutions = BTreeMap::from([
        (oid("COM.AGE"), Resolution::AdoptIncoming),
        (oid("COM.DM"), Resolution::KeepLocal),
    ]);
    let bulk = result.into_replacement(&resolutions);
    assert_eq!(bulk.removed, vec![oid("COM.AGE")]);

    ctx.dispatch(Action::Comment(CommentAction::Replace(bulk)))
        .unwrap();
    let comments = &ctx.document().mdv().comments;
    assert_eq!(comments[&oid("COM.AGE")].descriptions[0].value, "Age at screening");
    assert_eq!(comments[&oid("COM.DM")].descriptions[0].value, "One record per subject");
    // Still attached: the identifier was replaced in place.
    assert_eq!(
        ctx.document().mdv().item_defs[&oid("IT.DM.AGE")].comment_oid,
        Some(oid("COM.AGE"))
    );
}

#[test]
fn new_standards_are_appended_in_order() {
    let mut ctx = context();
    let adam = Standard::new(
        oid("STD.ADAMIG"),
        "ADaMIG",
        StandardKind::ImplementationGuide,
        "1.3",
    );
    let result = reconcile(&ctx.document().mdv().standards, [adam]);
    let bulk = result.into_replacement(&BTreeMap::new());

    ctx.dispatch(Action::Standard(StandardAction::Replace(bulk)))
        .unwrap();
    let order: Vec<&str> = ctx.order().standards.iter().map(|o| o.as_str()).collect();
    assert_eq!(order, ["STD.SDTMIG", "STD.CT", "STD.ADAMIG"]);
}
