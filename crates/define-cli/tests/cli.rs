//! Output of the editor commands, rendered without the binary.

use std::fs;

use define_cli::import::ImportReport;
use define_cli::overview::DocumentOverview;
use define_cli::script::{outline, parse_script, read_script, run_script};
use define_model::{
    CodeList, CodeListItem, CodeListKind, Comment, DataType, Document, DocumentRef, ItemDef,
    ItemGroup, ItemRef, Leaf, LeafKind, Method, Oid, OidKind, Standard, StandardKind,
};
use define_store::{
    Action, EditorContext, IntegrityPolicy, OrderAction, Resolution, StoreConfig, Tab,
};
use tempfile::tempdir;

fn oid(value: &str) -> Oid {
    Oid::new(value).unwrap()
}

fn leaf(id: &str, kind: LeafKind, title: &str, href: &str) -> Leaf {
    Leaf {
        oid: oid(id),
        kind,
        title: title.to_string(),
        href: href.to_string(),
        base_folder: None,
    }
}

fn sex_code_list() -> CodeList {
    let mut sex = CodeList::new(oid("CL.SEX"), "Sex", CodeListKind::Decoded);
    sex.items.push(CodeListItem::decoded(oid("CLI.SEX.M"), "M", "Male"));
    sex.items.push(CodeListItem::decoded(oid("CLI.SEX.F"), "F", "Female"));
    sex
}

/// `IG.DM` (three variables) and `IG.AE` (two), one code list, one leaf.
fn document() -> Document {
    let mut doc = Document::new(oid("ST.CDISC01"), oid("MDV.CDISC01"), "CDISC01");
    let mdv = doc.mdv_mut();

    let sdtmig = Standard::new(oid("STD.SDTMIG"), "SDTMIG", StandardKind::ImplementationGuide, "3.3");
    mdv.order.standards.add([&sdtmig.oid]);
    mdv.standards.insert(sdtmig.oid.clone(), sdtmig);

    let acrf = leaf("LF.ACRF", LeafKind::AnnotatedCrf, "Annotated CRF", "acrf.pdf");
    mdv.order.leafs.add([&acrf.oid]);
    mdv.leafs.insert(acrf.oid.clone(), acrf);

    let mut dm_comment = Comment::new(oid("COM.DM"), "One record per subject");
    dm_comment.documents.push(DocumentRef::new(oid("LF.ACRF")));
    mdv.comments.insert(dm_comment.oid.clone(), dm_comment);
    let age_comment = Comment::new(oid("COM.AGE"), "Age at informed consent");
    mdv.comments.insert(age_comment.oid.clone(), age_comment);
    let method = Method::new(oid("MT.AGE"), "Algorithm for AGE", "AGE = RFICDTC - BRTHDTC");
    mdv.methods.insert(method.oid.clone(), method);

    let sex = sex_code_list();
    mdv.order.code_lists.add([&sex.oid]);
    mdv.code_lists.insert(sex.oid.clone(), sex);

    let mut age = ItemDef::new(oid("IT.DM.AGE"), "AGE", DataType::Integer);
    age.comment_oid = Some(oid("COM.AGE"));
    let mut sex_def = ItemDef::new(oid("IT.DM.SEX"), "SEX", DataType::Text);
    sex_def.code_list_oid = Some(oid("CL.SEX"));
    for def in [
        ItemDef::new(oid("IT.STUDYID"), "STUDYID", DataType::Text),
        age,
        sex_def,
        ItemDef::new(oid("IT.AE.AETERM"), "AETERM", DataType::Text),
    ] {
        mdv.item_defs.insert(def.oid.clone(), def);
    }

    let mut dm = ItemGroup::new(oid("IG.DM"), "DM");
    dm.dataset_class = Some("SPECIAL PURPOSE".to_string());
    dm.comment_oid = Some(oid("COM.DM"));
    dm.standard_oid = Some(oid("STD.SDTMIG"));
    let mut age_ref = ItemRef::new(oid("IR.DM.AGE"), oid("IT.DM.AGE"));
    age_ref.method_oid = Some(oid("MT.AGE"));
    dm.item_refs = vec![
        ItemRef::new(oid("IR.DM.STUDYID"), oid("IT.STUDYID")),
        age_ref,
        ItemRef::new(oid("IR.DM.SEX"), oid("IT.DM.SEX")),
    ];

    let mut ae = ItemGroup::new(oid("IG.AE"), "AE");
    ae.dataset_class = Some("EVENTS".to_string());
    ae.item_refs = vec![
        ItemRef::new(oid("IR.AE.STUDYID"), oid("IT.STUDYID")),
        ItemRef::new(oid("IR.AE.AETERM"), oid("IT.AE.AETERM")),
    ];

    for group in [dm, ae] {
        mdv.order.item_groups.add([&group.oid]);
        mdv.item_groups.insert(group.oid.clone(), group);
    }
    doc
}

fn context(integrity: IntegrityPolicy) -> EditorContext {
    let config = StoreConfig {
        integrity,
        ..StoreConfig::default()
    };
    EditorContext::open(document(), config).unwrap()
}

// ============================================================================
// inspect
// ============================================================================

#[test]
fn overview_follows_display_order() {
    let overview = DocumentOverview::from_document(&document());
    assert_eq!(overview.item_groups[0].standard.as_deref(), Some("SDTMIG 3.3"));
    insta::assert_snapshot!(overview.outline(), @r"
    study CDISC01 (define 2.1.0)
      dataset IG.DM DM [SPECIAL PURPOSE] 3 variables
      dataset IG.AE AE [EVENTS] 2 variables
      codelist CL.SEX Sex (decoded) 2 items
      2 item groups, 4 item definitions, 1 code lists, 1 standards, 2 comments, 1 methods, 1 leafs
    ");
}

#[test]
fn overview_reflects_sorted_order() {
    let mut ctx = context(IntegrityPolicy::Strict);
    ctx.dispatch(Action::Order(OrderAction::SortByName {
        kind: OidKind::ItemGroup,
    }))
    .unwrap();

    let overview = DocumentOverview::from_document(ctx.document());
    let names: Vec<&str> = overview.item_groups.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, ["AE", "DM"]);
}

// ============================================================================
// apply
// ============================================================================

const SCRIPT: &str = r#"[
    { "type": "leaf", "payload": { "op": "add", "leaf": {
        "oid": "LF.SDRG", "kind": "supplemental_doc",
        "title": "Reviewers Guide", "href": "sdrg.pdf" } } },
    { "type": "view", "payload": { "op": "select_tab", "tab": "documents" } },
    { "type": "comment", "payload": { "op": "attach", "oid": "COM.NOPE",
        "target": { "kind": "item_group", "oid": "IG.AE" } } },
    { "type": "item_group", "payload": { "op": "delete", "oids": ["IG.AE"] } },
    { "type": "undo" },
    { "type": "redo" },
    { "type": "redo" }
]"#;

#[test]
fn script_outcomes_are_reported_per_step() {
    let mut ctx = context(IntegrityPolicy::Lenient);
    let actions = parse_script(SCRIPT).unwrap();
    let mut published = 0;
    let reports = run_script(&mut ctx, actions, |_| published += 1).unwrap();

    assert_eq!(published, 7);
    assert_eq!(ctx.history().len(), 3);
    assert_eq!(ctx.view().tab, Tab::Documents);
    assert!(!ctx.document().mdv().item_groups.contains_key(&oid("IG.AE")));
    insta::assert_snapshot!(outline(&reports), @r"
    1. leaf         applied
    2. view         view only
    3. comment      rejected: IG.AE.comment_oid points at unknown comment COM.NOPE
    4. item_group   applied
    5. undo         undone
    6. redo         redone
    7. redo         unchanged
    ");
}

#[test]
fn strict_script_stops_at_the_failing_step() {
    let mut ctx = context(IntegrityPolicy::Strict);
    let actions = parse_script(SCRIPT).unwrap();
    let err = run_script(&mut ctx, actions, |_| {}).unwrap_err();

    assert_eq!(err.to_string(), "step 3 (comment) failed");
    // The first step stays applied.
    assert_eq!(ctx.history().len(), 2);
}

#[test]
fn unreadable_script_names_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("edits.json");
    fs::write(&path, r#"[{ "type": "rename_everything" }]"#).unwrap();

    let err = read_script(&path).unwrap_err();
    assert!(err.to_string().starts_with("invalid action script"));
    assert!(read_script(&dir.path().join("missing.json")).is_err());
}

// ============================================================================
// reconcile
// ============================================================================

/// The local document with one changed comment, one copied comment, a new
/// leaf and a new code list.
fn incoming() -> Document {
    let mut doc = document();
    let mdv = doc.mdv_mut();

    mdv.comments.get_mut(&oid("COM.AGE")).unwrap().descriptions[0].value =
        "Age at screening".to_string();
    let mut copy = mdv.comments[&oid("COM.DM")].clone();
    copy.oid = oid("COM.DM.COPY");
    mdv.comments.insert(copy.oid.clone(), copy);

    let sdrg = leaf("LF.SDRG", LeafKind::SupplementalDoc, "Reviewers Guide", "sdrg.pdf");
    mdv.order.leafs.add([&sdrg.oid]);
    mdv.leafs.insert(sdrg.oid.clone(), sdrg);

    let mut ny = CodeList::new(oid("CL.NY"), "No Yes Response", CodeListKind::Decoded);
    ny.items.push(CodeListItem::decoded(oid("CLI.NY.N"), "N", "No"));
    ny.items.push(CodeListItem::decoded(oid("CLI.NY.Y"), "Y", "Yes"));
    mdv.order.code_lists.add([&ny.oid]);
    mdv.code_lists.insert(ny.oid.clone(), ny);
    doc
}

#[test]
fn import_report_classifies_each_collection() {
    let report = ImportReport::build(&document(), &incoming());
    assert!(report.has_conflicts());
    assert_eq!(report.comments.oid_map[&oid("COM.DM.COPY")], oid("COM.DM"));
    insta::assert_snapshot!(report.outline(), @r"
    leafs      unchanged=1 renamed=0 new=1 conflicts=0
    comments   unchanged=2 renamed=1 new=0 conflicts=1 [COM.AGE]
    methods    unchanged=1 renamed=0 new=0 conflicts=0
    code lists unchanged=1 renamed=0 new=1 conflicts=0
    ");
}

#[test]
fn identical_document_imports_nothing() {
    let report = ImportReport::build(&document(), &document());
    assert!(report.is_noop());
    assert!(report.into_actions(Resolution::AdoptIncoming).is_empty());
}

#[test]
fn keeping_local_adds_only_new_entities() {
    let mut ctx = context(IntegrityPolicy::Strict);
    let actions = ImportReport::build(ctx.document(), &incoming()).into_actions(Resolution::KeepLocal);
    assert_eq!(actions.len(), 2);

    run_script(&mut ctx, actions, |_| {}).unwrap();
    let mdv = ctx.document().mdv();
    let leafs: Vec<&str> = mdv.order.leafs.iter().map(Oid::as_str).collect();
    let code_lists: Vec<&str> = mdv.order.code_lists.iter().map(Oid::as_str).collect();
    assert_eq!(leafs, ["LF.ACRF", "LF.SDRG"]);
    assert_eq!(code_lists, ["CL.SEX", "CL.NY"]);
    assert_eq!(
        mdv.comments[&oid("COM.AGE")].descriptions[0].value,
        "Age at informed consent"
    );
}

#[test]
fn adopting_incoming_replaces_conflicts_in_place() {
    let mut ctx = context(IntegrityPolicy::Strict);
    let actions =
        ImportReport::build(ctx.document(), &incoming()).into_actions(Resolution::AdoptIncoming);
    assert_eq!(actions.len(), 3);

    run_script(&mut ctx, actions, |_| {}).unwrap();
    let mdv = ctx.document().mdv();
    assert_eq!(mdv.comments[&oid("COM.AGE")].descriptions[0].value, "Age at screening");
    assert_eq!(
        mdv.item_defs[&oid("IT.DM.AGE")].comment_oid,
        Some(oid("COM.AGE"))
    );
    assert!(!mdv.comments.contains_key(&oid("COM.DM.COPY")));
}

/// The annotated CRF under a new identifier, with comments and a code list
/// pointing at incoming identifiers only.
fn renumbered_incoming() -> Document {
    let mut doc = document();
    let mdv = doc.mdv_mut();

    mdv.leafs.remove(&oid("LF.ACRF"));
    mdv.order.leafs.remove(&[oid("LF.ACRF")]);
    let acrf = leaf("LF.ACRF2", LeafKind::AnnotatedCrf, "Annotated CRF", "acrf-v2.pdf");
    mdv.order.leafs.add([&acrf.oid]);
    mdv.leafs.insert(acrf.oid.clone(), acrf);

    mdv.comments.get_mut(&oid("COM.DM")).unwrap().documents =
        vec![DocumentRef::new(oid("LF.ACRF2"))];
    let mut copy = mdv.comments[&oid("COM.DM")].clone();
    copy.oid = oid("COM.DM.COPY");
    mdv.comments.insert(copy.oid.clone(), copy);
    let mut new = Comment::new(oid("COM.NEW"), "See page 3");
    new.documents.push(DocumentRef::new(oid("LF.ACRF2")));
    mdv.comments.insert(new.oid.clone(), new);

    let mut ny = CodeList::new(oid("CL.NY"), "No Yes Response", CodeListKind::Decoded);
    ny.comment_oid = Some(oid("COM.DM.COPY"));
    ny.items.push(CodeListItem::decoded(oid("CLI.NY.N"), "N", "No"));
    mdv.order.code_lists.add([&ny.oid]);
    mdv.code_lists.insert(ny.oid.clone(), ny);
    doc
}

#[test]
fn references_to_renamed_entities_are_renumbered() {
    let mut ctx = context(IntegrityPolicy::Strict);
    let report = ImportReport::build(ctx.document(), &renumbered_incoming());
    assert_eq!(report.leafs.oid_map[&oid("LF.ACRF2")], oid("LF.ACRF"));
    insta::assert_snapshot!(report.outline(), @r"
    leafs      unchanged=1 renamed=1 new=0 conflicts=0
    comments   unchanged=3 renamed=1 new=1 conflicts=0
    methods    unchanged=1 renamed=0 new=0 conflicts=0
    code lists unchanged=1 renamed=0 new=1 conflicts=0
    ");

    let actions = report.into_actions(Resolution::KeepLocal);
    let reports = run_script(&mut ctx, actions, |_| {}).unwrap();
    assert!(reports.iter().all(|r| r.outcome == "applied"));

    let mdv = ctx.document().mdv();
    assert!(!mdv.leafs.contains_key(&oid("LF.ACRF2")));
    assert_eq!(mdv.comments[&oid("COM.NEW")].documents[0].leaf_oid, oid("LF.ACRF"));
    assert_eq!(mdv.code_lists[&oid("CL.NY")].comment_oid, Some(oid("COM.DM")));
}

#[test]
fn lenient_script_continues_past_a_duplicate_add() {
    let mut ctx = context(IntegrityPolicy::Lenient);
    let actions = parse_script(
        r#"[
        { "type": "leaf", "payload": { "op": "add", "leaf": {
            "oid": "LF.ACRF", "kind": "annotated_crf",
            "title": "Annotated CRF", "href": "acrf.pdf" } } },
        { "type": "leaf", "payload": { "op": "delete", "oids": ["LF.ACRF"] } }
    ]"#,
    )
    .unwrap();
    let reports = run_script(&mut ctx, actions, |_| {}).unwrap();

    assert!(reports[0].is_rejected());
    insta::assert_snapshot!(outline(&reports), @r"
    1. leaf         rejected: leaf LF.ACRF already exists
    2. leaf         applied
    ");
    assert_eq!(ctx.history().len(), 2);
}
