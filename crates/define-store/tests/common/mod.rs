//! Shared fixtures for define-store integration tests.

#![allow(dead_code)]

use define_model::{
    CodeList, CodeListItem, CodeListKind, Comment, DataType, Document, DocumentRef, ItemDef,
    ItemGroup, ItemRef, Leaf, LeafKind, Method, Oid, Standard, StandardKind,
};
use define_store::{EditorContext, IntegrityPolicy, SequentialOidGenerator, StoreConfig};

pub fn oid(value: &str) -> Oid {
    Oid::new(value).unwrap()
}

pub fn oids(values: &[&str]) -> Vec<Oid> {
    values.iter().map(|v| oid(v)).collect()
}

pub fn names(order: &define_model::OrderStore) -> Vec<&str> {
    order.iter().map(Oid::as_str).collect()
}

pub fn leaf(id: &str, title: &str) -> Leaf {
    Leaf {
        oid: oid(id),
        kind: LeafKind::SupplementalDoc,
        title: title.to_string(),
        href: format!("{}.pdf", title.to_lowercase()),
        base_folder: None,
    }
}

pub fn item_ref(id: &str, item: &str) -> ItemRef {
    ItemRef::new(oid(id), oid(item))
}

/// A small SDTM document:
///
/// - `IG.DM` (comment `COM.DM`) with `STUDYID`, `AGE` (comment `COM.AGE`,
///   method `MT.AGE`) and `SEX` (code list `CL.SEX`)
/// - `IG.AE` with `STUDYID` and `AETERM`
/// - standards `STD.SDTMIG`, `STD.CT`; leaf `LF.ACRF`
pub fn sample_document() -> Document {
    let mut doc = Document::new(oid("ST.CDISC01"), oid("MDV.CDISC01"), "CDISC01");
    let mdv = doc.mdv_mut();

    for standard in [
        Standard::new(oid("STD.SDTMIG"), "SDTMIG", StandardKind::ImplementationGuide, "3.3"),
        Standard::new(oid("STD.CT"), "CDISC/NCI", StandardKind::ControlledTerminology, "2024-03-29"),
    ] {
        mdv.order.standards.add([&standard.oid]);
        mdv.standards.insert(standard.oid.clone(), standard);
    }

    let mut acrf = leaf("LF.ACRF", "Annotated CRF");
    acrf.kind = LeafKind::AnnotatedCrf;
    mdv.order.leafs.add([&acrf.oid]);
    mdv.leafs.insert(acrf.oid.clone(), acrf);

    let mut dm_comment = Comment::new(oid("COM.DM"), "One record per subject");
    dm_comment.documents.push(DocumentRef::new(oid("LF.ACRF")));
    for comment in [dm_comment, Comment::new(oid("COM.AGE"), "Age at informed consent")] {
        mdv.comments.insert(comment.oid.clone(), comment);
    }
    let method = Method::new(oid("MT.AGE"), "Algorithm for AGE", "AGE = RFICDTC - BRTHDTC");
    mdv.methods.insert(method.oid.clone(), method);

    let mut sex = CodeList::new(oid("CL.SEX"), "Sex", CodeListKind::Decoded);
    sex.standard_oid = Some(oid("STD.CT"));
    sex.items.push(CodeListItem::decoded(oid("CLI.SEX.M"), "M", "Male"));
    sex.items.push(CodeListItem::decoded(oid("CLI.SEX.F"), "F", "Female"));
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
    let mut age_ref = item_ref("IR.DM.AGE", "IT.DM.AGE");
    age_ref.method_oid = Some(oid("MT.AGE"));
    dm.item_refs = vec![
        item_ref("IR.DM.STUDYID", "IT.STUDYID"),
        age_ref,
        item_ref("IR.DM.SEX", "IT.DM.SEX"),
    ];

    let mut ae = ItemGroup::new(oid("IG.AE"), "AE");
    ae.dataset_class = Some("EVENTS".to_string());
    ae.item_refs = vec![
        item_ref("IR.AE.STUDYID", "IT.STUDYID"),
        item_ref("IR.AE.AETERM", "IT.AE.AETERM"),
    ];

    for group in [dm, ae] {
        mdv.order.item_groups.add([&group.oid]);
        mdv.item_groups.insert(group.oid.clone(), group);
    }
    doc
}

pub fn config(integrity: IntegrityPolicy) -> StoreConfig {
    StoreConfig {
        integrity,
        ..StoreConfig::default()
    }
}

pub fn context() -> EditorContext {
    EditorContext::open(sample_document(), config(IntegrityPolicy::Strict))
        .unwrap()
        .with_oid_generator(SequentialOidGenerator::new())
}
