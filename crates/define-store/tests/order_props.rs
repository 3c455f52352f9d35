//! Order stores stay a bijection with their collections under any sequence
//! of adds, deletes and bulk replacements.

mod common;

use std::collections::BTreeSet;

use common::{context, leaf, oid};
use define_model::{CodeList, CodeListKind, Document, Oid, OidKind};
use define_store::{Action, BulkReplace, CodeListAction, LeafAction, OrderAction};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddLeaf(u8),
    DeleteLeafs(Vec<u8>),
    ReplaceLeafs { removed: Vec<u8>, added: BTreeSet<u8> },
    AddCodeList(u8),
    DeleteCodeList(u8),
    SortLeafs,
    Undo,
    Redo,
}

fn leaf_oid(n: u8) -> Oid {
    oid(&format!("LF.P{n}"))
}

fn code_list_oid(n: u8) -> Oid {
    oid(&format!("CL.P{n}"))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let index = 0u8..6;
    prop_oneof![
        3 => index.clone().prop_map(Op::AddLeaf),
        2 => prop::collection::vec(index.clone(), 0..3).prop_map(Op::DeleteLeafs),
        2 => (
            prop::collection::vec(index.clone(), 0..3),
            prop::collection::btree_set(index.clone(), 0..3),
        )
            .prop_map(|(removed, added)| Op::ReplaceLeafs { removed, added }),
        2 => index.clone().prop_map(Op::AddCodeList),
        1 => index.prop_map(Op::DeleteCodeList),
        1 => Just(Op::SortLeafs),
        1 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

fn action(op: &Op) -> Action {
    match op {
        Op::AddLeaf(n) => Action::Leaf(LeafAction::Add {
            leaf: leaf(leaf_oid(*n).as_str(), &format!("Document {}", 9 - n)),
        }),
        Op::DeleteLeafs(ns) => Action::Leaf(LeafAction::Delete {
            oids: ns.iter().copied().map(leaf_oid).collect(),
        }),
        Op::ReplaceLeafs { removed, added } => Action::Leaf(LeafAction::Replace(BulkReplace {
            removed: removed.iter().copied().map(leaf_oid).collect(),
            added: added
                .iter()
                .map(|n| leaf(leaf_oid(*n).as_str(), "Replacement"))
                .collect(),
        })),
        Op::AddCodeList(n) => Action::CodeList(CodeListAction::Add {
            code_list: Box::new(CodeList::new(
                code_list_oid(*n),
                format!("List {n}"),
                CodeListKind::Enumerated,
            )),
        }),
        Op::DeleteCodeList(n) => Action::CodeList(CodeListAction::Delete {
            oids: vec![code_list_oid(*n)],
        }),
        Op::SortLeafs => Action::Order(OrderAction::SortByName {
            kind: OidKind::Leaf,
        }),
        Op::Undo => Action::Undo,
        Op::Redo => Action::Redo,
    }
}

fn assert_bijection(document: &Document) -> Result<(), TestCaseError> {
    let mdv = document.mdv();
    for kind in [OidKind::Leaf, OidKind::CodeList] {
        let Some(store) = mdv.order.store(kind) else {
            return Err(TestCaseError::fail(format!("{kind} has no order store")));
        };
        let ordered: Vec<&Oid> = store.iter().collect();
        let unique: BTreeSet<&Oid> = ordered.iter().copied().collect();
        let keys: BTreeSet<&Oid> = mdv.keys_of(kind).into_iter().collect();
        prop_assert_eq!(ordered.len(), unique.len(), "{} order has duplicates", kind);
        prop_assert_eq!(unique, keys, "{} order differs from content", kind);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn order_matches_content_after_every_action(ops in prop::collection::vec(op_strategy(), 1..24)) {
        let mut ctx = context();
        for op in &ops {
            // Duplicate adds are refused; the present frame must stay valid either way.
            let _ = ctx.dispatch(action(op));
            assert_bijection(ctx.document())?;
        }
    }

    #[test]
    fn undo_returns_to_the_opened_document(ops in prop::collection::vec(op_strategy(), 1..16)) {
        let mut ctx = context();
        let opened = ctx.document().clone();
        for op in &ops {
            let _ = ctx.dispatch(action(op));
        }
        while ctx.can_undo() {
            ctx.dispatch(Action::Undo)
                .unwrap_or_else(|e| panic!("undo failed: {e}"));
        }
        prop_assert_eq!(ctx.document(), &opened);
    }
}
