//! Structural invariants of a composed document.
//!
//! Checked after every composed action:
//!
//! - every order store holds exactly the keys of its content map, once each
//! - every map entry is keyed by its own identifier
//! - identifiers are unique across the metadata version
//! - every cross-reference resolves to an entity of the expected kind
//! - every terminology package backs an existing standard
//! - dataset classes come from the constant class table

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use define_model::{Document, Entity, MetadataVersion, Oid, OidKind, StdConstants};

use crate::references::all_references;

/// Kinds that carry an order store.
pub const ORDERED_KINDS: [OidKind; 4] = [
    OidKind::ItemGroup,
    OidKind::CodeList,
    OidKind::Leaf,
    OidKind::Standard,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    MissingFromOrder { kind: OidKind, oid: Oid },
    UnknownInOrder { kind: OidKind, oid: Oid },
    DuplicateInOrder { kind: OidKind, oid: Oid },
    KeyMismatch { kind: OidKind, key: Oid, oid: Oid },
    DuplicateOid { oid: Oid },
    DanglingReference {
        source: Oid,
        field: &'static str,
        kind: OidKind,
        target: Oid,
    },
    UnknownDatasetClass { item_group: Oid, class: String },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFromOrder { kind, oid } => {
                write!(f, "{kind} {oid} is missing from the display order")
            }
            Self::UnknownInOrder { kind, oid } => {
                write!(f, "{kind} order lists {oid}, which does not exist")
            }
            Self::DuplicateInOrder { kind, oid } => {
                write!(f, "{kind} order lists {oid} more than once")
            }
            Self::KeyMismatch { kind, key, oid } => {
                write!(f, "{kind} {oid} is stored under key {key}")
            }
            Self::DuplicateOid { oid } => write!(f, "identifier {oid} is used more than once"),
            Self::DanglingReference {
                source,
                field,
                kind,
                target,
            } => write!(f, "{source}.{field} points at unknown {kind} {target}"),
            Self::UnknownDatasetClass { item_group, class } => {
                write!(f, "{item_group} has unknown dataset class {class:?}")
            }
        }
    }
}

/// Result of an integrity check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }
}

impl fmt::Display for IntegrityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.as_slice() {
            [] => f.write_str("no issues"),
            [only] => write!(f, "{only}"),
            [first, rest @ ..] => write!(f, "{first} (and {} more)", rest.len()),
        }
    }
}

/// Check every invariant of `document`.
pub fn verify(document: &Document, constants: &StdConstants) -> IntegrityReport {
    let mdv = document.mdv();
    let mut issues = Vec::new();
    check_order(mdv, &mut issues);
    check_keys(document, &mut issues);
    check_references(mdv, &mut issues);
    check_terminology(document, &mut issues);
    check_dataset_classes(mdv, constants, &mut issues);
    IntegrityReport { issues }
}

fn check_order(mdv: &MetadataVersion, issues: &mut Vec<IntegrityIssue>) {
    for kind in ORDERED_KINDS {
        let Some(store) = mdv.order.store(kind) else {
            continue;
        };
        let mismatch = store.symmetric_difference(mdv.keys_of(kind));
        issues.extend(
            mismatch
                .missing
                .into_iter()
                .map(|oid| IntegrityIssue::MissingFromOrder { kind, oid }),
        );
        issues.extend(
            mismatch
                .unknown
                .into_iter()
                .map(|oid| IntegrityIssue::UnknownInOrder { kind, oid }),
        );
        issues.extend(
            mismatch
                .duplicates
                .into_iter()
                .map(|oid| IntegrityIssue::DuplicateInOrder { kind, oid }),
        );
    }
}

fn check_map<T: Entity>(
    map: &BTreeMap<Oid, T>,
    seen: &mut BTreeSet<Oid>,
    issues: &mut Vec<IntegrityIssue>,
) {
    for (key, entity) in map {
        if key != entity.oid() {
            issues.push(IntegrityIssue::KeyMismatch {
                kind: T::KIND,
                key: key.clone(),
                oid: entity.oid().clone(),
            });
        }
        if !seen.insert(key.clone()) {
            issues.push(IntegrityIssue::DuplicateOid { oid: key.clone() });
        }
    }
}

fn check_keys(document: &Document, issues: &mut Vec<IntegrityIssue>) {
    let mdv = document.mdv();
    let mut seen = BTreeSet::from([document.study.oid.clone(), mdv.oid.clone()]);
    check_map(&mdv.item_groups, &mut seen, issues);
    check_map(&mdv.item_defs, &mut seen, issues);
    check_map(&mdv.code_lists, &mut seen, issues);
    check_map(&mdv.standards, &mut seen, issues);
    check_map(&mdv.comments, &mut seen, issues);
    check_map(&mdv.methods, &mut seen, issues);
    check_map(&mdv.leafs, &mut seen, issues);
    check_map(&mdv.result_displays, &mut seen, issues);
    check_map(&mdv.analysis_results, &mut seen, issues);
    // Packages share the identifier of the standard they back.
    check_map(&document.terminology, &mut BTreeSet::new(), issues);

    for group in mdv.item_groups.values() {
        for item_ref in &group.item_refs {
            if !seen.insert(item_ref.oid.clone()) {
                issues.push(IntegrityIssue::DuplicateOid {
                    oid: item_ref.oid.clone(),
                });
            }
        }
    }
    for list in mdv.code_lists.values() {
        for item in &list.items {
            if !seen.insert(item.oid.clone()) {
                issues.push(IntegrityIssue::DuplicateOid {
                    oid: item.oid.clone(),
                });
            }
        }
    }
}

fn resolves(mdv: &MetadataVersion, kind: OidKind, oid: &Oid) -> bool {
    match kind {
        OidKind::ItemGroup => mdv.item_groups.contains_key(oid),
        OidKind::ItemDef => mdv.item_defs.contains_key(oid),
        OidKind::CodeList => mdv.code_lists.contains_key(oid),
        OidKind::Standard => mdv.standards.contains_key(oid),
        OidKind::Comment => mdv.comments.contains_key(oid),
        OidKind::Method => mdv.methods.contains_key(oid),
        OidKind::Leaf => mdv.leafs.contains_key(oid),
        OidKind::ResultDisplay => mdv.result_displays.contains_key(oid),
        OidKind::AnalysisResult => mdv.analysis_results.contains_key(oid),
        OidKind::Study
        | OidKind::MetadataVersion
        | OidKind::ItemRef
        | OidKind::CodeListItem
        | OidKind::Terminology => mdv.contains_oid(oid),
    }
}

fn check_references(mdv: &MetadataVersion, issues: &mut Vec<IntegrityIssue>) {
    for (source, reference) in all_references(mdv) {
        if !resolves(mdv, reference.kind, reference.oid) {
            issues.push(IntegrityIssue::DanglingReference {
                source: source.clone(),
                field: reference.field,
                kind: reference.kind,
                target: reference.oid.clone(),
            });
        }
    }
}

fn check_terminology(document: &Document, issues: &mut Vec<IntegrityIssue>) {
    let standards = &document.mdv().standards;
    for oid in document.terminology.keys() {
        if !standards.contains_key(oid) {
            issues.push(IntegrityIssue::DanglingReference {
                source: oid.clone(),
                field: "standard",
                kind: OidKind::Standard,
                target: oid.clone(),
            });
        }
    }
}

fn check_dataset_classes(
    mdv: &MetadataVersion,
    constants: &StdConstants,
    issues: &mut Vec<IntegrityIssue>,
) {
    for group in mdv.item_groups.values() {
        if let Some(class) = &group.dataset_class
            && !constants.is_dataset_class(class)
        {
            issues.push(IntegrityIssue::UnknownDatasetClass {
                item_group: group.oid.clone(),
                class: class.clone(),
            });
        }
    }
}
