//! Read-only summary of a document for `inspect`.

use std::fmt::Write as _;

use define_model::{CodeListKind, Document, Oid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGroupRow {
    pub oid: Oid,
    pub name: String,
    pub class: Option<String>,
    pub variables: usize,
    /// Label of the governing standard, e.g. `SDTMIG 3.3`.
    pub standard: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeListRow {
    pub oid: Oid,
    pub name: String,
    pub kind: CodeListKind,
    pub items: usize,
    pub nci_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOverview {
    pub study_name: String,
    pub protocol_name: String,
    pub define_version: String,
    /// In display order.
    pub item_groups: Vec<ItemGroupRow>,
    /// In display order.
    pub code_lists: Vec<CodeListRow>,
    pub counts: Vec<(&'static str, usize)>,
}

pub fn code_list_kind_label(kind: CodeListKind) -> &'static str {
    match kind {
        CodeListKind::Decoded => "decoded",
        CodeListKind::Enumerated => "enumerated",
        CodeListKind::External => "external",
    }
}

impl DocumentOverview {
    pub fn from_document(document: &Document) -> Self {
        let mdv = document.mdv();

        let item_groups = mdv
            .order
            .item_groups
            .iter()
            .filter_map(|oid| mdv.item_groups.get(oid))
            .map(|group| ItemGroupRow {
                oid: group.oid.clone(),
                name: group.name.clone(),
                class: group.dataset_class.clone(),
                variables: group.item_refs.len(),
                standard: group
                    .standard_oid
                    .as_ref()
                    .and_then(|oid| mdv.standards.get(oid))
                    .map(define_model::Standard::label),
            })
            .collect();

        let code_lists = mdv
            .order
            .code_lists
            .iter()
            .filter_map(|oid| mdv.code_lists.get(oid))
            .map(|list| CodeListRow {
                oid: list.oid.clone(),
                name: list.name.clone(),
                kind: list.kind,
                items: list.items.len(),
                nci_code: list.nci_code().map(str::to_string),
            })
            .collect();

        let counts = vec![
            ("item groups", mdv.item_groups.len()),
            ("item definitions", mdv.item_defs.len()),
            ("code lists", mdv.code_lists.len()),
            ("standards", mdv.standards.len()),
            ("comments", mdv.comments.len()),
            ("methods", mdv.methods.len()),
            ("leafs", mdv.leafs.len()),
            ("result displays", mdv.result_displays.len()),
            ("terminology packages", document.terminology.len()),
        ];

        Self {
            study_name: document.study.global_variables.study_name.clone(),
            protocol_name: document.study.global_variables.protocol_name.clone(),
            define_version: mdv.define_version.clone(),
            item_groups,
            code_lists,
            counts,
        }
    }

    /// Plain-text rendering, one entity per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "study {} (define {})", self.study_name, self.define_version);
        for row in &self.item_groups {
            let _ = writeln!(
                out,
                "  dataset {} {} [{}] {} variables",
                row.oid,
                row.name,
                row.class.as_deref().unwrap_or("-"),
                row.variables
            );
        }
        for row in &self.code_lists {
            let _ = writeln!(
                out,
                "  codelist {} {} ({}) {} items",
                row.oid,
                row.name,
                code_list_kind_label(row.kind),
                row.items
            );
        }
        let counts: Vec<String> = self
            .counts
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| format!("{count} {label}"))
            .collect();
        let _ = write!(out, "  {}", counts.join(", "));
        out
    }
}
