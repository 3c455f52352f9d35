//! Semantic equality of entity versions.
//!
//! Two versions of an entity are equivalent when they carry the same
//! content, regardless of their own identifiers. Used to decide whether an
//! incoming entity (reloaded terminology, re-imported comments) is a no-op.
//!
//! Empty structured fields compare equal to absent ones: an empty string is
//! the same as no string, and an empty list the same as no list.

use define_model::{
    Alias, CodeList, CodeListItem, Comment, DocumentRef, FormalExpression, Leaf, Method,
    PdfPageRef, Standard, TerminologyPackage, TranslatedText,
};

/// Content equality that ignores identifiers.
pub trait SemanticEq {
    fn is_equivalent(&self, other: &Self) -> bool;
}

/// Free-function form of [`SemanticEq::is_equivalent`].
pub fn is_equivalent<T: SemanticEq + ?Sized>(a: &T, b: &T) -> bool {
    a.is_equivalent(b)
}

fn normalized(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn same_text(a: Option<&String>, b: Option<&String>) -> bool {
    normalized(a.map(String::as_str)) == normalized(b.map(String::as_str))
}

impl<T: SemanticEq> SemanticEq for [T] {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.is_equivalent(b))
    }
}

impl<T: SemanticEq> SemanticEq for Vec<T> {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.as_slice().is_equivalent(other.as_slice())
    }
}

impl<T: SemanticEq> SemanticEq for Option<T> {
    fn is_equivalent(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.is_equivalent(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl SemanticEq for TranslatedText {
    fn is_equivalent(&self, other: &Self) -> bool {
        same_text(self.lang.as_ref(), other.lang.as_ref()) && self.value == other.value
    }
}

impl SemanticEq for PdfPageRef {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.kind == other.kind
            && same_text(self.page_refs.as_ref(), other.page_refs.as_ref())
            && self.first_page == other.first_page
            && self.last_page == other.last_page
            && same_text(self.title.as_ref(), other.title.as_ref())
    }
}

impl SemanticEq for DocumentRef {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.leaf_oid == other.leaf_oid && self.pdf_page_refs.is_equivalent(&other.pdf_page_refs)
    }
}

/// Leafs are compared on what they describe: location fields are ignored.
impl SemanticEq for Leaf {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.kind == other.kind && self.title == other.title
    }
}

impl SemanticEq for Comment {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.descriptions.is_equivalent(&other.descriptions)
            && self.documents.is_equivalent(&other.documents)
    }
}

impl SemanticEq for FormalExpression {
    fn is_equivalent(&self, other: &Self) -> bool {
        same_text(self.context.as_ref(), other.context.as_ref()) && self.value == other.value
    }
}

impl SemanticEq for Method {
    fn is_equivalent(&self, other: &Self) -> bool {
        let same_name = (self.auto_method_name && other.auto_method_name) || self.name == other.name;
        same_name
            && self.auto_method_name == other.auto_method_name
            && self.kind == other.kind
            && self.descriptions.is_equivalent(&other.descriptions)
            && self.documents.is_equivalent(&other.documents)
            && self.formal_expressions.is_equivalent(&other.formal_expressions)
    }
}

impl SemanticEq for Alias {
    fn is_equivalent(&self, other: &Self) -> bool {
        self == other
    }
}

impl SemanticEq for CodeListItem {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.coded_value == other.coded_value
            && self.decode.is_equivalent(&other.decode)
            && self.extended_value == other.extended_value
            && self.rank == other.rank
            && self.alias.is_equivalent(&other.alias)
    }
}

impl SemanticEq for CodeList {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.data_type == other.data_type
            && self.items.as_slice().is_equivalent(other.items.as_slice())
            && self.external == other.external
            && self.alias.is_equivalent(&other.alias)
            && self.standard_oid == other.standard_oid
            && self.comment_oid == other.comment_oid
    }
}

impl SemanticEq for Standard {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.version == other.version
            && same_text(self.publishing_set.as_ref(), other.publishing_set.as_ref())
            && same_text(self.status.as_ref(), other.status.as_ref())
            && self.comment_oid == other.comment_oid
            && self.is_default == other.is_default
    }
}

impl SemanticEq for TerminologyPackage {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.label == other.label
            && self.version == other.version
            && same_text(self.publishing_set.as_ref(), other.publishing_set.as_ref())
            && self.code_lists == other.code_lists
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use define_model::{CodeListKind, LeafKind, Oid};

    fn oid(value: &str) -> Oid {
        Oid::new(value).unwrap()
    }

    #[test]
    fn comments_ignore_identifier() {
        let a = Comment::new(oid("COM.1"), "Derived from EX");
        let b = Comment::new(oid("COM.2"), "Derived from EX");
        assert!(is_equivalent(&a, &b));

        let mut c = b.clone();
        c.descriptions[0].value = "Derived from EC".to_string();
        assert!(!is_equivalent(&a, &c));
    }

    #[test]
    fn leaf_location_is_ignored() {
        let a = Leaf {
            oid: oid("LF.ACRF"),
            kind: LeafKind::AnnotatedCrf,
            title: "Annotated CRF".to_string(),
            href: "acrf.pdf".to_string(),
            base_folder: None,
        };
        let b = Leaf {
            oid: oid("LF.ACRF2"),
            href: "docs/acrf.pdf".to_string(),
            base_folder: Some("/submission".to_string()),
            ..a.clone()
        };
        assert!(a.is_equivalent(&b));
    }

    #[test]
    fn auto_method_name_is_ignored() {
        let mut a = Method::new(oid("MT.1"), "Algorithm to derive AGE", "AGE = RFSTDTC - BRTHDTC");
        let mut b = Method::new(oid("MT.2"), "Algorithm to derive DM.AGE", "AGE = RFSTDTC - BRTHDTC");
        assert!(!a.is_equivalent(&b));

        a.auto_method_name = true;
        b.auto_method_name = true;
        assert!(a.is_equivalent(&b));
    }

    #[test]
    fn empty_page_refs_equal_absent() {
        let a = PdfPageRef {
            page_refs: Some(String::new()),
            ..PdfPageRef::default()
        };
        assert!(a.is_equivalent(&PdfPageRef::default()));
    }

    #[test]
    fn decode_lists_are_order_sensitive() {
        let mut a = CodeList::new(oid("CL.NY"), "No Yes Response", CodeListKind::Decoded);
        a.items.push(CodeListItem::decoded(oid("CLI.N"), "N", "No"));
        a.items.push(CodeListItem::decoded(oid("CLI.Y"), "Y", "Yes"));

        let mut b = CodeList::new(oid("CL.NY2"), "No Yes Response", CodeListKind::Decoded);
        b.items.push(CodeListItem::decoded(oid("CLI.N2"), "N", "No"));
        b.items.push(CodeListItem::decoded(oid("CLI.Y2"), "Y", "Yes"));
        assert!(a.is_equivalent(&b));

        let mut c = CodeList::new(oid("CL.NY3"), "No Yes Response", CodeListKind::Decoded);
        c.items.push(CodeListItem::decoded(oid("CLI.Y3"), "Y", "Yes"));
        c.items.push(CodeListItem::decoded(oid("CLI.N3"), "N", "No"));
        assert!(!a.is_equivalent(&c));
    }
}
