#![deny(unsafe_code)]

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Opaque document-wide identifier (OID).
///
/// Values are trimmed on construction and never empty. Ordering is plain
/// string ordering so that maps keyed by `Oid` iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidOid(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build an identifier from a kind prefix and a suffix, e.g. `IG.DM`.
    pub fn with_prefix(kind: OidKind, suffix: &str) -> Self {
        Self(format!("{}.{}", kind.prefix(), suffix.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Oid {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Oid {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Oid> for String {
    fn from(value: Oid) -> Self {
        value.0
    }
}

/// The entity kind an identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OidKind {
    Study,
    MetadataVersion,
    ItemGroup,
    ItemDef,
    ItemRef,
    CodeList,
    CodeListItem,
    Comment,
    Method,
    Leaf,
    Standard,
    ResultDisplay,
    AnalysisResult,
    Terminology,
}

impl OidKind {
    /// Conventional OID prefix used by the identifier generators.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Study => "ST",
            Self::MetadataVersion => "MDV",
            Self::ItemGroup => "IG",
            Self::ItemDef => "IT",
            Self::ItemRef => "IR",
            Self::CodeList => "CL",
            Self::CodeListItem => "CLI",
            Self::Comment => "COM",
            Self::Method => "MT",
            Self::Leaf => "LF",
            Self::Standard => "STD",
            Self::ResultDisplay => "RD",
            Self::AnalysisResult => "AR",
            Self::Terminology => "CT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::MetadataVersion => "metadata version",
            Self::ItemGroup => "item group",
            Self::ItemDef => "item definition",
            Self::ItemRef => "item reference",
            Self::CodeList => "code list",
            Self::CodeListItem => "code list item",
            Self::Comment => "comment",
            Self::Method => "method",
            Self::Leaf => "leaf",
            Self::Standard => "standard",
            Self::ResultDisplay => "result display",
            Self::AnalysisResult => "analysis result",
            Self::Terminology => "terminology package",
        }
    }
}

impl fmt::Display for OidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An entity stored in a document map under its own identifier.
pub trait Entity {
    const KIND: OidKind;

    fn oid(&self) -> &Oid;
}

macro_rules! impl_entity {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Entity for $ty {
                const KIND: OidKind = OidKind::$kind;

                fn oid(&self) -> &Oid {
                    &self.oid
                }
            }
        )*
    };
}

impl_entity! {
    crate::ItemGroup => ItemGroup,
    crate::ItemRef => ItemRef,
    crate::ItemDef => ItemDef,
    crate::CodeList => CodeList,
    crate::CodeListItem => CodeListItem,
    crate::Comment => Comment,
    crate::Method => Method,
    crate::Leaf => Leaf,
    crate::Standard => Standard,
    crate::ResultDisplay => ResultDisplay,
    crate::AnalysisResult => AnalysisResult,
    crate::TerminologyPackage => Terminology,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oid_is_trimmed() {
        let oid = Oid::new("  IG.DM ").unwrap();
        assert_eq!(oid.as_str(), "IG.DM");
    }

    #[test]
    fn blank_oid_is_rejected() {
        assert!(matches!(Oid::new("   "), Err(ModelError::InvalidOid(_))));
    }

    #[test]
    fn prefixed_oid() {
        let oid = Oid::with_prefix(OidKind::CodeList, " SEX");
        assert_eq!(oid.to_string(), "CL.SEX");
    }
}
