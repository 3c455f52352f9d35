//! Identifier generators.

use define_model::{Oid, OidKind};
use uuid::Uuid;

/// Source of fresh identifiers for new entities.
pub trait OidGenerator: Send {
    fn generate(&mut self, kind: OidKind) -> Oid;
}

/// Random identifiers, e.g. `IG.3f2b...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidOidGenerator;

impl OidGenerator for UuidOidGenerator {
    fn generate(&mut self, kind: OidKind) -> Oid {
        Oid::with_prefix(kind, &Uuid::new_v4().simple().to_string())
    }
}

/// Deterministic identifiers `PREFIX.N` with a single counter across kinds.
#[derive(Debug, Clone, Default)]
pub struct SequentialOidGenerator {
    next: u64,
}

impl SequentialOidGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl OidGenerator for SequentialOidGenerator {
    fn generate(&mut self, kind: OidKind) -> Oid {
        self.next += 1;
        Oid::with_prefix(kind, &self.next.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_prefixed() {
        let mut generator = SequentialOidGenerator::new();
        assert_eq!(generator.generate(OidKind::ItemGroup).as_str(), "IG.1");
        assert_eq!(generator.generate(OidKind::Comment).as_str(), "COM.2");
    }

    #[test]
    fn uuid_ids_are_unique() {
        let mut generator = UuidOidGenerator;
        let a = generator.generate(OidKind::Method);
        let b = generator.generate(OidKind::Method);
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("MT."));
    }
}
