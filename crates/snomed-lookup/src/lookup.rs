//! The persisted concept-set lookup entity.
//!
//! A [`ConceptSetLookup`] document captures one named set of concept
//! identifiers (typically the expanded membership of a refset) together
//! with the polarity that tells the filter composer whether membership
//! should be required or forbidden. Many lookups can share a `refset_id`
//! across branch/version snapshots; the branch visibility collaborator
//! guarantees at most one is visible on any single snapshot.
//!
//! Lookups are created and replaced wholesale by an external
//! materialization pipeline. This crate never mutates an individual
//! lookup in place.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// SNOMED CT concept identifier.
pub type ConceptId = u64;

/// Boundary field names of the persisted lookup document.
///
/// These names are part of the storage/wire contract: they appear in
/// serialized documents, in source filters for partial retrieval, and as
/// the field path of terms-lookup indirection references. They must not
/// change without a reindex.
pub mod fields {
    /// Field holding the logical refset identifier.
    pub const REFSET_ID: &str = "refsetId";
    /// Field holding the member concept identifiers.
    pub const CONCEPT_IDS: &str = "conceptIds";
}

/// Whether membership in a lookup's set is required or forbidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Polarity {
    /// A document matches if its field value is a member of the set.
    Include,
    /// A document matches only if its field value is not a member.
    Exclude,
}

/// A persisted, branch-scoped set of concept identifiers.
///
/// `total` is always populated, independent of whether `member_ids` was
/// fetched; when `member_ids` is present, `total == member_ids.len()`.
/// The constructors uphold that invariant.
///
/// Branch/version scoping is not a field of this entity: visibility is
/// computed by an external branch-criteria collaborator and applied as a
/// filter predicate at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptSetLookup {
    /// Opaque document identity, stable for the lifetime of the set version.
    pub id: String,
    /// Identifier of the logical set this lookup represents.
    pub refset_id: ConceptId,
    /// Include/exclude polarity.
    pub polarity: Polarity,
    /// Member concept identifiers; can be tens of thousands of entries.
    ///
    /// `None` when the lookup was retrieved without its member payload.
    #[serde(
        rename = "conceptIds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub member_ids: Option<HashSet<ConceptId>>,
    /// Count of member identifiers.
    pub total: u32,
}

impl ConceptSetLookup {
    /// Creates a lookup with a full member payload. `total` is derived.
    pub fn new(
        id: impl Into<String>,
        refset_id: ConceptId,
        polarity: Polarity,
        member_ids: HashSet<ConceptId>,
    ) -> Self {
        let total = member_ids.len() as u32;
        Self {
            id: id.into(),
            refset_id,
            polarity,
            member_ids: Some(member_ids),
            total,
        }
    }

    /// Creates a metadata-only lookup, as returned by a retrieval that
    /// omitted the member payload.
    pub fn metadata(
        id: impl Into<String>,
        refset_id: ConceptId,
        polarity: Polarity,
        total: u32,
    ) -> Self {
        Self {
            id: id.into(),
            refset_id,
            polarity,
            member_ids: None,
            total,
        }
    }

    /// True when the set has no members.
    ///
    /// An empty lookup contributes no constraint and is skipped by the
    /// filter composer.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// True when the member payload was fetched.
    pub fn has_members(&self) -> bool {
        self.member_ids.is_some()
    }

    /// Drops the member payload, keeping `total`.
    pub fn without_members(mut self) -> Self {
        self.member_ids = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(ids: &[ConceptId]) -> HashSet<ConceptId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_new_derives_total() {
        let lookup =
            ConceptSetLookup::new("l1", 100001, Polarity::Include, members(&[10, 20, 30]));
        assert_eq!(lookup.total, 3);
        assert!(lookup.has_members());
        assert!(!lookup.is_empty());
    }

    #[test]
    fn test_metadata_keeps_total_without_members() {
        let lookup = ConceptSetLookup::metadata("l1", 100001, Polarity::Exclude, 42);
        assert_eq!(lookup.total, 42);
        assert!(!lookup.has_members());
    }

    #[test]
    fn test_empty_lookup() {
        let lookup = ConceptSetLookup::new("l1", 100001, Polarity::Include, HashSet::new());
        assert!(lookup.is_empty());
        assert_eq!(lookup.total, 0);
    }

    #[test]
    fn test_without_members_preserves_total() {
        let lookup = ConceptSetLookup::new("l1", 100001, Polarity::Include, members(&[10, 20]))
            .without_members();
        assert!(!lookup.has_members());
        assert_eq!(lookup.total, 2);
    }

    #[test]
    fn test_wire_field_names() {
        let lookup = ConceptSetLookup::new("l1", 100001, Polarity::Include, members(&[10]));
        let json = serde_json::to_value(&lookup).unwrap();

        assert_eq!(json["refsetId"], 100001);
        assert_eq!(json["polarity"], "INCLUDE");
        assert_eq!(json["total"], 1);
        assert!(json.get("conceptIds").is_some());
        assert!(json.get("memberIds").is_none());
    }

    #[test]
    fn test_member_payload_omitted_from_wire_when_absent() {
        let lookup = ConceptSetLookup::metadata("l1", 100001, Polarity::Exclude, 7);
        let json = serde_json::to_value(&lookup).unwrap();

        assert_eq!(json["polarity"], "EXCLUDE");
        assert!(json.get("conceptIds").is_none());
        assert_eq!(json["total"], 7);
    }

    #[test]
    fn test_wire_round_trip_without_payload_field() {
        let json = r#"{"id":"l1","refsetId":100001,"polarity":"INCLUDE","total":3}"#;
        let lookup: ConceptSetLookup = serde_json::from_str(json).unwrap();
        assert_eq!(lookup.refset_id, 100001);
        assert!(lookup.member_ids.is_none());
        assert_eq!(lookup.total, 3);
    }

    #[test]
    fn test_field_name_constants_match_wire() {
        // The constants are used as filter payload and source-filter paths;
        // they must agree with the serialized document.
        let lookup = ConceptSetLookup::new("l1", 100001, Polarity::Include, members(&[10]));
        let json = serde_json::to_value(&lookup).unwrap();
        assert!(json.get(fields::REFSET_ID).is_some());
        assert!(json.get(fields::CONCEPT_IDS).is_some());
    }
}
