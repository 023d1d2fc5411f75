//! Branch visibility predicates.
//!
//! Which lookup documents are "live" on a given branch/version snapshot is
//! decided by an external versioning collaborator. That decision arrives
//! here as an opaque filter expression wrapped in [`BranchCriteria`]; the
//! retriever applies it as a mandatory conjunct and never inspects it.

use snomed_lookup::FilterExpression;

/// Document field holding the branch path, for criteria built with
/// [`BranchCriteria::for_path`].
pub const PATH_FIELD: &str = "path";

/// An opaque predicate restricting retrieval to the documents visible on
/// one branch snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCriteria(FilterExpression);

impl BranchCriteria {
    /// Wraps a predicate supplied by the versioning collaborator.
    pub fn new(filter: FilterExpression) -> Self {
        Self(filter)
    }

    /// Criteria selecting documents stored on the given branch path.
    ///
    /// Real deployments derive criteria from the versioning collaborator,
    /// which also accounts for ancestor branches and version ranges; a
    /// plain path match is the common case and what the reference engine
    /// stores.
    pub fn for_path(path: &str) -> Self {
        Self(FilterExpression::term(PATH_FIELD, path))
    }

    /// The wrapped predicate.
    pub fn filter(&self) -> &FilterExpression {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_path_builds_term_predicate() {
        let criteria = BranchCriteria::for_path("MAIN/SNOMEDCT-SE");
        assert_eq!(
            criteria.filter(),
            &FilterExpression::term(PATH_FIELD, "MAIN/SNOMEDCT-SE")
        );
    }

    #[test]
    fn test_wraps_arbitrary_predicate() {
        let predicate = FilterExpression::terms(PATH_FIELD, ["MAIN", "MAIN/2024-01-31"]);
        let criteria = BranchCriteria::new(predicate.clone());
        assert_eq!(criteria.filter(), &predicate);
    }
}
