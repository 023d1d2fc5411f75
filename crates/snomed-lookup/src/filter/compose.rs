//! Combining concept-set lookups into one boolean filter.

use crate::lookup::{fields, ConceptSetLookup, Polarity};

use super::{BoolFilter, FilterExpression};

/// Builds a boolean filter that constrains `field_name` by the given
/// lookups, referencing each set indirectly by document identity.
///
/// Lookups with `total == 0` are discarded: an empty set contributes no
/// constraint and must not generate a vacuous indirection reference. Each
/// remaining lookup becomes a terms-lookup fragment reading the member
/// list from `index`. [`Polarity::Include`] fragments form one `should`
/// disjunction (matching any include set suffices); every
/// [`Polarity::Exclude`] fragment is added as an independent `must_not`
/// conjunct (the document must fail all exclude sets). Either group is
/// omitted entirely when it has no fragments.
///
/// When nothing survives, the result is an unconstrained expression that
/// matches everything - not one that matches nothing. Use
/// [`FilterExpression::is_unconstrained`] to tell the cases apart.
///
/// Only `id`, `polarity` and `total` are consulted; lookups retrieved
/// without their member payload compose identically.
pub fn compose<'a, I>(lookups: I, index: &str, field_name: &str) -> FilterExpression
where
    I: IntoIterator<Item = &'a ConceptSetLookup>,
{
    let mut bool_filter = BoolFilter::new();

    for lookup in lookups {
        if lookup.is_empty() {
            continue;
        }
        let fragment = FilterExpression::terms_lookup(
            field_name,
            index,
            lookup.id.clone(),
            fields::CONCEPT_IDS,
        );
        bool_filter = match lookup.polarity {
            Polarity::Include => bool_filter.should(fragment),
            Polarity::Exclude => bool_filter.must_not(fragment),
        };
    }

    bool_filter.into()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::lookup::ConceptId;

    use super::*;

    const INDEX: &str = "concepts-lookup";

    fn lookup(id: &str, polarity: Polarity, member_count: usize) -> ConceptSetLookup {
        let members: HashSet<ConceptId> = (1..=member_count as ConceptId).collect();
        ConceptSetLookup::new(id, 100001, polarity, members)
    }

    fn fragment_for(id: &str, field: &str) -> FilterExpression {
        FilterExpression::terms_lookup(field, INDEX, id, fields::CONCEPT_IDS)
    }

    #[test]
    fn test_no_lookups_matches_everything() {
        let filter = compose([], INDEX, "destination");
        assert!(filter.is_unconstrained());
    }

    #[test]
    fn test_empty_sets_are_discarded() {
        let empty = lookup("l1", Polarity::Include, 0);
        let filter = compose([&empty], INDEX, "destination");
        assert_eq!(filter, compose([], INDEX, "destination"));
        assert!(filter.is_unconstrained());
    }

    #[test]
    fn test_include_and_exclude_partition() {
        let include = lookup("l1", Polarity::Include, 3);
        let exclude = lookup("l2", Polarity::Exclude, 2);

        let filter = compose([&include, &exclude], INDEX, "destination");

        let expected: FilterExpression = BoolFilter::new()
            .should(fragment_for("l1", "destination"))
            .must_not(fragment_for("l2", "destination"))
            .into();
        assert_eq!(filter, expected);
    }

    #[test]
    fn test_two_includes_form_disjunction() {
        let first = lookup("l1", Polarity::Include, 3);
        let second = lookup("l2", Polarity::Include, 5);

        let filter = compose([&first, &second], INDEX, "destination");

        let expected: FilterExpression = BoolFilter::new()
            .should(fragment_for("l1", "destination"))
            .should(fragment_for("l2", "destination"))
            .into();
        assert_eq!(filter, expected);
    }

    #[test]
    fn test_excludes_are_independent_conjuncts() {
        let first = lookup("l1", Polarity::Exclude, 3);
        let second = lookup("l2", Polarity::Exclude, 5);

        let filter = compose([&first, &second], INDEX, "destination");

        match &filter {
            FilterExpression::Bool(b) => {
                assert!(b.should.is_empty());
                assert_eq!(b.must_not.len(), 2);
            }
            other => panic!("expected bool filter, got {other:?}"),
        }
    }

    #[test]
    fn test_members_never_inlined() {
        let include = lookup("l1", Polarity::Include, 1000);
        let filter = compose([&include], INDEX, "destination");

        let json = serde_json::to_string(&filter).unwrap();
        // The fragment carries only the document reference, never values.
        assert!(json.contains("\"id\":\"l1\""));
        assert!(!json.contains("\"values\""));
    }

    #[test]
    fn test_metadata_only_lookups_compose_identically() {
        let full = lookup("l1", Polarity::Include, 3);
        let metadata = ConceptSetLookup::metadata("l1", 100001, Polarity::Include, 3);

        assert_eq!(
            compose([&full], INDEX, "destination"),
            compose([&metadata], INDEX, "destination")
        );
    }
}
