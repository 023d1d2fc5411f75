//! # snomed-lookup
//!
//! Concept-set lookup model and indirect filter construction for SNOMED CT
//! query evaluation.
//!
//! Query evaluation over a versioned terminology store frequently needs to
//! test membership of a field value against large, reusable sets of concept
//! identifiers (refset membership, subtype closures). Inlining tens of
//! thousands of identifiers into every query is costly, so those sets are
//! persisted once as [`ConceptSetLookup`] documents and referenced
//! **indirectly** from query filters: the index engine resolves the member
//! list server-side by document identity.
//!
//! This crate holds the storage-neutral pieces:
//!
//! - [`ConceptSetLookup`] - the persisted set entity with include/exclude
//!   [`Polarity`] and stable wire field names
//! - [`FilterExpression`] - an immutable tagged expression tree with
//!   `must` / `should` / `must_not` clause groups and a terms-lookup
//!   indirection variant
//! - [`compose`] - the pure function that combines any number of lookups
//!   into one boolean filter, honoring per-set polarity
//!
//! Retrieval, paging and maintenance live in the companion
//! `snomed-lookup-service` crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use snomed_lookup::{compose, ConceptSetLookup, Polarity};
//!
//! let lookup = ConceptSetLookup::new(
//!     "lookup-1",
//!     100001,
//!     Polarity::Include,
//!     [10, 20, 30].into_iter().collect(),
//! );
//!
//! let filter = compose([&lookup], "concepts-lookup", "destination");
//! assert!(!filter.is_unconstrained());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod filter;
mod lookup;

pub use filter::{compose, BoolFilter, FilterExpression, Term, Terms, TermsLookup, TermValue};
pub use lookup::{fields, ConceptId, ConceptSetLookup, Polarity};
