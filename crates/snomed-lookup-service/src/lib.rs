//! # snomed-lookup-service
//!
//! Branch-scoped retrieval and maintenance of SNOMED CT concept-set
//! lookups, backed by an external document index.
//!
//! The [`ConceptsLookupService`] is the entry point: given a
//! [`BranchCriteria`] visibility predicate it returns the
//! [`ConceptSetLookup`](snomed_lookup::ConceptSetLookup) documents live on
//! that snapshot, optionally without their (possibly huge) member
//! payloads, paging through the index until the result set is exhausted.
//! Retrieved lookups feed [`ConceptsLookupService::filter_for`], which
//! builds the indirect boolean filter used by the expression evaluator.
//! Bulk replace and clear support reindexing pipelines.
//!
//! ## Quick Start
//!
//! ```rust
//! use snomed_lookup::{ConceptSetLookup, Polarity};
//! use snomed_lookup_service::{
//!     BranchCriteria, ConceptsLookupService, Document, InMemoryLookupIndex,
//! };
//!
//! let index = InMemoryLookupIndex::new("concepts-lookup");
//! let service = ConceptsLookupService::new(&index);
//!
//! service.save_all(&[ConceptSetLookup::new(
//!     "lookup-1",
//!     100001,
//!     Polarity::Include,
//!     [10, 20, 30].into_iter().collect(),
//! )])?;
//!
//! let visible = service.lookups(&BranchCriteria::for_path("MAIN"))?;
//! let filter = service.filter_for(&visible, "destination");
//!
//! assert!(index.matches(&filter, &Document::new().with("destination", 20u64)));
//! # Ok::<(), snomed_lookup_service::IndexError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    snomed-lookup-service                     │
//! │                                                              │
//! │  ConceptsLookupService                                       │
//! │  ├── lookups(branch, refsets?, members?)                     │
//! │  │     └── ConceptLookupIndex::search_lookups (all pages)    │
//! │  ├── filter_for(lookups, field)                              │
//! │  │     └── snomed_lookup::compose (pure, indirection refs)   │
//! │  └── save_all / delete_all (reindex maintenance)             │
//! │                                                              │
//! │  ConceptLookupIndex - trait over the document-index client   │
//! │  InMemoryLookupIndex - reference engine for tests/contracts  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The expression evaluator that decides *which* sets apply to a query,
//! the versioning collaborator producing branch criteria, and the real
//! index client all live outside this crate.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod branch;
mod config;
mod error;
mod memory;
mod page;
mod service;
mod traits;

pub use branch::{BranchCriteria, PATH_FIELD};
pub use config::{LookupServiceConfig, DEFAULT_PAGE_SIZE};
pub use error::{IndexError, IndexResult};
pub use memory::{Document, InMemoryLookupIndex, DEFAULT_PATH};
pub use page::{Page, PageRequest};
pub use service::ConceptsLookupService;
pub use traits::{ConceptLookupIndex, LookupSearch, SourceFilter};

// Re-export the model crate's types used throughout this API.
pub use snomed_lookup::{ConceptSetLookup, FilterExpression, Polarity};
