//! # Search Module
//!
//! Course search over a [`CourseIndex`]: filtered queries, the fuzzy cascade
//! for free-text searches, and title autocomplete.
//!
//! ## Key Components
//!
//! - [`service`] - Facade choosing between list-all, filtered and fuzzy paths
//! - [`cascade`] - Multi-stage fuzzy search with early stop and deduplication
//! - [`predicate`] - Typed predicates built from request filters
//! - [`suggest`] - Prefix autocomplete on course titles
//! - [`index`] - The query seam implemented by the catalog index
//! - [`config`] - Constants for paging, cascade thresholds and suggestions

pub mod cascade;
pub mod config;
pub mod criteria;
pub mod executor;
pub mod index;
pub mod outputs;
pub mod predicate;
pub mod service;
pub mod sort;
pub mod suggest;

#[cfg(test)]
mod test_support;

pub use criteria::SearchCriteria;
pub use index::{CourseIndex, IndexHits};
pub use outputs::{SearchResponse, SuggestionResponse};
pub use service::CourseSearchService;
pub use sort::{PageRequest, SortSpec};
pub use suggest::SuggestionService;
