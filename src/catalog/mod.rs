//! # Catalog Module
//!
//! Storage side of the course search: the record type, the tantivy index that
//! implements [`CourseIndex`](crate::search::CourseIndex), and seed loading.
//!
//! ## Key Components
//!
//! - [`record`] - The course document shared by the index and the API
//! - [`schema`] - Tantivy schema and record-to-document conversion
//! - [`index`] - Predicate translation, sorting and paging over tantivy
//! - [`loader`] - Wipe-and-reload from a JSON seed file

pub mod index;
pub mod loader;
pub mod record;
pub mod schema;

pub use index::{IndexStats, TantivyCourseIndex};
pub use record::CourseRecord;
