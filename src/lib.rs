pub mod catalog;
pub mod config;
pub mod search;
pub mod server;

pub use catalog::{CourseRecord, TantivyCourseIndex};
pub use config::ServerConfig;
pub use search::{CourseSearchService, SearchCriteria, SuggestionService};
