//! Output types for search operations
//!
//! These are the JSON bodies returned by the HTTP API and are deserialized
//! in tests for type-safe validation.

use serde::{Deserialize, Serialize};

use crate::catalog::CourseRecord;

/// A page of courses with a total match count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: u64,
    pub courses: Vec<CourseRecord>,
}

impl SearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there are any results
    pub fn has_results(&self) -> bool {
        !self.courses.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<String>,
}

impl SuggestionResponse {
    pub fn empty() -> Self {
        Self::default()
    }
}
