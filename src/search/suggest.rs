use std::collections::HashSet;
use std::sync::Arc;

use crate::search::config::{DEFAULT_SUGGESTION_LIMIT, MAX_SUGGESTION_LIMIT};
use crate::search::index::CourseIndex;
use crate::search::outputs::SuggestionResponse;
use crate::search::predicate::{Condition, Predicate, TextField};
use crate::search::sort::SortSpec;

/// Title autocomplete over the course index
#[derive(Clone)]
pub struct SuggestionService {
    index: Arc<dyn CourseIndex>,
}

impl SuggestionService {
    pub fn new(index: Arc<dyn CourseIndex>) -> Self {
        Self { index }
    }

    /// Distinct titles starting with `prefix`, ignoring case.
    ///
    /// A blank prefix or an index failure yields no suggestions.
    pub fn suggest(&self, prefix: &str, limit: Option<i64>) -> SuggestionResponse {
        if prefix.trim().is_empty() {
            return SuggestionResponse::empty();
        }

        let limit = limit
            .and_then(|l| usize::try_from(l).ok())
            .filter(|l| (1..=MAX_SUGGESTION_LIMIT).contains(l))
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT);

        let lower = prefix.to_lowercase();
        let predicate = Predicate::single(Condition::StartsWith {
            field: TextField::Title,
            prefix: lower.clone(),
        });

        let hits = match self
            .index
            .query(Some(&predicate), SortSpec::Upcoming, 0, limit)
        {
            Ok(hits) => hits,
            Err(e) => {
                tracing::error!("Suggestion lookup for '{}' failed: {:#}", prefix, e);
                return SuggestionResponse::empty();
            }
        };

        // The engine match is re-checked here since it may be looser than the prefix
        let mut seen = HashSet::new();
        let suggestions = hits
            .records
            .into_iter()
            .map(|record| record.title)
            .filter(|title| title.to_lowercase().starts_with(&lower))
            .filter(|title| seen.insert(title.clone()))
            .take(limit)
            .collect();

        SuggestionResponse { suggestions }
    }
}
