use std::sync::Arc;

use anyhow::Result;

use crate::search::cascade::FuzzyCascade;
use crate::search::criteria::SearchCriteria;
use crate::search::executor::QueryExecutor;
use crate::search::index::CourseIndex;
use crate::search::outputs::SearchResponse;
use crate::search::predicate::build_filter_predicate;
use crate::search::sort::{PageRequest, SortSpec};

/// Entry point for course searches.
///
/// Every operation degrades to an empty [`SearchResponse`] when the index
/// fails; the failure is logged, never returned.
#[derive(Clone)]
pub struct CourseSearchService {
    executor: QueryExecutor,
    cascade: FuzzyCascade,
}

impl CourseSearchService {
    pub fn new(index: Arc<dyn CourseIndex>) -> Self {
        Self {
            executor: QueryExecutor::new(index.clone()),
            cascade: FuzzyCascade::new(index),
        }
    }

    /// Search with fuzzy fallback.
    ///
    /// - nothing set: list every course
    /// - blank term, or any age/price/category/type/date filter: one filtered query
    /// - free text only: the fuzzy cascade
    pub fn search(
        &self,
        criteria: &SearchCriteria,
        sort: SortSpec,
        page: PageRequest,
    ) -> SearchResponse {
        if criteria.is_empty() {
            return self.list_all(sort, page);
        }

        match criteria.text() {
            Some(term) if !criteria.has_non_text_filters() => {
                tracing::info!("Fuzzy search for '{}' (sort={}, size={})", term, sort, page.size());
                let result = self
                    .cascade
                    .execute(term, &criteria.without_term(), sort, page);
                degrade("fuzzy search", result)
            }
            _ => self.search_with_filters(criteria, sort, page),
        }
    }

    /// Search with a single filtered query, never running the cascade
    pub fn search_with_filters(
        &self,
        criteria: &SearchCriteria,
        sort: SortSpec,
        page: PageRequest,
    ) -> SearchResponse {
        let Some(predicate) = build_filter_predicate(criteria) else {
            return self.list_all(sort, page);
        };

        tracing::info!(
            "Filtered search with {} clauses (sort={}, page={}, size={})",
            predicate.clauses().len(),
            sort,
            page.page(),
            page.size()
        );
        degrade(
            "filtered search",
            self.executor.execute(Some(&predicate), sort, page),
        )
    }

    /// Every course, sorted and paged
    pub fn list_all(&self, sort: SortSpec, page: PageRequest) -> SearchResponse {
        degrade("list all", self.executor.execute(None, sort, page))
    }
}

fn degrade(operation: &str, result: Result<SearchResponse>) -> SearchResponse {
    result.unwrap_or_else(|e| {
        tracing::error!("Course {} failed, returning no results: {:#}", operation, e);
        SearchResponse::empty()
    })
}
