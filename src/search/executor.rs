use std::sync::Arc;

use anyhow::{Context, Result};

use crate::search::index::CourseIndex;
use crate::search::outputs::SearchResponse;
use crate::search::predicate::Predicate;
use crate::search::sort::{PageRequest, SortSpec};

/// Runs a single predicate-bound query and reports the index's own total.
///
/// Errors are returned untouched; callers decide whether to degrade.
#[derive(Clone)]
pub struct QueryExecutor {
    index: Arc<dyn CourseIndex>,
}

impl QueryExecutor {
    pub fn new(index: Arc<dyn CourseIndex>) -> Self {
        Self { index }
    }

    /// Execute `predicate`, or a match-all query when it is `None`
    pub fn execute(
        &self,
        predicate: Option<&Predicate>,
        sort: SortSpec,
        page: PageRequest,
    ) -> Result<SearchResponse> {
        let hits = self
            .index
            .query(predicate, sort, page.offset(), page.size())
            .with_context(|| {
                format!(
                    "Course query failed (sort={sort}, page={}, size={})",
                    page.page(),
                    page.size()
                )
            })?;

        Ok(SearchResponse {
            total: hits.total,
            courses: hits.records,
        })
    }
}
