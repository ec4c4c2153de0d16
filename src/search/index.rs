use anyhow::Result;

use crate::catalog::CourseRecord;
use crate::search::predicate::Predicate;
use crate::search::sort::SortSpec;

/// One window of matches plus the engine's total match count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexHits {
    pub total: u64,
    pub records: Vec<CourseRecord>,
}

/// The query surface the search core needs from a course index
pub trait CourseIndex: Send + Sync {
    /// Run one query.
    ///
    /// `None` matches every record. Records are ordered by `sort` and the
    /// window `offset..offset + limit` of that ordering is returned.
    fn query(
        &self,
        predicate: Option<&Predicate>,
        sort: SortSpec,
        offset: usize,
        limit: usize,
    ) -> Result<IndexHits>;
}
