//! Scripted [`CourseIndex`] for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{Result, anyhow};

use crate::catalog::CourseRecord;
use crate::search::index::{CourseIndex, IndexHits};
use crate::search::predicate::Predicate;
use crate::search::sort::SortSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedQuery {
    pub predicate: Option<Predicate>,
    pub sort: SortSpec,
    pub offset: usize,
    pub limit: usize,
}

enum Reply {
    Hits(IndexHits),
    Fail(String),
}

/// Replays queued replies in order and records every query.
///
/// Once the queue is drained it answers with no hits, or with an error when
/// built with [`ScriptedIndex::unavailable`].
#[derive(Default)]
pub struct ScriptedIndex {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<RecordedQuery>>,
    always_fail: bool,
}

impl ScriptedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            always_fail: true,
            ..Self::new()
        }
    }

    /// Queue a reply whose total equals the number of records
    pub fn returning(self, records: Vec<CourseRecord>) -> Self {
        let total = records.len() as u64;
        self.returning_total(total, records)
    }

    pub fn returning_total(self, total: u64, records: Vec<CourseRecord>) -> Self {
        self.push(Reply::Hits(IndexHits { total, records }))
    }

    pub fn returning_empty(self) -> Self {
        self.returning(Vec::new())
    }

    pub fn failing(self, message: &str) -> Self {
        self.push(Reply::Fail(message.to_string()))
    }

    fn push(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<RecordedQuery> {
        self.calls.lock().unwrap().clone()
    }
}

impl CourseIndex for ScriptedIndex {
    fn query(
        &self,
        predicate: Option<&Predicate>,
        sort: SortSpec,
        offset: usize,
        limit: usize,
    ) -> Result<IndexHits> {
        self.calls.lock().unwrap().push(RecordedQuery {
            predicate: predicate.cloned(),
            sort,
            offset,
            limit,
        });

        if self.always_fail {
            return Err(anyhow!("index unavailable"));
        }

        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Hits(hits)) => Ok(hits),
            Some(Reply::Fail(message)) => Err(anyhow!(message)),
            None => Ok(IndexHits::default()),
        }
    }
}

/// Records `<prefix>1..=<count>` titled `<title> <n>`
pub fn numbered_courses(prefix: &str, title: &str, count: usize) -> Vec<CourseRecord> {
    (1..=count)
        .map(|n| CourseRecord::new(format!("{prefix}{n}"), format!("{title} {n}")))
        .collect()
}
