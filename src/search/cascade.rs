//! Fuzzy search cascade.
//!
//! A pure free-text query runs through progressively looser stages until a
//! page is filled:
//!
//! 1. exact phrase in title or description
//! 2. lower-cased substring of title or description
//! 3. title word globs `*term*`, `term*`, `*term` (terms of 3+ characters)
//! 4. positional character overlap against candidate titles (terms of 3+ characters)
//!
//! Records are deduplicated by id with the earliest stage winning. A failed
//! stage contributes nothing and the cascade moves on.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::catalog::CourseRecord;
use crate::search::config::{
    CHARACTER_MATCH_CANDIDATES, CHARACTER_MATCH_THRESHOLD, MAX_LENGTH_DIFFERENCE,
    MIN_FUZZY_TERM_LENGTH,
};
use crate::search::criteria::SearchCriteria;
use crate::search::executor::QueryExecutor;
use crate::search::index::CourseIndex;
use crate::search::outputs::SearchResponse;
use crate::search::predicate::{Condition, Predicate, TextField, build_filter_predicate};
use crate::search::sort::{PageRequest, SortSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Exact,
    Contains,
    Wildcard,
    CharacterOverlap,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Exact => "exact",
            Stage::Contains => "contains",
            Stage::Wildcard => "wildcard",
            Stage::CharacterOverlap => "character-overlap",
        };
        f.write_str(name)
    }
}

/// What one stage produced
#[derive(Debug)]
pub enum StageOutcome {
    Matched(Vec<CourseRecord>),
    Failed(anyhow::Error),
}

impl StageOutcome {
    fn from_result(result: Result<Vec<CourseRecord>>) -> Self {
        match result {
            Ok(records) => Self::Matched(records),
            Err(e) => Self::Failed(e),
        }
    }

    /// Records to merge. A failed stage counts as a stage with no matches.
    pub fn into_records(self, stage: Stage) -> Vec<CourseRecord> {
        match self {
            Self::Matched(records) => records,
            Self::Failed(e) => {
                tracing::warn!("Fuzzy {} stage failed, continuing without it: {:#}", stage, e);
                Vec::new()
            }
        }
    }
}

/// Deduplicating, order-preserving result buffer
#[derive(Debug)]
struct Accumulator {
    seen: HashSet<String>,
    records: Vec<CourseRecord>,
    page_size: usize,
}

impl Accumulator {
    fn new(page_size: usize) -> Self {
        Self {
            seen: HashSet::new(),
            records: Vec::new(),
            page_size,
        }
    }

    /// Append records whose id has not been seen, returning how many were new
    fn absorb(&mut self, records: Vec<CourseRecord>) -> usize {
        let before = self.records.len();
        for record in records {
            if self.seen.insert(record.id.clone()) {
                self.records.push(record);
            }
        }
        self.records.len() - before
    }

    fn remaining(&self) -> usize {
        self.page_size.saturating_sub(self.records.len())
    }

    fn is_full(&self) -> bool {
        self.records.len() >= self.page_size
    }

    fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    fn into_response(self) -> SearchResponse {
        let total = self.records.len() as u64;
        let mut courses = self.records;
        courses.truncate(self.page_size);
        SearchResponse { total, courses }
    }
}

/// Orchestrates the fuzzy stages over a [`CourseIndex`]
#[derive(Clone)]
pub struct FuzzyCascade {
    index: Arc<dyn CourseIndex>,
    executor: QueryExecutor,
}

impl FuzzyCascade {
    pub fn new(index: Arc<dyn CourseIndex>) -> Self {
        let executor = QueryExecutor::new(index.clone());
        Self { index, executor }
    }

    /// Search for `term`, relaxing the match until a page is filled.
    ///
    /// A blank term or any non-text filter in `rest` bypasses the cascade and
    /// runs one filtered query; only that path can return an error.
    pub fn execute(
        &self,
        term: &str,
        rest: &SearchCriteria,
        sort: SortSpec,
        page: PageRequest,
    ) -> Result<SearchResponse> {
        if term.trim().is_empty() || rest.has_non_text_filters() {
            let criteria = SearchCriteria {
                term: Some(term.to_string()),
                ..rest.without_term()
            };
            let predicate = build_filter_predicate(&criteria);
            return self.executor.execute(predicate.as_ref(), sort, page);
        }

        Ok(self.run_stages(term.trim(), sort, page))
    }

    fn run_stages(&self, term: &str, sort: SortSpec, page: PageRequest) -> SearchResponse {
        let mut results = Accumulator::new(page.size());
        let long_enough = term.chars().count() >= MIN_FUZZY_TERM_LENGTH;

        let added = results.absorb(self.exact_stage(term, sort, page).into_records(Stage::Exact));
        tracing::debug!("Fuzzy exact stage for '{}' added {} records", term, added);

        if !results.is_full() {
            let added = results
                .absorb(self.contains_stage(term, sort, page).into_records(Stage::Contains));
            tracing::debug!("Fuzzy contains stage for '{}' added {} records", term, added);
        }

        if long_enough && !results.is_full() {
            self.wildcard_stage(term, sort, page, &mut results);
        }

        if long_enough && !results.is_full() {
            let matches = self
                .character_stage(term, sort, &results)
                .into_records(Stage::CharacterOverlap);
            let added = results.absorb(matches);
            tracing::debug!("Fuzzy character stage for '{}' added {} records", term, added);
        }

        results.into_response()
    }

    fn stage_query(&self, predicate: &Predicate, sort: SortSpec, page: PageRequest) -> StageOutcome {
        let result = self
            .index
            .query(Some(predicate), sort, 0, page.size())
            .map(|hits| hits.records);
        StageOutcome::from_result(result)
    }

    fn exact_stage(&self, term: &str, sort: SortSpec, page: PageRequest) -> StageOutcome {
        let predicate = Predicate::title_or_description(|field| Condition::Phrase {
            field,
            text: term.to_string(),
        });
        self.stage_query(&predicate, sort, page)
    }

    fn contains_stage(&self, term: &str, sort: SortSpec, page: PageRequest) -> StageOutcome {
        let needle = term.to_lowercase();
        let predicate = Predicate::title_or_description(|field| Condition::Contains {
            field,
            needle: needle.clone(),
        });
        self.stage_query(&predicate, sort, page)
    }

    /// Each glob runs as its own query; failures skip that glob only
    fn wildcard_stage(
        &self,
        term: &str,
        sort: SortSpec,
        page: PageRequest,
        results: &mut Accumulator,
    ) {
        let lower = term.to_lowercase();
        let patterns = [
            format!("*{lower}*"),
            format!("{lower}*"),
            format!("*{lower}"),
        ];

        for pattern in patterns {
            if results.is_full() {
                break;
            }
            let predicate = Predicate::single(Condition::Wildcard {
                field: TextField::Title,
                pattern: pattern.clone(),
            });
            let added = results.absorb(
                self.stage_query(&predicate, sort, page)
                    .into_records(Stage::Wildcard),
            );
            tracing::debug!("Fuzzy wildcard '{}' added {} records", pattern, added);
        }
    }

    fn character_stage(&self, term: &str, sort: SortSpec, results: &Accumulator) -> StageOutcome {
        let candidates = match self.index.query(None, sort, 0, CHARACTER_MATCH_CANDIDATES) {
            Ok(hits) => hits.records,
            Err(e) => return StageOutcome::Failed(e),
        };

        let matches = candidates
            .into_iter()
            .filter(|record| !results.contains(&record.id))
            .filter(|record| is_character_match(term, &record.title))
            .take(results.remaining())
            .collect();

        StageOutcome::Matched(matches)
    }
}

/// Fraction of aligned positions where the lower-cased strings agree.
///
/// Only positions up to the shorter length are compared. Returns 0.0 when
/// either string is empty.
pub fn character_overlap_ratio(term: &str, title: &str) -> f64 {
    let term: Vec<char> = term.to_lowercase().chars().collect();
    let title: Vec<char> = title.to_lowercase().chars().collect();

    let shorter = term.len().min(title.len());
    if shorter == 0 {
        return 0.0;
    }

    let matching = term
        .iter()
        .zip(title.iter())
        .filter(|(a, b)| a == b)
        .count();

    matching as f64 / shorter as f64
}

/// Typo-tolerant title comparison used by the last cascade stage
pub fn is_character_match(term: &str, title: &str) -> bool {
    let term_len = term.to_lowercase().chars().count();
    let title_len = title.to_lowercase().chars().count();

    if term_len.abs_diff(title_len) > MAX_LENGTH_DIFFERENCE {
        return false;
    }

    character_overlap_ratio(term, title) >= CHARACTER_MATCH_THRESHOLD
}
