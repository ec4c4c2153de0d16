//! Tantivy-backed [`CourseIndex`].
//!
//! Predicates are translated into tantivy queries, every match is loaded and
//! ordered in memory by the requested [`SortSpec`], and the requested window
//! is cut from that ordering. Course catalogs are small enough that this keeps
//! multi-key sorting with missing values simple and deterministic.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::ops::Bound;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tantivy::collector::{Count, DocSetCollector};
use tantivy::directory::MmapDirectory;
use tantivy::query::{
    AllQuery, BooleanQuery, EmptyQuery, Occur, PhraseQuery, Query, RangeQuery, RegexQuery,
    TermQuery,
};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::tokenizer::{Token, TokenStream};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};

use crate::catalog::CourseRecord;
use crate::catalog::schema::{CourseFields, build_schema, session_time};
use crate::search::index::{CourseIndex, IndexHits};
use crate::search::predicate::{
    Clause, Comparison, Condition, KeywordField, Predicate, RangeField, RangeValue, TextField,
};
use crate::search::sort::{Direction, SortField, SortKey, SortSpec};

/// Default indexing memory budget
pub const DEFAULT_WRITER_BUFFER_BYTES: usize = 50_000_000;

/// Smallest per-thread budget tantivy accepts
pub const MIN_WRITER_BUFFER_BYTES: usize = 15_000_000;

/// Document and segment counts for the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_docs: u64,
    pub segments: usize,
}

pub struct TantivyCourseIndex {
    index: Index,
    reader: IndexReader,
    fields: CourseFields,
    writer_buffer_bytes: usize,
    location: Option<PathBuf>,
}

impl TantivyCourseIndex {
    /// Volatile index, used by tests and one-off tooling
    pub fn create_in_ram() -> Result<Self> {
        let index = Index::create_in_ram(build_schema());
        Self::from_index(index, None)
    }

    /// Open the index stored in `dir`, creating an empty one if needed
    pub fn open_or_create(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create index directory: {}", dir.display()))?;

        let directory = MmapDirectory::open(dir)
            .with_context(|| format!("Failed to open index directory: {}", dir.display()))?;
        let index = Index::open_or_create(directory, build_schema())
            .with_context(|| format!("Failed to open course index at: {}", dir.display()))?;

        Self::from_index(index, Some(dir.to_path_buf()))
    }

    fn from_index(index: Index, location: Option<PathBuf>) -> Result<Self> {
        let fields = CourseFields::from_schema(&index.schema())?;
        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .context("Failed to create index reader")?;

        Ok(Self {
            index,
            reader,
            fields,
            writer_buffer_bytes: DEFAULT_WRITER_BUFFER_BYTES,
            location,
        })
    }

    pub fn with_writer_buffer(mut self, bytes: usize) -> Self {
        self.writer_buffer_bytes = bytes.max(MIN_WRITER_BUFFER_BYTES);
        self
    }

    /// Directory backing the index, `None` for in-RAM indexes
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Delete every document and write `records` in a single commit.
    ///
    /// Readers see either the old catalog or the new one, never a mix. A
    /// repeated id replaces the earlier record, keeping its first position.
    pub fn replace_all(&self, records: &[CourseRecord]) -> Result<usize> {
        let records = unique_by_id(records);
        let mut writer: IndexWriter = self
            .index
            .writer_with_num_threads(1, self.writer_buffer_bytes)
            .context("Failed to acquire index writer")?;

        writer
            .delete_all_documents()
            .context("Failed to clear course index")?;

        for record in &records {
            let doc = self.fields.to_document(record)?;
            writer
                .add_document(doc)
                .with_context(|| format!("Failed to index course {}", record.id))?;
        }

        writer.commit().context("Failed to commit course index")?;
        self.reader
            .reload()
            .context("Failed to reload index reader")?;

        tracing::info!("Indexed {} courses", records.len());
        Ok(records.len())
    }

    pub fn stats(&self) -> Result<IndexStats> {
        let searcher = self.reader.searcher();
        let segment_readers = searcher.segment_readers();

        Ok(IndexStats {
            total_docs: segment_readers.iter().map(|r| r.num_docs() as u64).sum(),
            segments: segment_readers.len(),
        })
    }

    fn build_query(&self, predicate: Option<&Predicate>) -> Result<Box<dyn Query>> {
        let Some(predicate) = predicate else {
            return Ok(Box::new(AllQuery));
        };

        let mut clauses = predicate
            .clauses()
            .iter()
            .map(|clause| self.clause_query(clause))
            .collect::<Result<Vec<_>>>()?;

        if clauses.len() == 1 {
            return Ok(clauses.remove(0));
        }
        Ok(Box::new(BooleanQuery::new(
            clauses.into_iter().map(|q| (Occur::Must, q)).collect(),
        )))
    }

    fn clause_query(&self, clause: &Clause) -> Result<Box<dyn Query>> {
        let mut queries = clause
            .conditions()
            .iter()
            .map(|condition| self.condition_query(condition))
            .collect::<Result<Vec<_>>>()?;

        if queries.len() == 1 {
            return Ok(queries.remove(0));
        }
        Ok(Box::new(BooleanQuery::new(
            queries.into_iter().map(|q| (Occur::Should, q)).collect(),
        )))
    }

    fn condition_query(&self, condition: &Condition) -> Result<Box<dyn Query>> {
        let query: Box<dyn Query> = match condition {
            Condition::Matches { field, text } => {
                let terms = self.analyse(self.text_field(*field), text)?;
                if terms.is_empty() {
                    return Ok(Box::new(EmptyQuery));
                }
                Box::new(BooleanQuery::new(
                    terms
                        .into_iter()
                        .map(|term| (Occur::Should, term_query(term)))
                        .collect(),
                ))
            }
            Condition::Phrase { field, text } => {
                let mut terms = self.analyse(self.text_field(*field), text)?;
                match terms.len() {
                    0 => Box::new(EmptyQuery),
                    1 => term_query(terms.remove(0)),
                    _ => Box::new(PhraseQuery::new(terms)),
                }
            }
            Condition::Contains { field, needle } => {
                let pattern = format!("(?s).*{}.*", regex::escape(needle));
                self.regex_query(&pattern, self.lowered_field(*field))?
            }
            Condition::Wildcard { field, pattern } => {
                self.regex_query(&glob_to_regex(pattern), self.text_field(*field))?
            }
            Condition::StartsWith { field, prefix } => {
                let pattern = format!("(?s){}.*", regex::escape(prefix));
                self.regex_query(&pattern, self.lowered_field(*field))?
            }
            Condition::Keyword { field, value } => {
                let field = match field {
                    KeywordField::Category => self.fields.category,
                    KeywordField::CourseType => self.fields.course_type,
                };
                term_query(Term::from_field_text(field, value))
            }
            Condition::Range {
                field,
                comparison,
                value,
            } => {
                let term = self.range_term(*field, *value);
                let (lower, upper) = match comparison {
                    Comparison::AtLeast => (Bound::Included(term), Bound::Unbounded),
                    Comparison::AtMost => (Bound::Unbounded, Bound::Included(term)),
                };
                Box::new(RangeQuery::new(lower, upper))
            }
        };
        Ok(query)
    }

    fn regex_query(&self, pattern: &str, field: Field) -> Result<Box<dyn Query>> {
        let query = RegexQuery::from_pattern(pattern, field)
            .with_context(|| format!("Invalid match pattern: {pattern}"))?;
        Ok(Box::new(query))
    }

    /// Run `text` through the field's analyser
    fn analyse(&self, field: Field, text: &str) -> Result<Vec<Term>> {
        let mut analyzer = self
            .index
            .tokenizer_for_field(field)
            .context("Failed to resolve tokenizer")?;

        let mut terms = Vec::new();
        let mut stream = analyzer.token_stream(text);
        stream.process(&mut |token: &Token| terms.push(Term::from_field_text(field, &token.text)));
        Ok(terms)
    }

    fn text_field(&self, field: TextField) -> Field {
        match field {
            TextField::Title => self.fields.title,
            TextField::Description => self.fields.description,
        }
    }

    fn lowered_field(&self, field: TextField) -> Field {
        match field {
            TextField::Title => self.fields.title_lower,
            TextField::Description => self.fields.description_lower,
        }
    }

    fn range_term(&self, field: RangeField, value: RangeValue) -> Term {
        let field = match field {
            RangeField::MinAge => self.fields.min_age,
            RangeField::MaxAge => self.fields.max_age,
            RangeField::MinPrice => self.fields.min_price,
            RangeField::MaxPrice => self.fields.max_price,
            RangeField::NextSessionDate => self.fields.next_session_date,
        };

        match value {
            RangeValue::Int(v) => Term::from_field_i64(field, v),
            RangeValue::Float(v) => Term::from_field_f64(field, v),
            RangeValue::Date(date) => {
                Term::from_field_date(field, session_time(&date))
            }
        }
    }

    fn load_record(&self, doc: &TantivyDocument) -> Result<CourseRecord> {
        let source = doc
            .get_first(self.fields.source)
            .and_then(|v| v.as_str())
            .context("Indexed course has no stored source")?;

        serde_json::from_str(source).context("Failed to decode stored course")
    }
}

impl CourseIndex for TantivyCourseIndex {
    fn query(
        &self,
        predicate: Option<&Predicate>,
        sort: SortSpec,
        offset: usize,
        limit: usize,
    ) -> Result<IndexHits> {
        let query = self.build_query(predicate)?;
        let searcher = self.reader.searcher();

        let (total, addresses) = searcher
            .search(query.as_ref(), &(Count, DocSetCollector))
            .context("Course index search failed")?;

        let mut records = addresses
            .into_iter()
            .map(|address| {
                let doc: TantivyDocument = searcher
                    .doc(address)
                    .context("Failed to load course document")?;
                self.load_record(&doc)
            })
            .collect::<Result<Vec<_>>>()?;

        records.sort_by(|a, b| compare_records(a, b, sort.keys()));

        Ok(IndexHits {
            total: total as u64,
            records: records.into_iter().skip(offset).take(limit).collect(),
        })
    }
}

fn term_query(term: Term) -> Box<dyn Query> {
    Box::new(TermQuery::new(term, IndexRecordOption::Basic))
}

/// Translate a `*`/`?` glob into an anchored term regex
fn glob_to_regex(glob: &str) -> String {
    let mut pattern = String::with_capacity(glob.len() * 2);
    for c in glob.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            other => pattern.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    pattern
}

/// Order by each sort key in turn, then by id.
///
/// A record missing a key's value sorts after every record that has one,
/// whatever the direction.
fn compare_records(a: &CourseRecord, b: &CourseRecord, keys: &[SortKey]) -> Ordering {
    keys.iter()
        .map(|key| compare_key(a, b, key))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.id.cmp(&b.id))
}

fn compare_key(a: &CourseRecord, b: &CourseRecord, key: &SortKey) -> Ordering {
    let present = match key.field {
        SortField::MinPrice => compare_present(a.min_price, b.min_price, f64::total_cmp),
        SortField::MaxPrice => compare_present(a.max_price, b.max_price, f64::total_cmp),
        SortField::NextSessionDate => {
            compare_present(a.next_session_date, b.next_session_date, |x, y| x.cmp(y))
        }
    };

    match present {
        Presence::Both(ordering) => match key.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        },
        Presence::Partial(ordering) => ordering,
    }
}

enum Presence {
    Both(Ordering),
    Partial(Ordering),
}

fn compare_present<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Presence {
    match (a, b) {
        (Some(a), Some(b)) => Presence::Both(cmp(&a, &b)),
        (Some(_), None) => Presence::Partial(Ordering::Less),
        (None, Some(_)) => Presence::Partial(Ordering::Greater),
        (None, None) => Presence::Partial(Ordering::Equal),
    }
}

/// Collapse records sharing an id; the last one wins
fn unique_by_id(records: &[CourseRecord]) -> Vec<&CourseRecord> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<&CourseRecord> = Vec::with_capacity(records.len());

    for record in records {
        match positions.get(record.id.as_str()) {
            Some(&at) => unique[at] = record,
            None => {
                positions.insert(record.id.as_str(), unique.len());
                unique.push(record);
            }
        }
    }

    if unique.len() < records.len() {
        tracing::warn!(
            "Seed has {} records sharing an id with a later one; keeping the last of each",
            records.len() - unique.len()
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn course(id: &str, title: &str, description: &str) -> CourseRecord {
        CourseRecord {
            description: description.into(),
            ..CourseRecord::new(id, title)
        }
    }

    fn dated(mut record: CourseRecord, day: u32) -> CourseRecord {
        record.next_session_date = Some(Utc.with_ymd_and_hms(2025, 7, day, 9, 0, 0).unwrap());
        record
    }

    fn priced(mut record: CourseRecord, min: f64, max: f64) -> CourseRecord {
        record.min_price = Some(min);
        record.max_price = Some(max);
        record
    }

    fn catalog() -> TantivyCourseIndex {
        let index = TantivyCourseIndex::create_in_ram().unwrap();
        let records = vec![
            dated(
                priced(course("1", "Java Programming", "Learn Java from basics"), 100.0, 200.0),
                10,
            ),
            dated(
                priced(course("2", "JavaScript Basics", "Web development essentials"), 50.0, 90.0),
                5,
            ),
            dated(
                priced(course("3", "Math Olympiad", "Competitive mathematics"), 150.0, 300.0),
                20,
            ),
            course("4", "Physics Lab", "Hands-on experiments"),
            dated(course("5", "Advanced Java", "Concurrency in practice"), 15),
        ];
        index.replace_all(&records).unwrap();
        index
    }

    fn ids(hits: &IndexHits) -> Vec<&str> {
        hits.records.iter().map(|r| r.id.as_str()).collect()
    }

    fn on_both(condition: impl Fn(TextField) -> Condition) -> Predicate {
        Predicate::title_or_description(condition)
    }

    #[test]
    fn test_match_all_sorted_upcoming() {
        let index = catalog();
        let hits = index.query(None, SortSpec::Upcoming, 0, 10).unwrap();

        assert_eq!(hits.total, 5);
        // undated course goes last
        assert_eq!(ids(&hits), vec!["2", "1", "5", "3", "4"]);
    }

    #[test]
    fn test_window_and_total() {
        let index = catalog();
        let hits = index.query(None, SortSpec::Upcoming, 2, 2).unwrap();

        assert_eq!(hits.total, 5);
        assert_eq!(ids(&hits), vec!["5", "3"]);

        let past_end = index.query(None, SortSpec::Upcoming, 50, 10).unwrap();
        assert_eq!(past_end.total, 5);
        assert!(past_end.records.is_empty());
    }

    #[test]
    fn test_sort_orders() {
        let index = catalog();

        let by_date_desc = index.query(None, SortSpec::DateDesc, 0, 10).unwrap();
        assert_eq!(ids(&by_date_desc), vec!["3", "5", "1", "2", "4"]);

        // unpriced courses follow, ordered by date then id
        let by_price = index.query(None, SortSpec::PriceAsc, 0, 10).unwrap();
        assert_eq!(ids(&by_price), vec!["2", "1", "3", "5", "4"]);

        let by_price_desc = index.query(None, SortSpec::PriceDesc, 0, 10).unwrap();
        assert_eq!(ids(&by_price_desc), vec!["3", "1", "2", "5", "4"]);
    }

    #[test]
    fn test_phrase_matches_analysed_words() {
        let index = catalog();

        let single = on_both(|field| Condition::Phrase {
            field,
            text: "Java".into(),
        });
        let hits = index.query(Some(&single), SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(ids(&hits), vec!["1", "5"]);

        let phrase = on_both(|field| Condition::Phrase {
            field,
            text: "java programming".into(),
        });
        let hits = index.query(Some(&phrase), SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(ids(&hits), vec!["1"]);

        let reversed = on_both(|field| Condition::Phrase {
            field,
            text: "Programming Java".into(),
        });
        assert_eq!(index.query(Some(&reversed), SortSpec::Upcoming, 0, 10).unwrap().total, 0);
    }

    #[test]
    fn test_matches_any_word() {
        let index = catalog();
        let predicate = on_both(|field| Condition::Matches {
            field,
            text: "physics web".into(),
        });
        let hits = index.query(Some(&predicate), SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(ids(&hits), vec!["2", "4"]);
    }

    #[test]
    fn test_contains_is_substring_of_whole_value() {
        let index = catalog();
        let predicate = on_both(|field| Condition::Contains {
            field,
            needle: "script ba".into(),
        });
        let hits = index.query(Some(&predicate), SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(ids(&hits), vec!["2"]);

        let description = Predicate::single(Condition::Contains {
            field: TextField::Description,
            needle: "mathematics".into(),
        });
        let hits = index.query(Some(&description), SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(ids(&hits), vec!["3"]);
    }

    #[test]
    fn test_wildcard_on_title_words() {
        let index = catalog();
        let glob = |pattern: &str| {
            Predicate::single(Condition::Wildcard {
                field: TextField::Title,
                pattern: pattern.into(),
            })
        };

        let prefix = index.query(Some(&glob("java*")), SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(ids(&prefix), vec!["2", "1", "5"]);

        let suffix = index.query(Some(&glob("*ics")), SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(ids(&suffix), vec!["2", "4"]);

        let single = index.query(Some(&glob("m?th")), SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(ids(&single), vec!["3"]);
    }

    #[test]
    fn test_starts_with_whole_title() {
        let index = catalog();
        let predicate = Predicate::single(Condition::StartsWith {
            field: TextField::Title,
            prefix: "java".into(),
        });
        let hits = index.query(Some(&predicate), SortSpec::Upcoming, 0, 10).unwrap();
        // "Advanced Java" contains the word but does not start with it
        assert_eq!(ids(&hits), vec!["2", "1"]);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let index = TantivyCourseIndex::create_in_ram().unwrap();
        index
            .replace_all(&[CourseRecord::new("1", "C++ (Intro)"), CourseRecord::new("2", "Cxx")])
            .unwrap();

        let predicate = Predicate::single(Condition::StartsWith {
            field: TextField::Title,
            prefix: "c++ (".into(),
        });
        let hits = index.query(Some(&predicate), SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(ids(&hits), vec!["1"]);
    }

    #[test]
    fn test_keyword_and_ranges() {
        let index = TantivyCourseIndex::create_in_ram().unwrap();
        let mut art = CourseRecord::new("1", "Painting");
        art.category = Some("Art".into());
        art.min_age = Some(6);
        art.max_age = Some(10);
        let mut science = CourseRecord::new("2", "Robotics");
        science.category = Some("Science".into());
        science.min_age = Some(11);
        science.max_age = Some(14);
        index.replace_all(&[art, science]).unwrap();

        let category = Predicate::single(Condition::Keyword {
            field: KeywordField::Category,
            value: "Art".into(),
        });
        assert_eq!(
            ids(&index.query(Some(&category), SortSpec::Upcoming, 0, 10).unwrap()),
            vec!["1"]
        );

        let lowercase = Predicate::single(Condition::Keyword {
            field: KeywordField::Category,
            value: "art".into(),
        });
        assert_eq!(index.query(Some(&lowercase), SortSpec::Upcoming, 0, 10).unwrap().total, 0);

        // age 12 fits only the course whose span reaches it
        let ages = Predicate::builder()
            .require(Condition::range(RangeField::MaxAge, Comparison::AtLeast, RangeValue::Int(12)))
            .require(Condition::range(RangeField::MinAge, Comparison::AtMost, RangeValue::Int(12)))
            .build()
            .unwrap();
        assert_eq!(
            ids(&index.query(Some(&ages), SortSpec::Upcoming, 0, 10).unwrap()),
            vec!["2"]
        );
    }

    #[test]
    fn test_price_and_date_bounds_are_inclusive() {
        let index = catalog();

        let price = Predicate::single(Condition::range(
            RangeField::MinPrice,
            Comparison::AtLeast,
            RangeValue::Float(100.0),
        ));
        assert_eq!(
            ids(&index.query(Some(&price), SortSpec::Upcoming, 0, 10).unwrap()),
            vec!["1", "3"]
        );

        let date = Predicate::single(Condition::range(
            RangeField::NextSessionDate,
            Comparison::AtLeast,
            RangeValue::Date(Utc.with_ymd_and_hms(2025, 7, 15, 9, 0, 0).unwrap()),
        ));
        assert_eq!(
            ids(&index.query(Some(&date), SortSpec::Upcoming, 0, 10).unwrap()),
            vec!["5", "3"]
        );
    }

    #[test]
    fn test_replace_all_wipes_previous_catalog() {
        let index = catalog();
        assert_eq!(index.stats().unwrap().total_docs, 5);

        index.replace_all(&[CourseRecord::new("9", "Chess Club")]).unwrap();

        let hits = index.query(None, SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(ids(&hits), vec!["9"]);
        assert_eq!(index.stats().unwrap().total_docs, 1);
    }

    #[test]
    fn test_duplicate_ids_keep_last_record() {
        let index = TantivyCourseIndex::create_in_ram().unwrap();
        let count = index
            .replace_all(&[
                CourseRecord::new("1", "Chess Club"),
                CourseRecord::new("2", "Robotics"),
                CourseRecord::new("1", "Chess Masterclass"),
            ])
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(index.stats().unwrap().total_docs, 2);

        let hits = index.query(None, SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(hits.total, 2);
        assert_eq!(ids(&hits), vec!["1", "2"]);
        assert_eq!(hits.records[0].title, "Chess Masterclass");
    }

    #[test]
    fn test_date_bounds_keep_subseconds() {
        let index = TantivyCourseIndex::create_in_ram().unwrap();
        let mut lab = CourseRecord::new("1", "Physics Lab");
        let session = Utc.with_ymd_and_hms(2025, 7, 10, 15, 0, 0).unwrap();
        lab.next_session_date = Some(session);
        index.replace_all(&[lab]).unwrap();

        let half_second = chrono::Duration::milliseconds(500);
        let from = |date| {
            Predicate::single(Condition::range(
                RangeField::NextSessionDate,
                Comparison::AtLeast,
                RangeValue::Date(date),
            ))
        };

        let after = index.query(Some(&from(session + half_second)), SortSpec::Upcoming, 0, 10);
        assert_eq!(after.unwrap().total, 0);

        let before = index.query(Some(&from(session - half_second)), SortSpec::Upcoming, 0, 10);
        assert_eq!(ids(&before.unwrap()), vec!["1"]);

        let until = Predicate::single(Condition::range(
            RangeField::NextSessionDate,
            Comparison::AtMost,
            RangeValue::Date(session - half_second),
        ));
        assert_eq!(index.query(Some(&until), SortSpec::Upcoming, 0, 10).unwrap().total, 0);
    }

    #[test]
    fn test_oversized_description_stays_searchable_by_prefix() {
        let index = TantivyCourseIndex::create_in_ram().unwrap();
        let mut long = CourseRecord::new("1", "Robotics");
        long.description = format!("Build robots {}", "x".repeat(70_000));
        index.replace_all(&[long]).unwrap();

        let predicate = Predicate::single(Condition::Contains {
            field: TextField::Description,
            needle: "build robots".into(),
        });
        let hits = index.query(Some(&predicate), SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(ids(&hits), vec!["1"]);
        assert_eq!(hits.records[0].description.len(), 70_013);
    }

    #[test]
    fn test_open_or_create_persists() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let index = TantivyCourseIndex::open_or_create(dir.path()).unwrap();
            assert_eq!(index.location(), Some(dir.path()));
            index.replace_all(&[CourseRecord::new("1", "Chess Club")]).unwrap();
        }

        let reopened = TantivyCourseIndex::open_or_create(dir.path()).unwrap();
        let hits = reopened.query(None, SortSpec::Upcoming, 0, 10).unwrap();
        assert_eq!(hits.records[0].title, "Chess Club");
    }

    #[test]
    fn test_glob_to_regex() {
        assert_eq!(glob_to_regex("*java*"), ".*java.*");
        assert_eq!(glob_to_regex("c?t"), "c.t");
        assert_eq!(glob_to_regex("c++*"), r"c\+\+.*");
    }

    #[test]
    fn test_writer_buffer_floor() {
        let index = TantivyCourseIndex::create_in_ram()
            .unwrap()
            .with_writer_buffer(1_000);
        assert_eq!(index.writer_buffer_bytes, MIN_WRITER_BUFFER_BYTES);
    }
}
