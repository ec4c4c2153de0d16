//! Tantivy schema for course documents.
//!
//! Every record is stored whole as JSON in `source`; the remaining fields exist
//! only to be queried. `title_lower` and `description_lower` hold the complete
//! lower-cased value as a single term so substring and prefix matching can run
//! as regex queries over the whole value. Tantivy skips terms longer than its
//! token limit, so those values are cut to [`MAX_LOWERED_TERM_BYTES`] first and
//! only their leading part can match.

use anyhow::{Context, Result};
use chrono::Utc;
use tantivy::schema::{
    DateOptions, DateTimePrecision, FAST, Field, INDEXED, STORED, STRING, Schema, TEXT,
};
use tantivy::{DateTime, TantivyDocument};

use crate::catalog::CourseRecord;

pub const ID: &str = "id";
pub const SOURCE: &str = "source";
pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const TITLE_LOWER: &str = "title_lower";
pub const DESCRIPTION_LOWER: &str = "description_lower";
pub const CATEGORY: &str = "category";
pub const COURSE_TYPE: &str = "type";
pub const MIN_AGE: &str = "min_age";
pub const MAX_AGE: &str = "max_age";
pub const MIN_PRICE: &str = "min_price";
pub const MAX_PRICE: &str = "max_price";
pub const NEXT_SESSION_DATE: &str = "next_session_date";

/// Longest lower-cased value kept as one term, below tantivy's 65530 byte token cap
pub const MAX_LOWERED_TERM_BYTES: usize = 65_000;

/// Handles for every field of the course schema
#[derive(Debug, Clone, Copy)]
pub struct CourseFields {
    pub id: Field,
    pub source: Field,
    pub title: Field,
    pub description: Field,
    pub title_lower: Field,
    pub description_lower: Field,
    pub category: Field,
    pub course_type: Field,
    pub min_age: Field,
    pub max_age: Field,
    pub min_price: Field,
    pub max_price: Field,
    pub next_session_date: Field,
}

pub fn build_schema() -> Schema {
    let mut builder = Schema::builder();

    builder.add_text_field(ID, STRING | STORED);
    builder.add_text_field(SOURCE, STORED);

    // Analysed text for word, phrase and glob matching
    builder.add_text_field(TITLE, TEXT);
    builder.add_text_field(DESCRIPTION, TEXT);
    builder.add_text_field(TITLE_LOWER, STRING);
    builder.add_text_field(DESCRIPTION_LOWER, STRING);

    builder.add_text_field(CATEGORY, STRING);
    builder.add_text_field(COURSE_TYPE, STRING);

    builder.add_i64_field(MIN_AGE, INDEXED | FAST);
    builder.add_i64_field(MAX_AGE, INDEXED | FAST);
    builder.add_f64_field(MIN_PRICE, INDEXED | FAST);
    builder.add_f64_field(MAX_PRICE, INDEXED | FAST);
    builder.add_date_field(
        NEXT_SESSION_DATE,
        DateOptions::from(INDEXED | FAST).set_precision(DateTimePrecision::Microseconds),
    );

    builder.build()
}

impl CourseFields {
    /// Resolve field handles, failing if `schema` is not a course schema
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        let field = |name: &str| {
            schema
                .get_field(name)
                .with_context(|| format!("Index schema has no '{name}' field"))
        };

        Ok(Self {
            id: field(ID)?,
            source: field(SOURCE)?,
            title: field(TITLE)?,
            description: field(DESCRIPTION)?,
            title_lower: field(TITLE_LOWER)?,
            description_lower: field(DESCRIPTION_LOWER)?,
            category: field(CATEGORY)?,
            course_type: field(COURSE_TYPE)?,
            min_age: field(MIN_AGE)?,
            max_age: field(MAX_AGE)?,
            min_price: field(MIN_PRICE)?,
            max_price: field(MAX_PRICE)?,
            next_session_date: field(NEXT_SESSION_DATE)?,
        })
    }

    /// Build the tantivy document for one record
    pub fn to_document(&self, record: &CourseRecord) -> Result<TantivyDocument> {
        let source = serde_json::to_string(record)
            .with_context(|| format!("Failed to serialize course {}", record.id))?;

        let mut doc = TantivyDocument::default();
        doc.add_text(self.id, &record.id);
        doc.add_text(self.source, &source);

        if !record.title.is_empty() {
            doc.add_text(self.title, &record.title);
            doc.add_text(self.title_lower, lowered_term(&record.id, &record.title));
        }
        if !record.description.is_empty() {
            doc.add_text(self.description, &record.description);
            doc.add_text(
                self.description_lower,
                lowered_term(&record.id, &record.description),
            );
        }

        if let Some(category) = &record.category {
            doc.add_text(self.category, category);
        }
        if let Some(course_type) = &record.course_type {
            doc.add_text(self.course_type, course_type);
        }
        if let Some(age) = record.min_age {
            doc.add_i64(self.min_age, age);
        }
        if let Some(age) = record.max_age {
            doc.add_i64(self.max_age, age);
        }
        if let Some(price) = record.min_price {
            doc.add_f64(self.min_price, price);
        }
        if let Some(price) = record.max_price {
            doc.add_f64(self.max_price, price);
        }
        if let Some(date) = record.next_session_date {
            doc.add_date(self.next_session_date, session_time(&date));
        }

        Ok(doc)
    }
}

/// Session dates are indexed and compared at microsecond precision
pub fn session_time(date: &chrono::DateTime<Utc>) -> DateTime {
    DateTime::from_timestamp_micros(date.timestamp_micros())
}

/// Lower-case `value`, cutting it at a char boundary when it would exceed the term limit
fn lowered_term(id: &str, value: &str) -> String {
    let mut lowered = value.to_lowercase();
    if lowered.len() > MAX_LOWERED_TERM_BYTES {
        let mut end = MAX_LOWERED_TERM_BYTES;
        while !lowered.is_char_boundary(end) {
            end -= 1;
        }
        tracing::warn!(
            "Course {} has a {} byte text value; only the first {} bytes are substring-searchable",
            id,
            lowered.len(),
            end
        );
        lowered.truncate(end);
    }
    lowered
}
