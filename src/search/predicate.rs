//! Typed search predicates.
//!
//! A [`Predicate`] is an immutable AND of [`Clause`]s, where each clause is an
//! OR of [`Condition`]s. Predicates are assembled with [`PredicateBuilder`]
//! and translated into engine queries by a [`CourseIndex`] implementation.
//!
//! [`CourseIndex`]: crate::search::index::CourseIndex

use chrono::{DateTime, Utc};

use crate::search::criteria::SearchCriteria;

/// Analysed free-text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Description,
}

impl TextField {
    pub const ALL: [TextField; 2] = [TextField::Title, TextField::Description];
}

/// Fields matched by exact keyword equality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordField {
    Category,
    CourseType,
}

/// Fields compared with range bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    MinAge,
    MaxAge,
    MinPrice,
    MaxPrice,
    NextSessionDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    AtLeast,
    AtMost,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeValue {
    Int(i64),
    Float(f64),
    Date(DateTime<Utc>),
}

/// A single match condition against one record field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Any analysed word of `text` occurs in the field
    Matches { field: TextField, text: String },
    /// The analysed words of `text` occur in the field, in order and adjacent
    Phrase { field: TextField, text: String },
    /// The lower-cased field value contains `needle` (already lower-cased)
    Contains { field: TextField, needle: String },
    /// A word of the field matches a `*`/`?` glob (already lower-cased)
    Wildcard { field: TextField, pattern: String },
    /// The lower-cased field value starts with `prefix` (already lower-cased)
    StartsWith { field: TextField, prefix: String },
    /// The field equals `value` exactly
    Keyword { field: KeywordField, value: String },
    Range {
        field: RangeField,
        comparison: Comparison,
        value: RangeValue,
    },
}

impl Condition {
    pub fn range(field: RangeField, comparison: Comparison, value: RangeValue) -> Self {
        Self::Range {
            field,
            comparison,
            value,
        }
    }
}

/// Conditions joined with OR
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    any_of: Vec<Condition>,
}

impl Clause {
    pub fn conditions(&self) -> &[Condition] {
        &self.any_of
    }
}

/// Clauses joined with AND
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    pub fn builder() -> PredicateBuilder {
        PredicateBuilder::default()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// The same condition on both title and description, OR-ed
    pub fn title_or_description(condition: impl Fn(TextField) -> Condition) -> Self {
        Self {
            clauses: vec![Clause {
                any_of: TextField::ALL.into_iter().map(condition).collect(),
            }],
        }
    }

    /// A predicate made of one condition
    pub fn single(condition: Condition) -> Self {
        Self {
            clauses: vec![Clause {
                any_of: vec![condition],
            }],
        }
    }
}

#[derive(Debug, Default)]
pub struct PredicateBuilder {
    clauses: Vec<Clause>,
}

impl PredicateBuilder {
    /// Add a clause that must hold
    pub fn require(mut self, condition: Condition) -> Self {
        self.clauses.push(Clause {
            any_of: vec![condition],
        });
        self
    }

    /// Add a clause where at least one condition must hold.
    ///
    /// An empty set of conditions adds nothing.
    pub fn require_any(mut self, conditions: impl IntoIterator<Item = Condition>) -> Self {
        let any_of: Vec<Condition> = conditions.into_iter().collect();
        if !any_of.is_empty() {
            self.clauses.push(Clause { any_of });
        }
        self
    }

    /// Add a clause only when `condition` is `Some`
    pub fn require_opt(self, condition: Option<Condition>) -> Self {
        match condition {
            Some(condition) => self.require(condition),
            None => self,
        }
    }

    /// Finish the predicate; `None` when no clause was added
    pub fn build(self) -> Option<Predicate> {
        if self.clauses.is_empty() {
            None
        } else {
            Some(Predicate {
                clauses: self.clauses,
            })
        }
    }
}

/// Translate request filters into a predicate.
///
/// Returns `None` when every filter is absent or blank, in which case the
/// caller lists all courses instead.
pub fn build_filter_predicate(criteria: &SearchCriteria) -> Option<Predicate> {
    let text_clause = criteria.text().map(|term| {
        TextField::ALL
            .into_iter()
            .map(|field| Condition::Matches {
                field,
                text: term.to_string(),
            })
            .collect::<Vec<_>>()
    });

    // A course qualifies when its own age and price span overlaps the requested one.
    Predicate::builder()
        .require_any(text_clause.unwrap_or_default())
        .require_opt(criteria.min_age.map(|age| {
            Condition::range(RangeField::MaxAge, Comparison::AtLeast, RangeValue::Int(age))
        }))
        .require_opt(criteria.max_age.map(|age| {
            Condition::range(RangeField::MinAge, Comparison::AtMost, RangeValue::Int(age))
        }))
        .require_opt(criteria.min_price.map(|price| {
            Condition::range(RangeField::MinPrice, Comparison::AtLeast, RangeValue::Float(price))
        }))
        .require_opt(criteria.max_price.map(|price| {
            Condition::range(RangeField::MaxPrice, Comparison::AtMost, RangeValue::Float(price))
        }))
        .require_opt(criteria.category().map(|category| Condition::Keyword {
            field: KeywordField::Category,
            value: category.to_string(),
        }))
        .require_opt(criteria.course_type().map(|course_type| Condition::Keyword {
            field: KeywordField::CourseType,
            value: course_type.to_string(),
        }))
        .require_opt(criteria.min_session_date.map(|date| {
            Condition::range(
                RangeField::NextSessionDate,
                Comparison::AtLeast,
                RangeValue::Date(date),
            )
        }))
        .build()
}
