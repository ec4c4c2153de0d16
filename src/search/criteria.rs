use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filters supplied with a single search request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub term: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category: Option<String>,
    pub course_type: Option<String>,
    pub min_session_date: Option<DateTime<Utc>>,
}

impl SearchCriteria {
    /// Criteria with only a free-text term
    pub fn with_term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Default::default()
        }
    }

    /// The free-text term, if present and not blank
    pub fn text(&self) -> Option<&str> {
        non_blank(self.term.as_deref())
    }

    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    pub fn course_type(&self) -> Option<&str> {
        non_blank(self.course_type.as_deref())
    }

    /// True when any filter other than the free-text term narrows the search.
    ///
    /// Blank category and type strings do not count.
    pub fn has_non_text_filters(&self) -> bool {
        self.min_age.is_some()
            || self.max_age.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.category().is_some()
            || self.course_type().is_some()
            || self.min_session_date.is_some()
    }

    /// True when no field is set at all (blank strings included)
    pub fn is_empty(&self) -> bool {
        self.text().is_none() && !self.has_non_text_filters()
    }

    /// A copy without the free-text term
    pub fn without_term(&self) -> Self {
        Self {
            term: None,
            ..self.clone()
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
