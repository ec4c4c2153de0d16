use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course as stored in the catalog index.
///
/// The JSON shape matches the seed file and the API responses: camelCase keys,
/// `type` for the course type and RFC 3339 timestamps for `nextSessionDate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub course_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_session_date: Option<DateTime<Utc>>,
    /// Autocomplete source, always a copy of `title` once indexed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest: Option<String>,
}

impl CourseRecord {
    /// Create a record with only an id and a title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Copy the title into the autocomplete field
    pub fn set_suggest_from_title(&mut self) {
        if !self.title.is_empty() {
            self.suggest = Some(self.title.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_seed_shape() {
        let json = r#"{
            "id": "42",
            "title": "Robotics Lab",
            "description": "Build and program robots",
            "category": "Science",
            "type": "CLUB",
            "gradeRange": "6th-8th",
            "minAge": 11,
            "maxAge": 14,
            "minPrice": 120.0,
            "maxPrice": 180.5,
            "language": "English",
            "nextSessionDate": "2025-07-01T09:00:00Z"
        }"#;

        let record: CourseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.course_type.as_deref(), Some("CLUB"));
        assert_eq!(record.grade_range.as_deref(), Some("6th-8th"));
        assert_eq!(record.max_age, Some(14));
        assert_eq!(record.max_price, Some(180.5));
        assert_eq!(
            record.next_session_date.unwrap().to_rfc3339(),
            "2025-07-01T09:00:00+00:00"
        );
        assert!(record.suggest.is_none());
    }

    #[test]
    fn test_missing_optional_fields_are_omitted() {
        let record = CourseRecord::new("1", "Chess Club");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["id"], "1");
        assert_eq!(value["title"], "Chess Club");
        assert!(value.get("minAge").is_none());
        assert!(value.get("type").is_none());
    }

    #[test]
    fn test_suggest_copies_title() {
        let mut record = CourseRecord::new("1", "Chess Club");
        record.set_suggest_from_title();
        assert_eq!(record.suggest.as_deref(), Some("Chess Club"));

        let mut untitled = CourseRecord::new("2", "");
        untitled.set_suggest_from_title();
        assert!(untitled.suggest.is_none());
    }
}
