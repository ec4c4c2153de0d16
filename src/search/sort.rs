//! Sort keywords and page windows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::search::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Record fields the index can order by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    MinPrice,
    MaxPrice,
    NextSessionDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// One level of an ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: Direction,
}

impl SortKey {
    const fn new(field: SortField, direction: Direction) -> Self {
        Self { field, direction }
    }
}

const UPCOMING_KEYS: &[SortKey] = &[SortKey::new(SortField::NextSessionDate, Direction::Ascending)];
const PRICE_ASC_KEYS: &[SortKey] = &[
    SortKey::new(SortField::MinPrice, Direction::Ascending),
    SortKey::new(SortField::NextSessionDate, Direction::Ascending),
];
const PRICE_DESC_KEYS: &[SortKey] = &[
    SortKey::new(SortField::MaxPrice, Direction::Descending),
    SortKey::new(SortField::NextSessionDate, Direction::Ascending),
];
const DATE_DESC_KEYS: &[SortKey] = &[SortKey::new(SortField::NextSessionDate, Direction::Descending)];

/// Result ordering selected by the `sort` request parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortSpec {
    #[default]
    Upcoming,
    PriceAsc,
    PriceDesc,
    DateAsc,
    DateDesc,
}

impl SortSpec {
    /// Resolve a sort keyword, case-insensitively.
    ///
    /// Missing, blank and unknown keywords all resolve to [`SortSpec::Upcoming`].
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        let Some(keyword) = keyword else {
            return Self::Upcoming;
        };

        match keyword.trim().to_lowercase().as_str() {
            "priceasc" => Self::PriceAsc,
            "pricedesc" => Self::PriceDesc,
            "dateasc" => Self::DateAsc,
            "datedesc" => Self::DateDesc,
            _ => Self::Upcoming,
        }
    }

    /// Ordering keys, primary first
    pub fn keys(&self) -> &'static [SortKey] {
        match self {
            Self::Upcoming | Self::DateAsc => UPCOMING_KEYS,
            Self::PriceAsc => PRICE_ASC_KEYS,
            Self::PriceDesc => PRICE_DESC_KEYS,
            Self::DateDesc => DATE_DESC_KEYS,
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Self::Upcoming => "upcoming",
            Self::PriceAsc => "priceasc",
            Self::PriceDesc => "pricedesc",
            Self::DateAsc => "dateasc",
            Self::DateDesc => "datedesc",
        };
        f.write_str(keyword)
    }
}

/// A validated zero-based page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    size: usize,
}

impl PageRequest {
    /// Normalize raw paging input.
    ///
    /// Negative or missing pages become 0. Sizes outside `1..=MAX_PAGE_SIZE`
    /// become [`DEFAULT_PAGE_SIZE`].
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        let page = page
            .filter(|p| *p >= 0)
            .and_then(|p| usize::try_from(p).ok())
            .unwrap_or(0);

        let size = size
            .and_then(|s| usize::try_from(s).ok())
            .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self { page, size }
    }

    /// First page with the given (already valid) size
    pub fn first(size: usize) -> Self {
        Self { page: 0, size }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}
