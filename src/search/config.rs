//! # Search Configuration Module
//!
//! Tuning constants for paging, the fuzzy cascade and suggestions.

/// Page size used when the requested size is missing or out of range
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size a caller may request
pub const MAX_PAGE_SIZE: usize = 100;

/// Minimum term length (in characters) for the wildcard and character-overlap stages
pub const MIN_FUZZY_TERM_LENGTH: usize = 3;

/// Number of candidates fetched by the character-overlap stage
pub const CHARACTER_MATCH_CANDIDATES: usize = 100;

/// Fraction of aligned characters that must agree for a character-overlap match
pub const CHARACTER_MATCH_THRESHOLD: f64 = 0.6;

/// Titles whose length differs from the term by more than this are never character matches
pub const MAX_LENGTH_DIFFERENCE: usize = 2;

/// Default number of suggestions
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Maximum number of suggestions
pub const MAX_SUGGESTION_LIMIT: usize = 100;
