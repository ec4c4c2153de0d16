//! Bulk loading of the course catalog from a JSON seed file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::catalog::CourseRecord;
use crate::catalog::index::TantivyCourseIndex;

/// Read a JSON array of courses and derive each autocomplete field
pub fn read_seed_file(path: &Path) -> Result<Vec<CourseRecord>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

    let mut records: Vec<CourseRecord> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse seed file: {}", path.display()))?;

    for record in &mut records {
        if record.id.trim().is_empty() {
            bail!("Seed file {} contains a course without an id", path.display());
        }
        record.set_suggest_from_title();
    }

    Ok(records)
}

/// Replace the whole index with the contents of `seed_file`.
///
/// Returns the number of courses indexed. The index is left untouched when the
/// seed file cannot be read or parsed.
pub fn reindex_from_seed(index: &TantivyCourseIndex, seed_file: &Path) -> Result<usize> {
    let records = read_seed_file(seed_file)?;
    tracing::info!(
        "Loading {} courses from {}",
        records.len(),
        seed_file.display()
    );

    index
        .replace_all(&records)
        .with_context(|| format!("Failed to index seed file: {}", seed_file.display()))
}
