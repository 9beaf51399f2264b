// Catalog entries and the pure functions that operate on them: search
// filtering, pagination arithmetic, add-form validation, text import
// parsing and markup escaping. Nothing here touches the network.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Rows shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Shortest accepted code.
pub const MIN_CODE_LEN: usize = 5;

// ASCII digits only; `\d` would also accept other Unicode digits.
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// One nomenclature record as the API sends and receives it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub code: String,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Whether `entry` is visible under `query`. The code is matched as-is,
/// the name case-insensitively. An empty query matches everything.
pub fn matches(entry: &CatalogEntry, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    entry.code.contains(query) || entry.name.to_lowercase().contains(&query.to_lowercase())
}

/// Entries visible under `query`, in their original order.
pub fn filter_entries<'a>(entries: &'a [CatalogEntry], query: &str) -> Vec<&'a CatalogEntry> {
    entries.iter().filter(|e| matches(e, query)).collect()
}

/// The slice `[page * page_size, (page + 1) * page_size)` of `items`,
/// clipped to its length.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

pub fn has_next_page(len: usize, page: usize, page_size: usize) -> bool {
    (page + 1).saturating_mul(page_size) < len
}

pub fn has_prev_page(page: usize) -> bool {
    page > 0
}

/// Last valid page index for `len` items (0 when there are none).
pub fn last_page(len: usize, page_size: usize) -> usize {
    page_count(len, page_size).saturating_sub(1)
}

/// Check an add-form submission against the local catalog.
///
/// Checks run in order and stop at the first failure: both fields present
/// after trimming, code all-digit and at least [`MIN_CODE_LEN`] long, code
/// not already present in `existing`. Returns the trimmed entry.
///
/// Only entries already fetched are considered; codes held by the server
/// but not yet loaded are not detected here.
pub fn validate_new_entry(
    code: &str,
    name: &str,
    existing: &[CatalogEntry],
) -> Result<CatalogEntry, ValidationError> {
    let code = code.trim();
    let name = name.trim();

    if code.is_empty() || name.is_empty() {
        return Err(ValidationError::FieldsRequired);
    }
    if code.len() < MIN_CODE_LEN || !CODE_RE.is_match(code) {
        return Err(ValidationError::InvalidCodeFormat);
    }
    if existing.iter().any(|e| e.code == code) {
        return Err(ValidationError::DuplicateCode {
            code: code.to_string(),
        });
    }
    Ok(CatalogEntry::new(code, name))
}

/// Parse the contents of a `.txt` import file.
///
/// One `code name` pair per line, split on the first space; any further
/// spaces belong to the name. Blank lines are dropped. A line without a
/// space yields an entry with an empty name. Rows are not validated.
pub fn parse_import(text: &str) -> Vec<CatalogEntry> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once(' ') {
            Some((code, name)) => CatalogEntry::new(code, name),
            None => CatalogEntry::new(line, ""),
        })
        .collect()
}

/// Escape `&`, `<` and `>` so user text can be embedded in markup.
pub fn escape_for_display(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
