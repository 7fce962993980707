//! Category naming, batching, and uniqueness rules.
//!
//! The canonical comparison rule for category names is case-insensitive
//! uniqueness with case-preserving display: `"Work"` and `"work"` are
//! the same category, and whichever casing the user entered first is
//! what gets shown.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of categories a single owner may have.
pub const MAX_CATEGORIES_PER_OWNER: usize = 7;

/// Minimum length of a trimmed category name.
pub const MIN_CATEGORY_NAME_LENGTH: usize = 2;

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

/// Split raw category input on commas, trimming each piece and dropping
/// empties. `"Work, Personal,,  Shopping "` yields
/// `["Work", "Personal", "Shopping"]`.
pub fn split_category_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate a single category name: trims, then checks the minimum
/// length. Returns the trimmed name on success.
pub fn validate_category_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_CATEGORY_NAME_LENGTH {
        return Err(format!(
            "Category must be at least {MIN_CATEGORY_NAME_LENGTH} characters long"
        ));
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Case-insensitive comparison helpers
// ---------------------------------------------------------------------------

/// Case-insensitive name equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Whether `names` already contains `candidate` under case-insensitive
/// comparison.
pub fn contains_ignore_case(names: &[String], candidate: &str) -> bool {
    names.iter().any(|name| eq_ignore_case(name, candidate))
}

/// Deduplicate case-insensitively, preserving order and the casing of
/// the first occurrence.
pub fn dedupe_preserving_first(names: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(names.len());
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let key = name.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            out.push(name);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
