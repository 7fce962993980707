//! Note text validation and display-age rules.

use chrono::Duration;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of note text in characters.
pub const MAX_NOTE_TEXT_LENGTH: usize = 200;

/// Minimum length of trimmed note text.
pub const MIN_NOTE_TEXT_LENGTH: usize = 2;

/// Notes older than this many days are highlighted as aging in the list.
pub const AGING_THRESHOLD_DAYS: i64 = 3;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate note text: trims surrounding whitespace, then checks the
/// length bounds. Returns the trimmed text on success.
pub fn validate_note_text(text: &str) -> Result<String, String> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_NOTE_TEXT_LENGTH {
        return Err(format!(
            "Note text must be at least {MIN_NOTE_TEXT_LENGTH} characters long"
        ));
    }
    if trimmed.chars().count() > MAX_NOTE_TEXT_LENGTH {
        return Err(format!(
            "Note text exceeds maximum length of {MAX_NOTE_TEXT_LENGTH} characters"
        ));
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Display age
// ---------------------------------------------------------------------------

/// Whether a note counts as aging: created strictly more than
/// [`AGING_THRESHOLD_DAYS`] before `now`.
pub fn is_aging(created_at: Timestamp, now: Timestamp) -> bool {
    now.signed_duration_since(created_at) > Duration::days(AGING_THRESHOLD_DAYS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
