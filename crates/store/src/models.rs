//! Record models for the `notes` and `categories` collections.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use noteleaf_core::types::{OwnerId, RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// A record from the `notes` collection.
///
/// `id` and `owner_id` are immutable once created; `text`, `completed`,
/// and `category` are mutable via partial updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub text: String,
    pub completed: bool,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// DTO for creating a note; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub owner_id: OwnerId,
    pub text: String,
    pub completed: bool,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl NewNote {
    /// Build a fresh note for `owner_id`: not completed, created now.
    pub fn new(owner_id: impl Into<OwnerId>, text: impl Into<String>, category: Option<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
            category,
        }
    }
}

/// Sort notes newest-created-first. Equal timestamps tie-break on the
/// identifier ascending so the order is deterministic.
pub fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// A record from the `categories` collection.
///
/// One record per (owner, name) insertion. The backend enforces no
/// uniqueness constraint, so duplicate records for the same name are
/// representable; reads deduplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: RecordId,
    pub owner_id: OwnerId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
