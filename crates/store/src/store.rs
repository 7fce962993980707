//! The record store seam.
//!
//! [`RecordStore`] is the narrow interface between the application core
//! and the hosted document database: owner-scoped reads, inserts,
//! partial updates, and deletes over the `notes` and `categories`
//! collections. The hosted implementation is
//! [`RestStore`](crate::RestStore); [`MemoryStore`](crate::MemoryStore)
//! provides the same semantics in-process.

use async_trait::async_trait;

use noteleaf_core::category_rules::{contains_ignore_case, dedupe_preserving_first};
use noteleaf_core::types::RecordId;

use crate::error::StoreError;
use crate::models::{CategoryRecord, NewNote, Note};

/// Owner-scoped CRUD over the `notes` and `categories` collections.
///
/// Consistency contract: the backend is eventually consistent between a
/// write and a subsequent read, and list order is unspecified (callers
/// re-sort). All reads are filtered by owner identity; owner identity is
/// always an explicit parameter.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // ---- notes ----

    /// List every note record belonging to `owner`, in unspecified
    /// order. Errors propagate; presentation-level fail-soft policy is
    /// applied by the caller, not here.
    async fn list_notes(&self, owner: &str) -> Result<Vec<Note>, StoreError>;

    /// Insert a new note record; the store assigns and returns the id.
    async fn create_note(&self, note: NewNote) -> Result<RecordId, StoreError>;

    /// Partial update of a note's text body.
    async fn update_note_text(&self, id: &str, text: &str) -> Result<(), StoreError>;

    /// Partial update of a note's category label. `None` clears it.
    async fn update_note_category(
        &self,
        id: &str,
        category: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Partial update of a note's completion flag.
    async fn set_note_completion(&self, id: &str, completed: bool) -> Result<(), StoreError>;

    /// Delete a note record by id.
    async fn delete_note(&self, id: &str) -> Result<(), StoreError>;

    // ---- categories ----

    /// List every category record belonging to `owner`, duplicates
    /// included, in unspecified order.
    async fn list_category_records(&self, owner: &str)
        -> Result<Vec<CategoryRecord>, StoreError>;

    /// Distinct category names for `owner`: deduplicated
    /// case-insensitively (first occurrence's casing wins) and sorted
    /// lexicographically ascending. Errors propagate to the caller.
    async fn list_categories(&self, owner: &str) -> Result<Vec<String>, StoreError> {
        let records = self.list_category_records(owner).await?;
        let names = records.into_iter().map(|record| record.name).collect();
        let mut names = dedupe_preserving_first(names);
        names.sort();
        Ok(names)
    }

    /// Insert one category record per name not already present for
    /// `owner` under case-insensitive comparison. Returns the names
    /// actually inserted.
    ///
    /// The existence check and the inserts are not transactional: two
    /// overlapping calls can both pass the check and insert the same
    /// name twice. The backend enforces no uniqueness constraint, so
    /// the duplicate records stand until a read deduplicates them.
    async fn add_categories(
        &self,
        owner: &str,
        names: &[String],
    ) -> Result<Vec<String>, StoreError> {
        let existing = self.list_categories(owner).await?;
        let mut accepted: Vec<String> = Vec::new();
        for name in names {
            if contains_ignore_case(&existing, name) || contains_ignore_case(&accepted, name) {
                continue;
            }
            self.insert_category(owner, name).await?;
            accepted.push(name.clone());
        }
        Ok(accepted)
    }

    /// Insert a single category record for `owner`. Implementations
    /// provide this primitive; callers should go through
    /// [`add_categories`](Self::add_categories).
    async fn insert_category(&self, owner: &str, name: &str) -> Result<(), StoreError>;

    /// Update every category record matching (`owner`, `old_name`) to
    /// carry `new_name`. The match is exact on the stored value. Note
    /// records are not touched.
    async fn rename_category(
        &self,
        owner: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), StoreError>;

    /// Delete every category record matching (`owner`, `name`). Notes
    /// tagged with the name keep their label.
    async fn remove_category(&self, owner: &str, name: &str) -> Result<(), StoreError>;
}
