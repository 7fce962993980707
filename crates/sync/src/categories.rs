//! Category business rules above the raw store client.
//!
//! [`CategoryAggregator`] owns the settings screen's category list: the
//! display names, the edit-in-place state machine, and the two-step
//! removal flow. The screen is single-threaded, so methods take
//! `&mut self` and run as sequential awaits.

use std::sync::Arc;

use futures::future::join_all;

use noteleaf_core::category_rules::{
    contains_ignore_case, eq_ignore_case, split_category_input, validate_category_name,
    MAX_CATEGORIES_PER_OWNER,
};
use noteleaf_store::RecordStore;

use crate::error::SyncError;

// ---------------------------------------------------------------------------
// Configuration and state types
// ---------------------------------------------------------------------------

/// What renaming a category does to notes already tagged with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameCascade {
    /// Update category records only; notes keep the old label and fall
    /// out of filters referencing the new name.
    CategoriesOnly,
    /// Additionally rewrite the category field of the owner's matching
    /// notes, one partial update per note.
    RelabelNotes,
}

/// The edit-in-place machine: `Idle → Editing → { Saving → Idle | Idle }`.
///
/// At most one category is in `Editing` at a time; starting an edit on
/// another category discards the in-progress draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing { original: String, draft: String },
    Saving { original: String },
}

// ---------------------------------------------------------------------------
// CategoryAggregator
// ---------------------------------------------------------------------------

/// Enforces category business rules and mirrors the store's category
/// list for display.
pub struct CategoryAggregator {
    store: Arc<dyn RecordStore>,
    names: Vec<String>,
    edit: EditState,
    pending_removal: Option<String>,
}

impl CategoryAggregator {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            names: Vec::new(),
            edit: EditState::Idle,
            pending_removal: None,
        }
    }

    /// The display list: case-preserving names, sorted on load and on
    /// rename; freshly added names are appended.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn pending_removal(&self) -> Option<&str> {
        self.pending_removal.as_deref()
    }

    /// Replace the local list with the store's distinct names. Category
    /// reads are not fail-soft: errors propagate to the caller.
    pub async fn load(&mut self, owner: &str) -> Result<(), SyncError> {
        self.names = self.store.list_categories(owner).await?;
        Ok(())
    }

    // ---- add ----

    /// Add categories from raw comma-separated input.
    ///
    /// The whole batch is rejected (no partial add, no network call)
    /// when any piece is too short or when the current count plus the
    /// batch size would exceed [`MAX_CATEGORIES_PER_OWNER`]. Insertion
    /// of the not-already-present names is delegated to the store;
    /// accepted names are appended to the local list.
    pub async fn add(&mut self, owner: &str, raw_input: &str) -> Result<Vec<String>, SyncError> {
        let pieces = split_category_input(raw_input);
        if pieces.is_empty() {
            return Err(SyncError::validation("Enter at least one category name"));
        }
        let mut validated = Vec::with_capacity(pieces.len());
        for piece in &pieces {
            validated.push(validate_category_name(piece).map_err(SyncError::validation)?);
        }
        if self.names.len() + validated.len() > MAX_CATEGORIES_PER_OWNER {
            return Err(SyncError::validation(format!(
                "You cannot add more than {MAX_CATEGORIES_PER_OWNER} categories"
            )));
        }

        let accepted = self.store.add_categories(owner, &validated).await?;
        tracing::info!(
            owner_id = owner,
            requested = validated.len(),
            accepted = accepted.len(),
            "Categories added"
        );

        self.names.extend(accepted.iter().cloned());
        Ok(accepted)
    }

    // ---- rename ----

    /// Rename a category, applying the configured cascade behavior.
    ///
    /// Rejected when the trimmed candidate is too short or collides
    /// case-insensitively with a *different* existing category;
    /// renaming a category to another casing of itself is allowed.
    /// Returns the trimmed name now in effect.
    pub async fn rename(
        &mut self,
        owner: &str,
        old_name: &str,
        candidate: &str,
        cascade: RenameCascade,
    ) -> Result<String, SyncError> {
        let candidate = validate_category_name(candidate).map_err(SyncError::validation)?;

        let collides = self
            .names
            .iter()
            .any(|name| eq_ignore_case(name, &candidate) && !eq_ignore_case(name, old_name));
        if collides {
            return Err(SyncError::conflict("This category already exists"));
        }

        self.store
            .rename_category(owner, old_name, &candidate)
            .await?;

        if cascade == RenameCascade::RelabelNotes {
            self.relabel_notes(owner, old_name, &candidate).await?;
        }

        tracing::info!(owner_id = owner, old_name, new_name = %candidate, "Category renamed");

        for name in &mut self.names {
            if name == old_name {
                *name = candidate.clone();
            }
        }
        self.names.sort();

        Ok(candidate)
    }

    /// Rewrite the category field of every matching note.
    async fn relabel_notes(
        &self,
        owner: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), SyncError> {
        let notes = self.store.list_notes(owner).await?;
        let updates = notes
            .iter()
            .filter(|note| note.category.as_deref() == Some(old_name))
            .map(|note| self.store.update_note_category(&note.id, Some(new_name)));
        for result in join_all(updates).await {
            result?;
        }
        Ok(())
    }

    // ---- edit-in-place ----

    /// Enter `Editing` for `name`, seeding the draft with the current
    /// name. An edit already in progress on another category is
    /// implicitly cancelled and its draft discarded.
    pub fn begin_edit(&mut self, name: &str) -> Result<(), SyncError> {
        if !contains_ignore_case(&self.names, name) {
            return Err(SyncError::EditState(format!("Unknown category: {name}")));
        }
        self.edit = EditState::Editing {
            original: name.to_string(),
            draft: name.to_string(),
        };
        Ok(())
    }

    /// Replace the draft text of the in-progress edit.
    pub fn edit_draft(&mut self, text: &str) -> Result<(), SyncError> {
        match &mut self.edit {
            EditState::Editing { draft, .. } => {
                *draft = text.to_string();
                Ok(())
            }
            _ => Err(SyncError::EditState("No edit in progress".into())),
        }
    }

    /// Abandon the in-progress edit, discarding its draft.
    pub fn cancel_edit(&mut self) {
        self.edit = EditState::Idle;
    }

    /// Commit the in-progress edit through [`rename`](Self::rename).
    ///
    /// On success the machine returns to `Idle`; on failure it returns
    /// to `Editing` with the draft intact so the user can correct it.
    pub async fn save_edit(
        &mut self,
        owner: &str,
        cascade: RenameCascade,
    ) -> Result<String, SyncError> {
        let EditState::Editing { original, draft } = self.edit.clone() else {
            return Err(SyncError::EditState("No edit in progress".into()));
        };

        self.edit = EditState::Saving {
            original: original.clone(),
        };
        match self.rename(owner, &original, &draft, cascade).await {
            Ok(name) => {
                self.edit = EditState::Idle;
                Ok(name)
            }
            Err(err) => {
                self.edit = EditState::Editing { original, draft };
                Err(err)
            }
        }
    }

    // ---- two-step removal ----

    /// First step: mark `name` for removal, pending confirmation.
    pub fn request_removal(&mut self, name: &str) -> Result<(), SyncError> {
        if !self.names.iter().any(|existing| existing == name) {
            return Err(SyncError::EditState(format!("Unknown category: {name}")));
        }
        self.pending_removal = Some(name.to_string());
        Ok(())
    }

    /// Abandon a pending removal.
    pub fn cancel_removal(&mut self) {
        self.pending_removal = None;
    }

    /// Second step: execute the pending removal. Deletes the category
    /// records; notes tagged with the name keep their label.
    pub async fn confirm_removal(&mut self, owner: &str) -> Result<String, SyncError> {
        let Some(name) = self.pending_removal.clone() else {
            return Err(SyncError::EditState("No removal pending".into()));
        };

        self.store.remove_category(owner, &name).await?;
        tracing::info!(owner_id = owner, name = %name, "Category removed");

        self.pending_removal = None;
        self.names.retain(|existing| existing != &name);
        Ok(name)
    }
}
