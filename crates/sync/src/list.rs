//! The authoritative local view of one owner's notes.
//!
//! [`NoteListController`] owns the last-fetched sequence and everything
//! derived from it (the filtered view, per-category counts, display
//! rows). The screen calls [`refresh`](NoteListController::refresh) on
//! mount, on every focus event, on pull-to-refresh, and the controller
//! re-fetches after each successful mutation; there is no optimistic
//! local splice anywhere.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use noteleaf_core::note_rules::{is_aging, validate_note_text};
use noteleaf_core::types::Timestamp;
use noteleaf_store::{sort_newest_first, NewNote, Note, RecordStore};

use crate::error::SyncError;

// ---------------------------------------------------------------------------
// View-state types
// ---------------------------------------------------------------------------

/// The list screen's category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Show every note.
    All,
    /// Show only notes whose category equals the name exactly.
    Category(String),
}

/// How trustworthy the loaded sequence currently is.
///
/// A failed fetch does not blank the screen: the previous sequence is
/// retained and marked [`Stale`](Freshness::Stale), so the presentation
/// layer can distinguish "no notes" from "fetch failed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// Nothing has been fetched yet.
    Never,
    /// The sequence reflects the most recent fetch.
    Fresh,
    /// The last fetch failed; the sequence is the last known good one.
    Stale { message: String },
}

/// Result of a [`refresh`](NoteListController::refresh) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response was applied as the new authoritative sequence.
    Applied { count: usize },
    /// A newer fetch already completed; this response was discarded.
    Superseded,
    /// The fetch failed; the previous sequence was retained.
    Failed { message: String },
}

/// One row of the rendered list: the note plus display derivations.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteRow {
    pub note: Note,
    /// Highlighted when the note has been sitting around for more than
    /// the aging threshold.
    pub aging: bool,
}

struct ListState {
    notes: Vec<Note>,
    filter: CategoryFilter,
    freshness: Freshness,
    /// Sequence token of the newest fetch whose outcome was applied.
    applied_seq: u64,
}

// ---------------------------------------------------------------------------
// NoteListController
// ---------------------------------------------------------------------------

/// Owns the in-memory view of a user's notes and exposes filtering and
/// aggregation over it.
///
/// Methods take `&self`; state lives behind a mutex so the controller
/// can be shared with spawned refreshes. Overlapping fetches are
/// serialized by a monotonically increasing sequence token: a response
/// is applied only if no newer fetch has completed, so the newest
/// *request* wins rather than the last response to arrive.
pub struct NoteListController {
    store: Arc<dyn RecordStore>,
    state: Mutex<ListState>,
    fetch_seq: AtomicU64,
}

impl NoteListController {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            state: Mutex::new(ListState {
                notes: Vec::new(),
                filter: CategoryFilter::All,
                freshness: Freshness::Never,
                applied_seq: 0,
            }),
            fetch_seq: AtomicU64::new(0),
        }
    }

    // ---- fetching ----

    /// Fetch the owner's notes and replace the local sequence.
    ///
    /// Never returns `Err`: fetch failures are logged, reported as
    /// [`RefreshOutcome::Failed`], and leave the previous sequence in
    /// place marked stale. Ordering is recomputed client-side (newest
    /// first, id tie-break) rather than trusted from the backend.
    pub async fn refresh(&self, owner: &str) -> RefreshOutcome {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        match self.store.list_notes(owner).await {
            Ok(mut notes) => {
                sort_newest_first(&mut notes);

                let mut state = self.state.lock().expect("list state mutex poisoned");
                if seq <= state.applied_seq {
                    return RefreshOutcome::Superseded;
                }
                state.applied_seq = seq;
                state.notes = notes;
                state.freshness = Freshness::Fresh;
                RefreshOutcome::Applied {
                    count: state.notes.len(),
                }
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(
                    owner_id = owner,
                    error = %message,
                    "Note fetch failed; keeping last known sequence"
                );

                let mut state = self.state.lock().expect("list state mutex poisoned");
                if seq > state.applied_seq {
                    state.applied_seq = seq;
                    state.freshness = Freshness::Stale {
                        message: message.clone(),
                    };
                }
                RefreshOutcome::Failed { message }
            }
        }
    }

    // ---- mutations ----

    /// Create a note and re-fetch the sequence.
    ///
    /// Local validation first: trimmed text within bounds and a chosen
    /// category; neither triggers a network call when it fails.
    pub async fn create(
        &self,
        owner: &str,
        text: &str,
        category: Option<&str>,
    ) -> Result<(), SyncError> {
        let text = validate_note_text(text).map_err(SyncError::validation)?;
        let Some(category) = category else {
            return Err(SyncError::validation("Choose a category for the note"));
        };

        self.store
            .create_note(NewNote::new(owner, text, Some(category.to_string())))
            .await?;
        tracing::info!(owner_id = owner, category, "Note created");

        self.refresh(owner).await;
        Ok(())
    }

    /// Delete a note and re-fetch the sequence.
    ///
    /// Deletion is only permitted for completed notes; the controller
    /// re-checks against its loaded sequence rather than trusting the
    /// screen to have disabled the affordance. Ids the controller has
    /// never seen pass through to the store (the detail screen deletes
    /// directly and the list only learns about it on the next focus).
    pub async fn remove(&self, owner: &str, note_id: &str) -> Result<(), SyncError> {
        {
            let state = self.state.lock().expect("list state mutex poisoned");
            if let Some(note) = state.notes.iter().find(|note| note.id == note_id) {
                if !note.completed {
                    return Err(SyncError::validation(
                        "Only completed notes can be deleted",
                    ));
                }
            }
        }

        self.store.delete_note(note_id).await?;
        tracing::info!(owner_id = owner, note_id, "Note deleted");

        self.refresh(owner).await;
        Ok(())
    }

    // ---- derived views ----

    /// Change the category filter. Recomputes nothing eagerly: the
    /// filtered view is derived from the loaded sequence on read, with
    /// no network call.
    pub fn set_filter(&self, filter: CategoryFilter) {
        let mut state = self.state.lock().expect("list state mutex poisoned");
        state.filter = filter;
    }

    pub fn filter(&self) -> CategoryFilter {
        self.state
            .lock()
            .expect("list state mutex poisoned")
            .filter
            .clone()
    }

    /// The full loaded sequence, newest first.
    pub fn notes(&self) -> Vec<Note> {
        self.state
            .lock()
            .expect("list state mutex poisoned")
            .notes
            .clone()
    }

    /// The rows the list screen renders: the loaded sequence narrowed
    /// by the current filter, each with its display derivations.
    pub fn visible_rows(&self) -> Vec<NoteRow> {
        self.visible_rows_at(Utc::now())
    }

    /// [`visible_rows`](Self::visible_rows) against an explicit clock.
    pub fn visible_rows_at(&self, now: Timestamp) -> Vec<NoteRow> {
        let state = self.state.lock().expect("list state mutex poisoned");
        state
            .notes
            .iter()
            .filter(|note| matches_filter(note, &state.filter))
            .map(|note| NoteRow {
                note: note.clone(),
                aging: is_aging(note.created_at, now),
            })
            .collect()
    }

    /// Count notes matching `filter` in the loaded sequence. `All` is
    /// the total; no network call either way.
    pub fn count_for(&self, filter: &CategoryFilter) -> usize {
        let state = self.state.lock().expect("list state mutex poisoned");
        state
            .notes
            .iter()
            .filter(|note| matches_filter(note, filter))
            .count()
    }

    pub fn freshness(&self) -> Freshness {
        self.state
            .lock()
            .expect("list state mutex poisoned")
            .freshness
            .clone()
    }
}

fn matches_filter(note: &Note, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Category(name) => note.category.as_deref() == Some(name.as_str()),
    }
}
