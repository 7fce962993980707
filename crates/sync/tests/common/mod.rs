//! Shared helpers for the sync integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Notify;

use noteleaf_core::types::RecordId;
use noteleaf_store::{CategoryRecord, MemoryStore, NewNote, Note, RecordStore, StoreError};

pub const OWNER: &str = "owner-1";

/// Build a `NewNote` with a deterministic timestamp `secs` seconds past
/// a fixed base instant, so ordering assertions are stable.
pub fn note_at(owner: &str, text: &str, category: Option<&str>, secs: u32) -> NewNote {
    NewNote {
        owner_id: owner.to_string(),
        text: text.to_string(),
        completed: false,
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, secs).unwrap(),
        category: category.map(str::to_string),
    }
}

/// A released-on-demand pause injected into one `list_notes` call.
pub struct Gate {
    /// Signalled once the gated read has captured its result and is
    /// waiting to return it.
    pub entered: Arc<Notify>,
    /// Signalled by the test to let the gated read return.
    pub release: Arc<Notify>,
}

/// A [`RecordStore`] wrapper for failure and interleaving scenarios:
/// delegates everything to an inner [`MemoryStore`], but can fail note
/// reads on demand or hold one note read open until released.
pub struct GatedStore {
    pub inner: MemoryStore,
    fail_note_reads: AtomicBool,
    gate: Mutex<Option<(Arc<Notify>, Arc<Notify>)>>,
}

impl GatedStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_note_reads: AtomicBool::new(false),
            gate: Mutex::new(None),
        }
    }

    /// Make every subsequent `list_notes` call fail (or stop failing).
    pub fn fail_note_reads(&self, fail: bool) {
        self.fail_note_reads.store(fail, Ordering::SeqCst);
    }

    /// Arm a gate for the next `list_notes` call: it will capture its
    /// result, signal `entered`, and only return once `release` is
    /// notified.
    pub fn gate_next_note_read(&self) -> Gate {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some((entered.clone(), release.clone()));
        Gate { entered, release }
    }
}

#[async_trait]
impl RecordStore for GatedStore {
    async fn list_notes(&self, owner: &str) -> Result<Vec<Note>, StoreError> {
        if self.fail_note_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 503,
                body: "store unavailable".to_string(),
            });
        }

        let result = self.inner.list_notes(owner).await;
        let armed = self.gate.lock().unwrap().take();
        if let Some((entered, release)) = armed {
            entered.notify_one();
            release.notified().await;
        }
        result
    }

    async fn create_note(&self, note: NewNote) -> Result<RecordId, StoreError> {
        self.inner.create_note(note).await
    }

    async fn update_note_text(&self, id: &str, text: &str) -> Result<(), StoreError> {
        self.inner.update_note_text(id, text).await
    }

    async fn update_note_category(
        &self,
        id: &str,
        category: Option<&str>,
    ) -> Result<(), StoreError> {
        self.inner.update_note_category(id, category).await
    }

    async fn set_note_completion(&self, id: &str, completed: bool) -> Result<(), StoreError> {
        self.inner.set_note_completion(id, completed).await
    }

    async fn delete_note(&self, id: &str) -> Result<(), StoreError> {
        self.inner.delete_note(id).await
    }

    async fn list_category_records(
        &self,
        owner: &str,
    ) -> Result<Vec<CategoryRecord>, StoreError> {
        self.inner.list_category_records(owner).await
    }

    async fn insert_category(&self, owner: &str, name: &str) -> Result<(), StoreError> {
        self.inner.insert_category(owner, name).await
    }

    async fn rename_category(
        &self,
        owner: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), StoreError> {
        self.inner.rename_category(owner, old_name, new_name).await
    }

    async fn remove_category(&self, owner: &str, name: &str) -> Result<(), StoreError> {
        self.inner.remove_category(owner, name).await
    }
}
