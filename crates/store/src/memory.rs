//! In-process implementations of the store and auth seams.
//!
//! [`MemoryStore`] keeps both collections in `Mutex<HashMap>`s with
//! store-assigned UUID keys and mirrors the hosted semantics, including
//! the absence of a uniqueness constraint on category records. It backs
//! the local/offline mode and the integration test suites.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use noteleaf_core::auth_codes::{CODE_INVALID_CREDENTIAL, CODE_WEAK_PASSWORD};
use noteleaf_core::types::RecordId;

use crate::auth::AuthProvider;
use crate::error::StoreError;
use crate::models::{CategoryRecord, NewNote, Note};
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-memory document store over the `notes` and `categories`
/// collections.
#[derive(Default)]
pub struct MemoryStore {
    notes: Mutex<HashMap<RecordId, Note>>,
    categories: Mutex<HashMap<RecordId, CategoryRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a note directly, bypassing the trait. Returns the assigned
    /// id. Intended for test setup.
    pub fn seed_note(&self, note: NewNote) -> RecordId {
        let id = Uuid::new_v4().to_string();
        let record = Note {
            id: id.clone(),
            owner_id: note.owner_id,
            text: note.text,
            completed: note.completed,
            created_at: note.created_at,
            category: note.category,
        };
        self.notes
            .lock()
            .expect("notes mutex poisoned")
            .insert(id.clone(), record);
        id
    }

    /// Number of category records for `owner` with exactly `name`,
    /// duplicates included. Intended for assertions on the
    /// no-uniqueness-constraint behavior.
    pub fn category_record_count(&self, owner: &str, name: &str) -> usize {
        self.categories
            .lock()
            .expect("categories mutex poisoned")
            .values()
            .filter(|record| record.owner_id == owner && record.name == name)
            .count()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_notes(&self, owner: &str) -> Result<Vec<Note>, StoreError> {
        let notes = self.notes.lock().expect("notes mutex poisoned");
        Ok(notes
            .values()
            .filter(|note| note.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn create_note(&self, note: NewNote) -> Result<RecordId, StoreError> {
        Ok(self.seed_note(note))
    }

    async fn update_note_text(&self, id: &str, text: &str) -> Result<(), StoreError> {
        let mut notes = self.notes.lock().expect("notes mutex poisoned");
        let note = notes.get_mut(id).ok_or_else(|| StoreError::NotFound {
            entity: "Note",
            id: id.to_string(),
        })?;
        note.text = text.to_string();
        Ok(())
    }

    async fn update_note_category(
        &self,
        id: &str,
        category: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut notes = self.notes.lock().expect("notes mutex poisoned");
        let note = notes.get_mut(id).ok_or_else(|| StoreError::NotFound {
            entity: "Note",
            id: id.to_string(),
        })?;
        note.category = category.map(str::to_string);
        Ok(())
    }

    async fn set_note_completion(&self, id: &str, completed: bool) -> Result<(), StoreError> {
        let mut notes = self.notes.lock().expect("notes mutex poisoned");
        let note = notes.get_mut(id).ok_or_else(|| StoreError::NotFound {
            entity: "Note",
            id: id.to_string(),
        })?;
        note.completed = completed;
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<(), StoreError> {
        let mut notes = self.notes.lock().expect("notes mutex poisoned");
        notes.remove(id).ok_or_else(|| StoreError::NotFound {
            entity: "Note",
            id: id.to_string(),
        })?;
        Ok(())
    }

    async fn list_category_records(
        &self,
        owner: &str,
    ) -> Result<Vec<CategoryRecord>, StoreError> {
        let categories = self.categories.lock().expect("categories mutex poisoned");
        Ok(categories
            .values()
            .filter(|record| record.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn insert_category(&self, owner: &str, name: &str) -> Result<(), StoreError> {
        let id = Uuid::new_v4().to_string();
        let record = CategoryRecord {
            id: id.clone(),
            owner_id: owner.to_string(),
            name: name.to_string(),
        };
        self.categories
            .lock()
            .expect("categories mutex poisoned")
            .insert(id, record);
        Ok(())
    }

    async fn rename_category(
        &self,
        owner: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), StoreError> {
        let mut categories = self.categories.lock().expect("categories mutex poisoned");
        for record in categories.values_mut() {
            if record.owner_id == owner && record.name == old_name {
                record.name = new_name.to_string();
            }
        }
        Ok(())
    }

    async fn remove_category(&self, owner: &str, name: &str) -> Result<(), StoreError> {
        let mut categories = self.categories.lock().expect("categories mutex poisoned");
        categories.retain(|_, record| !(record.owner_id == owner && record.name == name));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryAuth
// ---------------------------------------------------------------------------

/// Passwords shorter than this are rejected as weak, matching the
/// hosted auth service's policy.
const MIN_PASSWORD_LENGTH: usize = 6;

/// In-process auth provider holding a single account's password.
pub struct MemoryAuth {
    password: Mutex<String>,
}

impl MemoryAuth {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: Mutex::new(password.into()),
        }
    }

    pub fn current_password(&self) -> String {
        self.password.lock().expect("password mutex poisoned").clone()
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), StoreError> {
        let mut password = self.password.lock().expect("password mutex poisoned");
        if *password != current_password {
            return Err(StoreError::auth(CODE_INVALID_CREDENTIAL));
        }
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(StoreError::auth(CODE_WEAK_PASSWORD));
        }
        *password = new_password.to_string();
        Ok(())
    }
}
