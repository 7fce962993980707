//! Noteleaf view-state reconciliation.
//!
//! The presentation layer drives everything here in response to user
//! gestures and screen lifecycle events:
//!
//! - [`NoteListController`] — the authoritative local view of one
//!   owner's notes: fetch-on-focus, re-fetch after mutation,
//!   category filtering, and per-category counts.
//! - [`CategoryAggregator`] — category business rules above the raw
//!   store client: batched adds, the edit-in-place state machine,
//!   rename with an explicit cascade choice, and two-step removal.
//! - [`AccountManager`] — the password-change flow.

pub mod account;
pub mod categories;
pub mod error;
pub mod list;

pub use account::AccountManager;
pub use categories::{CategoryAggregator, EditState, RenameCascade};
pub use error::SyncError;
pub use list::{CategoryFilter, Freshness, NoteListController, NoteRow, RefreshOutcome};
