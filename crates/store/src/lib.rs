//! Noteleaf record store client.
//!
//! Everything that talks to the hosted backend lives here:
//!
//! - [`RecordStore`] — the seam the rest of the application depends on:
//!   owner-scoped CRUD over the `notes` and `categories` collections.
//! - [`RestStore`] — the hosted document-store implementation over HTTP.
//! - [`MemoryStore`] — a complete in-process implementation with the
//!   same semantics, used for local/offline operation and by the test
//!   suites.
//! - [`AuthProvider`] / [`RestAuth`] / [`MemoryAuth`] — the narrow slice
//!   of the auth service this client needs (re-authenticate and change
//!   password).
//! - [`StoreConfig`] — environment-driven client configuration.

pub mod auth;
pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod rest;
pub mod store;

pub use auth::AuthProvider;
pub use config::StoreConfig;
pub use error::StoreError;
pub use memory::{MemoryAuth, MemoryStore};
pub use models::{sort_newest_first, CategoryRecord, NewNote, Note};
pub use rest::{RestAuth, RestStore};
pub use store::RecordStore;
