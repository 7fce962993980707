use noteleaf_core::CoreError;
use noteleaf_store::StoreError;

/// Errors surfaced to the presentation layer.
///
/// Wraps [`CoreError`] for local validation failures and [`StoreError`]
/// for remote ones, and adds the edit-flow variant. Every failure is
/// scoped to a single user action; nothing here is fatal.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A domain-level error from `noteleaf-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A remote store or auth failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An operation that does not fit the current edit/removal state.
    #[error("Invalid edit state: {0}")]
    EditState(String),
}

impl SyncError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into()).into()
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        CoreError::Conflict(message.into()).into()
    }
}
