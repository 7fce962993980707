//! Errors from the record store and auth client layers.

use noteleaf_core::auth_codes::auth_error_message;
use noteleaf_core::types::RecordId;

/// Errors surfaced by [`RecordStore`](crate::RecordStore) and
/// [`AuthProvider`](crate::AuthProvider) implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Store API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The auth service rejected the operation. `message` is the
    /// user-facing translation of the backend `code`.
    #[error("{message}")]
    Auth { code: String, message: String },

    /// The response body did not match the expected shape.
    #[error("Malformed store response: {0}")]
    Decode(String),

    /// Partial update or delete of a record that does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: RecordId },
}

impl StoreError {
    /// Build an [`StoreError::Auth`] from a backend auth error code,
    /// translating it to the user-facing message.
    pub fn auth(code: impl Into<String>) -> Self {
        let code = code.into();
        let message = auth_error_message(&code).to_string();
        Self::Auth { code, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteleaf_core::auth_codes::{CODE_INVALID_CREDENTIAL, UNKNOWN_AUTH_ERROR};

    #[test]
    fn auth_error_carries_translated_message() {
        let err = StoreError::auth(CODE_INVALID_CREDENTIAL);
        assert!(err.to_string().contains("The password is invalid"));
    }

    #[test]
    fn unknown_auth_code_uses_fallback_message() {
        let err = StoreError::auth("auth/server-on-fire");
        assert_eq!(err.to_string(), UNKNOWN_AUTH_ERROR);
    }
}
