//! The auth provider seam.
//!
//! Sign-in, sign-up, and session persistence belong to the hosted auth
//! service and its SDK; this client only needs the password-change
//! primitive, reached through [`AuthProvider`].

use async_trait::async_trait;

use crate::error::StoreError;

/// The slice of the auth service the application core depends on.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Re-authenticate the current session with `current_password`,
    /// then update to `new_password`.
    ///
    /// Fails with a translated [`StoreError::Auth`] when
    /// re-authentication is rejected; nothing is mutated in that case.
    async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), StoreError>;
}
