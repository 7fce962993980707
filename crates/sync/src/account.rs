//! The password-change flow.

use std::sync::Arc;

use noteleaf_store::AuthProvider;

use crate::error::SyncError;

/// Drives the settings screen's change-password form.
pub struct AccountManager {
    auth: Arc<dyn AuthProvider>,
}

impl AccountManager {
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self { auth }
    }

    /// Change the account password.
    ///
    /// Local validation first: empty fields and a confirmation
    /// mismatch are rejected without a network call. The provider
    /// re-authenticates with the current password before updating, so
    /// an auth failure means nothing was mutated and the screen keeps
    /// its field contents.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), SyncError> {
        if current_password.is_empty() {
            return Err(SyncError::validation("Current password is required"));
        }
        if new_password.is_empty() {
            return Err(SyncError::validation("New password is required"));
        }
        if new_password != confirm_password {
            return Err(SyncError::validation("New passwords do not match"));
        }

        self.auth
            .change_password(current_password, new_password)
            .await?;
        tracing::info!("Password changed");
        Ok(())
    }
}
