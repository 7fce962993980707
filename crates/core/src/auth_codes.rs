//! Translation of backend auth error codes into user-facing messages.
//!
//! The hosted auth service reports failures as short string codes
//! (`auth/...`). This module maps each known code to the sentence shown
//! to the user; unknown codes fall back to a generic retry message.

// ---------------------------------------------------------------------------
// Known codes
// ---------------------------------------------------------------------------

pub const CODE_INVALID_EMAIL: &str = "auth/invalid-email";
pub const CODE_EMAIL_ALREADY_EXISTS: &str = "auth/email-already-exists";
pub const CODE_USER_NOT_FOUND: &str = "auth/user-not-found";
pub const CODE_MISSING_PASSWORD: &str = "auth/missing-password";
pub const CODE_INVALID_PASSWORD: &str = "auth/invalid-password";
pub const CODE_INVALID_CREDENTIAL: &str = "auth/invalid-credential";
pub const CODE_WEAK_PASSWORD: &str = "auth/weak-password";

/// Fallback message for codes this client does not recognize.
pub const UNKNOWN_AUTH_ERROR: &str = "An unknown error occurred. Please try again.";

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

/// Map a backend auth error code to the message shown to the user.
///
/// Pure mapping, no side effects. `auth/invalid-password` and
/// `auth/invalid-credential` intentionally share one message: the
/// backend uses both codes for a wrong password depending on the
/// endpoint.
pub fn auth_error_message(code: &str) -> &'static str {
    match code {
        CODE_INVALID_EMAIL => "The email address is not valid.",
        CODE_EMAIL_ALREADY_EXISTS => {
            "The provided email is already in use by an existing user."
        }
        CODE_USER_NOT_FOUND => "There is no user corresponding to the given email.",
        CODE_MISSING_PASSWORD => "The password is required.",
        CODE_INVALID_PASSWORD | CODE_INVALID_CREDENTIAL => {
            "The password is invalid for the given email, or the account does not have a password set."
        }
        CODE_WEAK_PASSWORD => "The password should be at least 6 characters long.",
        _ => UNKNOWN_AUTH_ERROR,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
