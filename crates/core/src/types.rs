/// Record keys are opaque strings assigned by the hosted store.
pub type RecordId = String;

/// The authenticated user's unique identifier. Always passed explicitly;
/// nothing in this workspace reads ambient auth state.
pub type OwnerId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
