use std::fmt;

/// All database primary keys are SQLite INTEGER rowids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A one-way password hash in PHC string format.
///
/// Opaque to everything except the credential hasher. The `Debug` impl is
/// redacted so the hash never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedCredential(String);

impl HashedCredential {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedCredential(<redacted>)")
    }
}
