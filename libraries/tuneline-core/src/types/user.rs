/// User domain type
use serde::{Deserialize, Serialize};

/// Stored credential record, keyed by username in the user document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// bcrypt hash of the user's password
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl UserRecord {
    pub fn new(password_hash: impl Into<String>) -> Self {
        Self {
            password_hash: password_hash.into(),
        }
    }
}
