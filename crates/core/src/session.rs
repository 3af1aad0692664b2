//! Explicit session context.
//!
//! Replaces the ambient per-page session storage of the original dashboard:
//! every operation receives the acting identity as a value instead of
//! reading global state.

use serde::{Deserialize, Serialize};

/// The authenticated actor on whose behalf operations run.
///
/// Authentication itself is out of scope; this is the already-established
/// identity carried into `createdBy` fields and audit entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: String,
    pub admin_id: Option<String>,
}

impl Session {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
            admin_id: None,
        }
    }

    pub fn with_admin_id(mut self, admin_id: impl Into<String>) -> Self {
        self.admin_id = Some(admin_id.into());
        self
    }
}
