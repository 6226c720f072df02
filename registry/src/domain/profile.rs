//! Application account profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::UserRole;

/// One application account with its role and approval state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Profile record identifier.
    pub id: i64,
    /// The account this profile belongs to.
    pub user_id: Uuid,
    /// Assigned role.
    pub role: UserRole,
    /// Whether an administrator has approved the account.
    pub is_approved: bool,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}
