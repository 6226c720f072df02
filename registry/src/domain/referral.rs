//! Monthly referral tracking per specialist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One specialist's referral record for a given month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientReferral {
    /// Record identifier.
    pub id: i64,
    /// Owning specialist.
    pub specialist_id: i64,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1–12).
    pub month: i32,
    /// Referrals counted so far for the month.
    pub referral_count: i32,
    /// Whether the specialist was referred this month.
    pub is_referred: bool,
    /// Free-form administrative notes.
    pub notes: Option<String>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// The (specialist, year, month) triple addressing a single referral row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferralKey {
    /// Owning specialist.
    pub specialist_id: i64,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1–12).
    pub month: i32,
}

/// Validation error for a referral key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferralKeyError {
    /// Month fell outside 1–12.
    #[error("month must be between 1 and 12, got {month}")]
    MonthOutOfRange {
        /// The rejected month.
        month: i32,
    },
}

impl ReferralKey {
    /// Build a key, rejecting impossible months up front.
    pub fn try_new(specialist_id: i64, year: i32, month: i32) -> Result<Self, ReferralKeyError> {
        if !(1..=12).contains(&month) {
            return Err(ReferralKeyError::MonthOutOfRange { month });
        }
        Ok(Self {
            specialist_id,
            year,
            month,
        })
    }
}
