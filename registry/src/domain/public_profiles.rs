//! Sanitized projections for anonymous consumption.
//!
//! These are distinct shapes from the administrative rows: contact details
//! (`email`, `phone`, `internal_number`) never appear here, so leaking them
//! is a type error rather than a filtering bug.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publicly visible slice of a specialist profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicSpecialist {
    /// Specialist identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Specialty headline.
    pub specialty: String,
    /// Practice city.
    pub city: String,
    /// Public biography, if provided.
    pub bio: Option<String>,
    /// Consultation fee in minor currency units, if published.
    pub consultation_fee: Option<i64>,
    /// Consultation channel (in person, online, ...), if published.
    pub consultation_type: Option<String>,
    /// Aggregate rating.
    pub rating: f32,
}

/// Publicly visible slice of a moderated review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicReview {
    /// Review identifier.
    pub id: i64,
    /// Reviewed specialist.
    pub specialist_id: i64,
    /// Reviewer display name as submitted.
    pub patient_name: String,
    /// Star rating (1–5).
    pub rating: i32,
    /// Review body, if any.
    pub comment: Option<String>,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}
