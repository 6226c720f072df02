//! Diesel row models and their domain conversions.
//!
//! Row structs are the select shapes, `New*Row` structs the insert shapes
//! with generated and defaulted columns omitted. Conversions into domain
//! types live next to the rows so adapters stay free of field plumbing.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    automatic_orders, client_referrals, database_backups, orders, reviews, specialists,
    user_profiles,
};
use crate::domain::backup::BackupSummary;
use crate::domain::order::{Order, OrderDraft, RecurringSubscription};
use crate::domain::profile::UserProfile;
use crate::domain::public_profiles::{PublicReview, PublicSpecialist};
use crate::domain::referral::ClientReferral;
use crate::domain::role::UnknownRoleError;

/// Select shape of `client_referrals`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = client_referrals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientReferralRow {
    pub id: i64,
    pub specialist_id: i64,
    pub year: i32,
    pub month: i32,
    pub referral_count: i32,
    pub is_referred: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClientReferralRow> for ClientReferral {
    fn from(row: ClientReferralRow) -> Self {
        Self {
            id: row.id,
            specialist_id: row.specialist_id,
            year: row.year,
            month: row.month,
            referral_count: row.referral_count,
            is_referred: row.is_referred,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Select shape of `orders`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub package_name: String,
    pub package_type: Option<String>,
    pub amount: i64,
    pub payment_method: String,
    pub status: String,
    pub parent_order_id: Option<i64>,
    pub invoice_number: Option<String>,
    pub invoice_issued_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            package_name: row.package_name,
            package_type: row.package_type,
            amount: row.amount,
            payment_method: row.payment_method,
            status: row.status,
            parent_order_id: row.parent_order_id,
            invoice_number: row.invoice_number,
            invoice_issued_at: row.invoice_issued_at,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insert shape of `orders`.
#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub customer_name: &'a str,
    pub customer_email: &'a str,
    pub customer_phone: Option<&'a str>,
    pub package_name: &'a str,
    pub package_type: Option<&'a str>,
    pub amount: i64,
    pub payment_method: &'a str,
    pub parent_order_id: Option<i64>,
}

impl<'a> NewOrderRow<'a> {
    /// Borrow an insert row from a domain draft.
    pub fn from_draft(draft: &'a OrderDraft) -> Self {
        Self {
            customer_name: &draft.customer_name,
            customer_email: &draft.customer_email,
            customer_phone: draft.customer_phone.as_deref(),
            package_name: &draft.package_name,
            package_type: draft.package_type.as_deref(),
            amount: draft.amount,
            payment_method: &draft.payment_method,
            parent_order_id: draft.parent_order_id,
        }
    }
}

/// Select shape of `automatic_orders`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = automatic_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AutomaticOrderRow {
    pub id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub package_name: String,
    pub monthly_amount: i64,
    pub monthly_payment_day: i32,
    pub paid_months: Vec<i32>,
    pub current_month: i32,
    pub total_months: i32,
    pub first_order_id: Option<i64>,
    pub last_billed_on: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AutomaticOrderRow> for RecurringSubscription {
    fn from(row: AutomaticOrderRow) -> Self {
        Self {
            id: row.id,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            package_name: row.package_name,
            monthly_amount: row.monthly_amount,
            monthly_payment_day: row.monthly_payment_day,
            paid_months: row.paid_months,
            current_month: row.current_month,
            total_months: row.total_months,
            first_order_id: row.first_order_id,
            last_billed_on: row.last_billed_on,
            is_active: row.is_active,
        }
    }
}

/// Select shape of `user_profiles`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserProfileRow {
    pub id: i64,
    pub user_id: Uuid,
    pub role: String,
    pub is_approved: bool,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserProfileRow> for UserProfile {
    type Error = UnknownRoleError;

    fn try_from(row: UserProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            role: row.role.parse()?,
            is_approved: row.is_approved,
            display_name: row.display_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Public slice of `specialists`. Contact columns are absent from the select
/// so they never leave the adapter.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = specialists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PublicSpecialistRow {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    pub city: String,
    pub bio: Option<String>,
    pub consultation_fee: Option<i64>,
    pub consultation_type: Option<String>,
    pub rating: f32,
}

impl From<PublicSpecialistRow> for PublicSpecialist {
    fn from(row: PublicSpecialistRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            specialty: row.specialty,
            city: row.city,
            bio: row.bio,
            consultation_fee: row.consultation_fee,
            consultation_type: row.consultation_type,
            rating: row.rating,
        }
    }
}

/// Public slice of `reviews`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PublicReviewRow {
    pub id: i64,
    pub specialist_id: i64,
    pub patient_name: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PublicReviewRow> for PublicReview {
    fn from(row: PublicReviewRow) -> Self {
        Self {
            id: row.id,
            specialist_id: row.specialist_id,
            patient_name: row.patient_name,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
        }
    }
}

/// Select shape of `database_backups`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = database_backups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DatabaseBackupRow {
    pub id: i64,
    pub backup_type: String,
    pub created_by: Option<String>,
    pub notes: Option<String>,
    pub tables_count: i32,
    pub total_records: i64,
    pub created_at: DateTime<Utc>,
}

impl From<DatabaseBackupRow> for BackupSummary {
    fn from(row: DatabaseBackupRow) -> Self {
        Self {
            id: row.id,
            backup_type: row.backup_type,
            created_by: row.created_by,
            notes: row.notes,
            tables_count: row.tables_count,
            total_records: row.total_records,
            created_at: row.created_at,
        }
    }
}

/// Insert shape of `database_backups`.
#[derive(Debug, Insertable)]
#[diesel(table_name = database_backups)]
pub struct NewDatabaseBackupRow<'a> {
    pub backup_type: &'a str,
    pub created_by: Option<&'a str>,
    pub notes: Option<&'a str>,
}
