//! Domain types, ports, and services.
//!
//! Purpose: strongly typed table shapes, a queryable schema catalog, and the
//! service layer behind the remote procedures. Types here are persistence
//! agnostic; adapters live under `outbound`.
//!
//! Public surface:
//! - DomainError / ErrorCode — stable procedure error payload.
//! - SchemaCatalog and the per-table shape types.
//! - Services: ReferralService, BackupService, BillingService,
//!   DirectoryService, AccessPolicy.
//! - ports — repository traits with mock and fixture implementations.

pub mod access;
pub mod backup;
pub mod backup_service;
pub mod billing_service;
pub mod directory_service;
pub mod error;
pub mod order;
pub mod ports;
pub mod profile;
pub mod public_profiles;
pub mod referral;
pub mod referral_service;
pub mod role;
pub mod schema;
pub mod text_scan;
pub mod time_slots;

pub use self::access::AccessPolicy;
pub use self::backup::{BackupRequest, BackupSummary};
pub use self::backup_service::BackupService;
pub use self::billing_service::{BillingRunReport, BillingService};
pub use self::directory_service::DirectoryService;
pub use self::error::{DomainError, ErrorCode};
pub use self::order::{Order, OrderDraft, RecurringSubscription};
pub use self::profile::UserProfile;
pub use self::public_profiles::{PublicReview, PublicSpecialist};
pub use self::referral::{ClientReferral, ReferralKey, ReferralKeyError};
pub use self::referral_service::ReferralService;
pub use self::role::{UnknownRoleError, UserRole};
pub use self::schema::{
    ColumnSchema, RecordShape, Relationship, SchemaCatalog, ShapeField, TableSchema,
    render_mermaid_diagram,
};
pub use self::text_scan::first_integer;
pub use self::time_slots::default_time_slots;

/// Convenient procedure result alias.
pub type ProcedureResult<T> = Result<T, DomainError>;
