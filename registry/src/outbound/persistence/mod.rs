//! Diesel/PostgreSQL adapters for the domain ports.

mod diesel_order_repository;
mod diesel_profile_repository;
mod diesel_public_directory;
mod diesel_referral_repository;
mod diesel_subscription_repository;
mod error_mapping;
mod models;
mod pool;
mod postgres_backup_store;
pub mod schema;

pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_public_directory::DieselPublicDirectory;
pub use diesel_referral_repository::DieselReferralRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use error_mapping::{map_diesel_error, map_pool_error};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use postgres_backup_store::PostgresBackupStore;
