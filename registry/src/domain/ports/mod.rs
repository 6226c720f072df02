//! Domain ports for the persistence boundary.

mod backup_store;
mod order_repository;
mod profile_repository;
mod public_directory;
mod referral_repository;
mod subscription_repository;

#[cfg(test)]
pub use backup_store::MockBackupStore;
pub use backup_store::{BackupStore, BackupStoreError, FixtureBackupStore};
#[cfg(test)]
pub use order_repository::MockOrderRepository;
pub use order_repository::{
    DeletedFilter, FixtureOrderRepository, OrderRepository, OrderRepositoryError,
};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{FixtureProfileRepository, ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use public_directory::MockPublicDirectory;
pub use public_directory::{FixturePublicDirectory, PublicDirectory, PublicDirectoryError};
#[cfg(test)]
pub use referral_repository::MockReferralRepository;
pub use referral_repository::{
    FixtureReferralRepository, ReferralRepository, ReferralRepositoryError,
};
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{
    FixtureSubscriptionRepository, SubscriptionRepository, SubscriptionRepositoryError,
};
