//! Role and approval checks backed by stored profiles.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::role::UserRole;

/// Answers role questions for request handlers. Accounts without a profile
/// row are treated as unknown and fail every check.
#[derive(Clone)]
pub struct AccessPolicy<P> {
    profiles: Arc<P>,
}

impl<P> AccessPolicy<P> {
    /// Create a policy over the given profile repository.
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }
}

impl<P> AccessPolicy<P>
where
    P: ProfileRepository,
{
    /// The role stored for an account. Unknown accounts are a not-found
    /// error rather than a default role.
    pub async fn role_of(&self, user_id: Uuid) -> Result<UserRole, DomainError> {
        let profile = self
            .profiles
            .find_by_user_id(user_id)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| DomainError::not_found(format!("no profile for account {user_id}")))?;
        Ok(profile.role)
    }

    /// Whether an account has passed approval. Unknown accounts are not
    /// approved.
    pub async fn is_approved(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let profile = self
            .profiles
            .find_by_user_id(user_id)
            .await
            .map_err(map_profile_error)?;
        Ok(profile.is_some_and(|p| p.is_approved))
    }

    /// Whether an account holds a back-office role.
    pub async fn is_admin_or_staff(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let profile = self
            .profiles
            .find_by_user_id(user_id)
            .await
            .map_err(map_profile_error)?;
        Ok(profile.is_some_and(|p| {
            matches!(p.role, UserRole::Admin | UserRole::Staff)
        }))
    }

    /// Assign a role to `subject` on behalf of `actor`. The actor must be
    /// allowed to manage the subject under the same matrix as
    /// [`Self::can_manage`].
    pub async fn assign_role(
        &self,
        actor: Uuid,
        subject: Uuid,
        role: UserRole,
    ) -> Result<(), DomainError> {
        if !self.can_manage(actor, subject).await? {
            return Err(DomainError::forbidden(format!(
                "account {actor} may not manage account {subject}"
            )));
        }
        let updated = self
            .profiles
            .set_role(subject, role)
            .await
            .map_err(map_profile_error)?;
        if !updated {
            return Err(DomainError::not_found(format!(
                "no profile for account {subject}"
            )));
        }
        Ok(())
    }

    /// Approve `subject` on behalf of `actor`, under the same management
    /// matrix.
    pub async fn approve_account(&self, actor: Uuid, subject: Uuid) -> Result<(), DomainError> {
        if !self.can_manage(actor, subject).await? {
            return Err(DomainError::forbidden(format!(
                "account {actor} may not manage account {subject}"
            )));
        }
        let updated = self
            .profiles
            .approve(subject)
            .await
            .map_err(map_profile_error)?;
        if !updated {
            return Err(DomainError::not_found(format!(
                "no profile for account {subject}"
            )));
        }
        Ok(())
    }

    /// Whether the `manager` account may administer the `subject` account.
    /// Admins manage everyone; staff manage ordinary users and legal
    /// accounts; nobody else manages anybody.
    pub async fn can_manage(&self, manager: Uuid, subject: Uuid) -> Result<bool, DomainError> {
        let manager_role = match self
            .profiles
            .find_by_user_id(manager)
            .await
            .map_err(map_profile_error)?
        {
            Some(profile) => profile.role,
            None => return Ok(false),
        };
        match manager_role {
            UserRole::Admin => Ok(true),
            UserRole::Staff => {
                let subject_role = self
                    .profiles
                    .find_by_user_id(subject)
                    .await
                    .map_err(map_profile_error)?
                    .map(|profile| profile.role);
                Ok(matches!(
                    subject_role,
                    Some(UserRole::User | UserRole::Legal)
                ))
            }
            UserRole::Specialist | UserRole::User | UserRole::Legal => Ok(false),
        }
    }
}

fn map_profile_error(error: ProfileRepositoryError) -> DomainError {
    match error {
        ProfileRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            DomainError::internal(format!("profile repository error: {message}"))
        }
        ProfileRepositoryError::CorruptRole { .. } => DomainError::internal(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    use super::AccessPolicy;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::MockProfileRepository;
    use crate::domain::profile::UserProfile;
    use crate::domain::role::UserRole;

    fn profile(user_id: Uuid, role: UserRole, is_approved: bool) -> UserProfile {
        let now = Utc::now();
        UserProfile {
            id: 1,
            user_id,
            role,
            is_approved,
            display_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn role_lookup_returns_the_stored_role() {
        let user_id = Uuid::new_v4();
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .with(eq(user_id))
            .times(1)
            .return_once(move |id| Ok(Some(profile(id, UserRole::Specialist, true))));

        let policy = AccessPolicy::new(Arc::new(profiles));
        assert_eq!(
            policy.role_of(user_id).await.expect("role"),
            UserRole::Specialist
        );
    }

    #[tokio::test]
    async fn role_lookup_for_an_unknown_account_is_not_found() {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .times(1)
            .return_once(|_| Ok(None));

        let policy = AccessPolicy::new(Arc::new(profiles));
        let error = policy
            .role_of(Uuid::new_v4())
            .await
            .expect_err("unknown account");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn unknown_accounts_are_not_approved() {
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .times(1)
            .return_once(|_| Ok(None));

        let policy = AccessPolicy::new(Arc::new(profiles));
        assert!(!policy.is_approved(Uuid::new_v4()).await.expect("check"));
    }

    #[tokio::test]
    async fn staff_count_as_back_office() {
        let user_id = Uuid::new_v4();
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .times(1)
            .return_once(move |id| Ok(Some(profile(id, UserRole::Staff, true))));

        let policy = AccessPolicy::new(Arc::new(profiles));
        assert!(policy.is_admin_or_staff(user_id).await.expect("check"));
    }

    #[tokio::test]
    async fn admins_manage_every_account() {
        let admin = Uuid::new_v4();
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .with(eq(admin))
            .times(1)
            .return_once(move |id| Ok(Some(profile(id, UserRole::Admin, true))));

        let policy = AccessPolicy::new(Arc::new(profiles));
        assert!(policy
            .can_manage(admin, Uuid::new_v4())
            .await
            .expect("check"));
    }

    #[tokio::test]
    async fn staff_manage_users_but_not_specialists() {
        let staff = Uuid::new_v4();
        let user = Uuid::new_v4();
        let specialist = Uuid::new_v4();

        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .with(eq(staff))
            .times(2)
            .returning(move |id| Ok(Some(profile(id, UserRole::Staff, true))));
        profiles
            .expect_find_by_user_id()
            .with(eq(user))
            .times(1)
            .return_once(move |id| Ok(Some(profile(id, UserRole::User, true))));
        profiles
            .expect_find_by_user_id()
            .with(eq(specialist))
            .times(1)
            .return_once(move |id| Ok(Some(profile(id, UserRole::Specialist, true))));

        let policy = AccessPolicy::new(Arc::new(profiles));
        assert!(policy.can_manage(staff, user).await.expect("check"));
        assert!(!policy.can_manage(staff, specialist).await.expect("check"));
    }

    #[tokio::test]
    async fn role_assignment_requires_management_rights() {
        let specialist = Uuid::new_v4();
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .with(eq(specialist))
            .times(1)
            .return_once(move |id| Ok(Some(profile(id, UserRole::Specialist, true))));
        profiles.expect_set_role().times(0);

        let policy = AccessPolicy::new(Arc::new(profiles));
        let error = policy
            .assign_role(specialist, Uuid::new_v4(), UserRole::Staff)
            .await
            .expect_err("specialists manage nobody");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn admins_can_assign_roles() {
        let admin = Uuid::new_v4();
        let subject = Uuid::new_v4();
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .with(eq(admin))
            .times(1)
            .return_once(move |id| Ok(Some(profile(id, UserRole::Admin, true))));
        profiles
            .expect_set_role()
            .with(eq(subject), eq(UserRole::Staff))
            .times(1)
            .return_once(|_, _| Ok(true));

        let policy = AccessPolicy::new(Arc::new(profiles));
        policy
            .assign_role(admin, subject, UserRole::Staff)
            .await
            .expect("assignment succeeds");
    }

    #[tokio::test]
    async fn approving_an_unknown_account_is_not_found() {
        let admin = Uuid::new_v4();
        let subject = Uuid::new_v4();
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .with(eq(admin))
            .times(1)
            .return_once(move |id| Ok(Some(profile(id, UserRole::Admin, true))));
        profiles
            .expect_approve()
            .with(eq(subject))
            .times(1)
            .return_once(|_| Ok(false));

        let policy = AccessPolicy::new(Arc::new(profiles));
        let error = policy
            .approve_account(admin, subject)
            .await
            .expect_err("unknown subject");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn ordinary_users_manage_nobody() {
        let user = Uuid::new_v4();
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_find_by_user_id()
            .with(eq(user))
            .times(1)
            .return_once(move |id| Ok(Some(profile(id, UserRole::User, true))));

        let policy = AccessPolicy::new(Arc::new(profiles));
        assert!(!policy
            .can_manage(user, Uuid::new_v4())
            .await
            .expect("check"));
    }
}
