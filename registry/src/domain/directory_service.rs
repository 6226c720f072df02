//! Anonymous read access to the sanitized directory.

use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::ports::{PublicDirectory, PublicDirectoryError};
use crate::domain::public_profiles::{PublicReview, PublicSpecialist};

/// Service serving the unauthenticated directory endpoints.
#[derive(Clone)]
pub struct DirectoryService<D> {
    directory: Arc<D>,
}

impl<D> DirectoryService<D> {
    /// Create a service over the given directory.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

impl<D> DirectoryService<D>
where
    D: PublicDirectory,
{
    /// Sanitized profiles of every active specialist.
    pub async fn specialists(&self) -> Result<Vec<PublicSpecialist>, DomainError> {
        self.directory
            .public_specialists()
            .await
            .map_err(map_directory_error)
    }

    /// Approved reviews, optionally narrowed to one specialist. An unknown
    /// specialist id yields an empty list, not an error.
    pub async fn reviews(
        &self,
        specialist_id: Option<i64>,
    ) -> Result<Vec<PublicReview>, DomainError> {
        self.directory
            .public_reviews(specialist_id)
            .await
            .map_err(map_directory_error)
    }
}

fn map_directory_error(error: PublicDirectoryError) -> DomainError {
    match error {
        PublicDirectoryError::Connection { message } => {
            DomainError::service_unavailable(format!("public directory unavailable: {message}"))
        }
        PublicDirectoryError::Query { message } => {
            DomainError::internal(format!("public directory error: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;

    use super::DirectoryService;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{MockPublicDirectory, PublicDirectoryError};
    use crate::domain::public_profiles::PublicSpecialist;

    fn specialist(id: i64) -> PublicSpecialist {
        PublicSpecialist {
            id,
            name: "Dr. Yilmaz".to_owned(),
            specialty: "Nutrition".to_owned(),
            city: "Ankara".to_owned(),
            bio: None,
            consultation_fee: Some(150_00),
            consultation_type: Some("online".to_owned()),
            rating: 4.8,
        }
    }

    #[tokio::test]
    async fn specialists_come_back_sanitized() {
        let mut directory = MockPublicDirectory::new();
        directory
            .expect_public_specialists()
            .times(1)
            .return_once(|| Ok(vec![specialist(3)]));

        let service = DirectoryService::new(Arc::new(directory));
        let listed = service.specialists().await.expect("specialists");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, 3);
    }

    #[tokio::test]
    async fn reviews_for_an_unknown_specialist_are_empty() {
        let mut directory = MockPublicDirectory::new();
        directory
            .expect_public_reviews()
            .with(eq(Some(999_i64)))
            .times(1)
            .return_once(|_| Ok(Vec::new()));

        let service = DirectoryService::new(Arc::new(directory));
        assert!(service.reviews(Some(999)).await.expect("reviews").is_empty());
    }

    #[tokio::test]
    async fn directory_outage_surfaces_as_service_unavailable() {
        let mut directory = MockPublicDirectory::new();
        directory
            .expect_public_specialists()
            .times(1)
            .return_once(|| Err(PublicDirectoryError::connection("refused")));

        let service = DirectoryService::new(Arc::new(directory));
        let error = service.specialists().await.expect_err("outage");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
