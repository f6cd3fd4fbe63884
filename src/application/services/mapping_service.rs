//! Mapping creation and retrieval (admin write path).

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::utm::validate_mapping;

/// Service for creating and inspecting URL mappings.
///
/// Every mapping is validated before it reaches the store.
pub struct MappingService {
    repository: Arc<dyn MappingRepository>,
}

impl MappingService {
    /// Creates a new mapping service.
    pub fn new(repository: Arc<dyn MappingRepository>) -> Self {
        Self { repository }
    }

    /// Validates and persists a new mapping.
    ///
    /// The slug is stored trimmed. An unset expiry defaults to one year from now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if any field is malformed.
    /// Returns [`AppError::Conflict`] if the slug is already taken.
    /// Returns [`AppError::Persistence`] on database errors.
    pub async fn create_mapping(&self, mut new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let now = Utc::now();

        validate_mapping(&new_mapping, now)?;
        new_mapping.slug = new_mapping.slug.trim().to_string();

        if self
            .repository
            .find_by_slug(&new_mapping.slug)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "slug already exists: {}",
                new_mapping.slug
            )));
        }

        self.repository
            .create(new_mapping.with_default_expiry(now))
            .await
    }

    /// Retrieves a mapping by slug, regardless of expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this slug.
    pub async fn get_mapping(&self, slug: &str) -> Result<UrlMapping, AppError> {
        self.repository
            .find_by_slug(slug.trim())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Mapping not found: {}", slug.trim())))
    }

    /// Checks store connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the store is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UtmParams;
    use crate::domain::repositories::MockMappingRepository;
    use crate::utils::utm::ValidationError;
    use chrono::{Duration, Months};

    fn new_mapping(slug: &str) -> NewUrlMapping {
        NewUrlMapping {
            slug: slug.to_string(),
            destination_url: "https://example.com/landing".to_string(),
            utm: UtmParams::new(Some("newsletter"), Some("email"), Some("spring")),
            expires_at: None,
        }
    }

    fn persisted(new_mapping: NewUrlMapping) -> UrlMapping {
        UrlMapping {
            id: 1,
            slug: new_mapping.slug,
            destination_url: new_mapping.destination_url,
            utm: new_mapping.utm,
            expires_at: new_mapping.expires_at,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_mapping_success_with_default_expiry() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_find_by_slug()
            .withf(|slug| slug == "promo")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|m| {
                let lower = Utc::now().checked_add_months(Months::new(12)).unwrap()
                    - Duration::minutes(1);
                m.slug == "promo" && m.expires_at.is_some_and(|e| e > lower)
            })
            .times(1)
            .returning(|m| Ok(persisted(m)));

        let service = MappingService::new(Arc::new(mock_repo));

        let mapping = service.create_mapping(new_mapping(" promo ")).await.unwrap();

        assert_eq!(mapping.slug, "promo");
        assert!(mapping.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_create_mapping_rejects_invalid_before_store() {
        let mock_repo = MockMappingRepository::new();
        let service = MappingService::new(Arc::new(mock_repo));

        let mut invalid = new_mapping("promo");
        invalid.utm.source = Some("has spaces".to_string());

        let result = service.create_mapping(invalid).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::InvalidUtmField(_)))
        ));
    }

    #[tokio::test]
    async fn test_create_mapping_rejects_past_expiry() {
        let service = MappingService::new(Arc::new(MockMappingRepository::new()));

        let mut expired = new_mapping("promo");
        expired.expires_at = Some(Utc::now() - Duration::hours(1));

        let result = service.create_mapping(expired).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::ExpiryInPast))
        ));
    }

    #[tokio::test]
    async fn test_create_mapping_duplicate_slug() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_find_by_slug()
            .times(1)
            .returning(|_| Ok(Some(persisted(new_mapping("promo")))));

        mock_repo.expect_create().times(0);

        let service = MappingService::new(Arc::new(mock_repo));

        let result = service.create_mapping(new_mapping("promo")).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_get_mapping_not_found() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_find_by_slug()
            .times(1)
            .returning(|_| Ok(None));

        let service = MappingService::new(Arc::new(mock_repo));

        let result = service.get_mapping("ghost").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
