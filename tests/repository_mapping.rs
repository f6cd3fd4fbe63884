use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use utm_tracker::domain::entities::{NewUrlMapping, UtmParams};
use utm_tracker::domain::repositories::MappingRepository;
use utm_tracker::error::AppError;
use utm_tracker::infrastructure::persistence::PgMappingRepository;

fn new_mapping(slug: &str) -> NewUrlMapping {
    NewUrlMapping {
        slug: slug.to_string(),
        destination_url: "https://example.com/landing".to_string(),
        utm: UtmParams::new(Some("newsletter"), Some("email"), None::<String>),
        expires_at: Some(Utc::now() + Duration::days(30)),
    }
}

#[sqlx::test]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    let created = repo.create(new_mapping("promo")).await.unwrap();
    assert_eq!(created.slug, "promo");
    assert_eq!(created.utm.campaign, None);

    let found = repo.find_by_slug("promo").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.destination_url, "https://example.com/landing");
    assert_eq!(found.utm.source.as_deref(), Some("newsletter"));
    assert!(found.expires_at.is_some());
}

#[sqlx::test]
async fn test_find_is_case_sensitive(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    repo.create(new_mapping("Promo")).await.unwrap();

    assert!(repo.find_by_slug("promo").await.unwrap().is_none());
    assert!(repo.find_by_slug("Promo").await.unwrap().is_some());
}

#[sqlx::test]
async fn test_duplicate_slug_conflicts(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    repo.create(new_mapping("promo")).await.unwrap();
    let result = repo.create(new_mapping("promo")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
