use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use utm_tracker::domain::entities::NewTrackingRecord;
use utm_tracker::domain::repositories::TrackingRepository;
use utm_tracker::error::AppError;
use utm_tracker::infrastructure::persistence::PgTrackingRepository;

fn new_record(tracking_id: &str) -> NewTrackingRecord {
    NewTrackingRecord {
        tracking_id: tracking_id.to_string(),
        slug: "promo".to_string(),
        ip_network: "198.51.100.0".to_string(),
        country_code: String::new(),
        browser_family: "Chrome".to_string(),
        os_family: "Linux".to_string(),
        device_type: "Mobile".to_string(),
        first_click_time: Utc::now(),
    }
}

#[sqlx::test]
async fn test_insert_starts_at_one(pool: PgPool) {
    let repo = PgTrackingRepository::new(Arc::new(pool));

    let record = repo.insert(new_record("abc")).await.unwrap();

    assert_eq!(record.click_count, 1);
    assert_eq!(record.country_code, "");
}

#[sqlx::test]
async fn test_increment_click_count(pool: PgPool) {
    let repo = PgTrackingRepository::new(Arc::new(pool));
    repo.insert(new_record("abc")).await.unwrap();

    assert!(repo.increment_click_count("abc").await.unwrap());
    assert!(repo.increment_click_count("abc").await.unwrap());

    let record = repo.find_by_tracking_id("abc").await.unwrap().unwrap();
    assert_eq!(record.click_count, 3);
}

#[sqlx::test]
async fn test_increment_unknown_id(pool: PgPool) {
    let repo = PgTrackingRepository::new(Arc::new(pool));

    assert!(!repo.increment_click_count("missing").await.unwrap());
    assert!(repo.find_by_tracking_id("missing").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_duplicate_tracking_id_conflicts(pool: PgPool) {
    let repo = PgTrackingRepository::new(Arc::new(pool));
    repo.insert(new_record("abc")).await.unwrap();

    let result = repo.insert(new_record("abc")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}
