//! Advanced per-visitor tracking: tracking ids, network info and agent classes.

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::{NewTrackingRecord, TrackingRecord};
use crate::domain::repositories::TrackingRepository;
use crate::error::AppError;
use crate::utils::ip_anonymizer::anonymize;
use crate::utils::tracking_id::generate_tracking_id;
use crate::utils::user_agent::{UserAgentClass, classify_user_agent};

/// Anonymized network information for a client address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    /// Same masking as the click logger; empty for unparseable input.
    pub network_prefix: String,
    /// Always empty: geolocation is not implemented.
    pub country_code: String,
}

/// Optional enrichment path that maintains [`TrackingRecord`]s.
///
/// Failures here are independent of the redirect outcome; callers report and
/// discard them.
///
/// How a returning visitor's tracking id reaches [`Self::record_repeat_click`]
/// is not defined: no cookie or session is issued by this service.
pub struct AdvancedTracker {
    repository: Arc<dyn TrackingRepository>,
}

impl AdvancedTracker {
    /// Creates a new tracker.
    pub fn new(repository: Arc<dyn TrackingRepository>) -> Self {
        Self { repository }
    }

    /// Generates a 128-bit URL-safe tracking identifier.
    pub fn generate_tracking_id(&self) -> String {
        generate_tracking_id()
    }

    /// Extracts the anonymized network prefix of `raw_ip`.
    pub fn extract_network_info(&self, raw_ip: &str) -> NetworkInfo {
        NetworkInfo {
            network_prefix: anonymize(raw_ip),
            country_code: String::new(),
        }
    }

    /// Classifies a user agent into browser, OS and device families.
    pub fn classify_user_agent(&self, user_agent: &str) -> UserAgentClass {
        classify_user_agent(user_agent)
    }

    /// Records the first observation of a visitor and returns its tracking id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the record cannot be stored.
    pub async fn record_first_click(
        &self,
        slug: &str,
        raw_ip: &str,
        user_agent: Option<&str>,
    ) -> Result<String, AppError> {
        let tracking_id = self.generate_tracking_id();
        let network = self.extract_network_info(raw_ip);
        let class = self.classify_user_agent(user_agent.unwrap_or_default());

        let new_record = NewTrackingRecord {
            tracking_id: tracking_id.clone(),
            slug: slug.to_string(),
            ip_network: network.network_prefix,
            country_code: network.country_code,
            browser_family: class.browser.to_string(),
            os_family: class.os.to_string(),
            device_type: class.device.to_string(),
            first_click_time: Utc::now(),
        };

        self.repository.insert(new_record).await?;

        Ok(tracking_id)
    }

    /// Increments the click counter of an existing tracking record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this tracking id.
    /// Returns [`AppError::Persistence`] on database errors.
    pub async fn record_repeat_click(&self, tracking_id: &str) -> Result<(), AppError> {
        if self.repository.increment_click_count(tracking_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!(
                "Tracking record not found: {tracking_id}"
            )))
        }
    }

    /// Retrieves a tracking record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this tracking id.
    pub async fn get_record(&self, tracking_id: &str) -> Result<TrackingRecord, AppError> {
        self.repository
            .find_by_tracking_id(tracking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tracking record not found: {tracking_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTrackingRepository;

    fn tracker(mock_repo: MockTrackingRepository) -> AdvancedTracker {
        AdvancedTracker::new(Arc::new(mock_repo))
    }

    #[test]
    fn test_extract_network_info() {
        let tracker = tracker(MockTrackingRepository::new());

        assert_eq!(
            tracker.extract_network_info("192.0.2.55"),
            NetworkInfo {
                network_prefix: "192.0.2.0".to_string(),
                country_code: String::new(),
            }
        );
        assert_eq!(
            tracker.extract_network_info("2001:db8:1:2::3").network_prefix,
            "2001:db8:1::"
        );
        assert_eq!(tracker.extract_network_info("nope").network_prefix, "");
    }

    #[tokio::test]
    async fn test_record_first_click() {
        let mut mock_repo = MockTrackingRepository::new();

        mock_repo
            .expect_insert()
            .withf(|r| {
                r.slug == "promo"
                    && r.ip_network == "198.51.100.0"
                    && r.country_code.is_empty()
                    && r.browser_family == "Chrome"
                    && r.os_family == "Linux"
                    && r.device_type == "Mobile"
                    && r.tracking_id.len() == 22
            })
            .times(1)
            .returning(|r| Ok(r.into_record(1)));

        let tracking_id = tracker(mock_repo)
            .record_first_click(
                "promo",
                "198.51.100.23",
                Some("Mozilla/5.0 (Linux; Android 10) Mobile Chrome"),
            )
            .await
            .unwrap();

        assert_eq!(tracking_id.len(), 22);
    }

    #[tokio::test]
    async fn test_record_first_click_without_user_agent() {
        let mut mock_repo = MockTrackingRepository::new();

        mock_repo
            .expect_insert()
            .withf(|r| {
                r.browser_family == "Unknown" && r.os_family == "Unknown" && r.device_type == "Desktop"
            })
            .times(1)
            .returning(|r| Ok(r.into_record(1)));

        let result = tracker(mock_repo)
            .record_first_click("promo", "10.1.2.3", None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_record_repeat_click() {
        let mut mock_repo = MockTrackingRepository::new();

        mock_repo
            .expect_increment_click_count()
            .withf(|id| id == "abc")
            .times(1)
            .returning(|_| Ok(true));

        assert!(tracker(mock_repo).record_repeat_click("abc").await.is_ok());
    }

    #[tokio::test]
    async fn test_record_repeat_click_unknown_id() {
        let mut mock_repo = MockTrackingRepository::new();

        mock_repo
            .expect_increment_click_count()
            .times(1)
            .returning(|_| Ok(false));

        let result = tracker(mock_repo).record_repeat_click("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_record_not_found() {
        let mut mock_repo = MockTrackingRepository::new();

        mock_repo
            .expect_find_by_tracking_id()
            .times(1)
            .returning(|_| Ok(None));

        let result = tracker(mock_repo).get_record("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
