//! Click log entity: one anonymized record per resolved redirect.

use chrono::{DateTime, Utc};

/// A persisted click event.
///
/// `slug` is a plain reference to the mapping, not a foreign key. The client
/// address is only ever stored in its anonymized network-prefix form.
#[derive(Debug, Clone)]
pub struct ClickLog {
    pub id: i64,
    pub slug: String,
    pub anonymized_ip: Option<String>,
    pub clicked_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

/// Input data for recording a click.
#[derive(Debug, Clone)]
pub struct NewClickLog {
    pub slug: String,
    pub anonymized_ip: Option<String>,
    pub clicked_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

impl NewClickLog {
    /// Materializes the persisted form once the store has assigned an id.
    pub fn into_click_log(self, id: i64) -> ClickLog {
        ClickLog {
            id,
            slug: self.slug,
            anonymized_ip: self.anonymized_ip,
            clicked_at: self.clicked_at,
            referrer: self.referrer,
            user_agent: self.user_agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_click_log_keeps_fields() {
        let now = Utc::now();
        let new_click = NewClickLog {
            slug: "promo".to_string(),
            anonymized_ip: Some("192.168.1.0".to_string()),
            clicked_at: now,
            referrer: Some("https://google.com".to_string()),
            user_agent: None,
        };

        let click = new_click.into_click_log(7);

        assert_eq!(click.id, 7);
        assert_eq!(click.slug, "promo");
        assert_eq!(click.anonymized_ip.as_deref(), Some("192.168.1.0"));
        assert_eq!(click.clicked_at, now);
        assert!(click.user_agent.is_none());
    }
}
