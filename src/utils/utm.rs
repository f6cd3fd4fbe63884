//! Mapping validation and UTM redirect URL composition.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

use crate::domain::entities::{NewUrlMapping, UtmParams};

/// Maximum length of a single UTM attribute.
pub const MAX_UTM_LENGTH: usize = 100;

static UTM_VALUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid UTM regex"));

/// Which UTM attribute failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtmField {
    Source,
    Medium,
    Campaign,
}

impl fmt::Display for UtmField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UtmField::Source => "source",
            UtmField::Medium => "medium",
            UtmField::Campaign => "campaign",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("slug cannot be empty")]
    EmptySlug,

    #[error("slug cannot be '.' or '..'")]
    DotSegmentSlug,

    #[error("invalid destination URL")]
    InvalidDestinationUrl,

    #[error("invalid UTM {0}")]
    InvalidUtmField(UtmField),

    #[error("expiration time must be in the future")]
    ExpiryInPast,
}

/// Returns true if `value` is a non-empty `[A-Za-z0-9_-]` token of at most
/// [`MAX_UTM_LENGTH`] characters.
pub fn is_valid_utm_value(value: &str) -> bool {
    !value.is_empty() && value.len() <= MAX_UTM_LENGTH && UTM_VALUE_REGEX.is_match(value)
}

/// Returns true for `.` and `..`, which URL path handling collapses, so such a
/// slug can never travel as a `/r/{slug}` path segment.
pub fn is_dot_segment(slug: &str) -> bool {
    matches!(slug, "." | "..")
}

/// Returns true if `destination` is an absolute HTTP or HTTPS URL with a host.
pub fn is_valid_destination(destination: &str) -> bool {
    match Url::parse(destination) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Validates a mapping before it is persisted.
///
/// # Rules
///
/// - Slug must be non-empty after trimming surrounding whitespace
/// - Slug must not be a dot segment (`.` or `..`)
/// - Destination must be an absolute HTTP(S) URL
/// - Each non-empty UTM attribute must satisfy [`is_valid_utm_value`]
/// - A set expiry must be strictly after `now`
///
/// Rules are checked in that order and the first failure is returned.
pub fn validate_mapping(mapping: &NewUrlMapping, now: DateTime<Utc>) -> Result<(), ValidationError> {
    if mapping.slug.trim().is_empty() {
        return Err(ValidationError::EmptySlug);
    }

    if is_dot_segment(mapping.slug.trim()) {
        return Err(ValidationError::DotSegmentSlug);
    }

    if !is_valid_destination(&mapping.destination_url) {
        return Err(ValidationError::InvalidDestinationUrl);
    }

    let UtmParams {
        source,
        medium,
        campaign,
    } = &mapping.utm;

    for (field, value) in [
        (UtmField::Source, source),
        (UtmField::Medium, medium),
        (UtmField::Campaign, campaign),
    ] {
        if let Some(value) = value.as_deref()
            && !value.is_empty()
            && !is_valid_utm_value(value)
        {
            return Err(ValidationError::InvalidUtmField(field));
        }
    }

    if let Some(expires_at) = mapping.expires_at
        && expires_at <= now
    {
        return Err(ValidationError::ExpiryInPast);
    }

    Ok(())
}

/// Builds the redirect URL by setting UTM query parameters on `destination`.
///
/// Existing query parameters are preserved. A UTM key that is already present
/// is overwritten in place (later duplicates are dropped), so composing twice
/// yields the same URL. Absent UTM attributes leave the matching key alone.
///
/// If `destination` does not parse as an absolute URL it is returned unchanged;
/// a redirect is never failed because of composition.
///
/// # Examples
///
/// ```ignore
/// let utm = UtmParams::new(Some("newsletter"), Some("email"), Some("spring"));
/// assert_eq!(
///     compose_redirect_url("https://example.com/landing", &utm),
///     "https://example.com/landing?utm_source=newsletter&utm_medium=email&utm_campaign=spring"
/// );
/// ```
pub fn compose_redirect_url(destination: &str, utm: &UtmParams) -> String {
    let Ok(mut url) = Url::parse(destination) else {
        return destination.to_string();
    };

    if url.cannot_be_a_base() {
        return destination.to_string();
    }

    if utm.is_empty() {
        return url.into();
    }

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    for (key, value) in utm.query_pairs() {
        set_query_param(&mut pairs, key, value);
    }

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    url.into()
}

fn set_query_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    let mut replaced = false;

    pairs.retain_mut(|(k, v)| {
        if k != key {
            return true;
        }
        if replaced {
            return false;
        }
        *v = value.to_string();
        replaced = true;
        true
    });

    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }
}
