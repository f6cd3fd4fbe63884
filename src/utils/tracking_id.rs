//! Tracking identifier generation.

use base64::Engine as _;
use chrono::Utc;

/// Number of random bytes in a tracking identifier (128 bits).
const TRACKING_ID_BYTES: usize = 16;

/// Generates a URL-safe tracking identifier from 128 bits of OS randomness.
///
/// The result is 22 characters of unpadded URL-safe base64. If the system
/// random source fails, the current timestamp is encoded instead; uniqueness
/// is then only as good as the clock resolution.
pub fn generate_tracking_id() -> String {
    let mut buffer = [0u8; TRACKING_ID_BYTES];

    match getrandom::fill(&mut buffer) {
        Ok(()) => base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer),
        Err(e) => {
            tracing::warn!("Secure random source failed ({e}); using timestamp tracking id");
            timestamp_tracking_id()
        }
    }
}

fn timestamp_tracking_id() -> String {
    let now = Utc::now();
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros());

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(nanos.to_be_bytes())
}
