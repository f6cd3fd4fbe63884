//! Transport configuration for the edge tier's upstream client.

use std::time::Duration;

use crate::edge::ForwardingError;

/// Maximum hops when redirect following is explicitly enabled.
const MAX_FOLLOWED_REDIRECTS: usize = 10;

/// Settings used to build the client that talks to the resolution tier.
///
/// `follow_redirects` defaults to `false`: the edge must observe the raw
/// redirect so the client sees the real destination. The resolution tier is
/// always reached directly, never through an `HTTP_PROXY` from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub follow_redirects: bool,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            follow_redirects: false,
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl TransportConfig {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            timeout,
            connect_timeout,
            ..Self::default()
        }
    }

    fn redirect_policy(&self) -> reqwest::redirect::Policy {
        if self.follow_redirects {
            reqwest::redirect::Policy::limited(MAX_FOLLOWED_REDIRECTS)
        } else {
            reqwest::redirect::Policy::none()
        }
    }

    /// Builds a `reqwest::Client` honoring this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ForwardingError::ClientBuild`] if the TLS backend or resolver
    /// cannot be initialized.
    pub fn build_client(&self) -> Result<reqwest::Client, ForwardingError> {
        reqwest::Client::builder()
            .redirect(self.redirect_policy())
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .tcp_nodelay(true)
            .no_proxy()
            .build()
            .map_err(ForwardingError::ClientBuild)
    }
}
