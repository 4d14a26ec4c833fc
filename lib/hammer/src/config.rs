//! Transport configuration types.

use std::collections::HashMap;

/// Default `User-Agent` sent by [`HyperTransport`](crate::HyperTransport).
pub const DEFAULT_USER_AGENT: &str = concat!("hammer/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`HyperTransport`](crate::HyperTransport).
///
/// Values here only fill gaps: a header already present on the request is
/// never overwritten.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// `User-Agent` header value; `None` sends no user agent.
    pub user_agent: Option<String>,
    /// Headers added to every request that does not already carry them.
    pub default_headers: HashMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            default_headers: HashMap::new(),
        }
    }
}

impl TransportConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }

    /// Headers to add to a request: the default headers plus `User-Agent`.
    pub(crate) fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.default_headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .chain(
                self.user_agent
                    .as_deref()
                    .map(|agent| ("User-Agent", agent)),
            )
    }
}

/// Builder for [`TransportConfig`], starting from the defaults.
#[derive(Debug, Clone, Default)]
pub struct TransportConfigBuilder {
    config: TransportConfig,
}

impl TransportConfigBuilder {
    /// Set the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Send no `User-Agent` header.
    #[must_use]
    pub fn without_user_agent(mut self) -> Self {
        self.config.user_agent = None;
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .default_headers
            .insert(name.into(), value.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> TransportConfig {
        self.config
    }
}
