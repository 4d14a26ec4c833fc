//! Error types for hammer.

use std::sync::Arc;

use derive_more::{Display, Error, From};

/// Main error type for hammer operations.
///
/// Errors fall into three kinds:
/// - configuration errors, latched by a [`RequestSpec`](crate::RequestSpec)
///   configuration step and surfaced later,
/// - validation errors, raised by [`RequestSpec::build`](crate::RequestSpec::build),
/// - dispatch errors, raised by a [`Transport`](crate::Transport).
///
/// `Error` is `Clone` so that a latched error travels with a copied spec.
#[derive(Debug, Clone, Display, Error, From)]
pub enum Error {
    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from(skip)]
    JsonSerialization(Arc<serde_json::Error>),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from(skip)]
    FormSerialization(Arc<serde_html_form::ser::Error>),

    /// Query string serialization error.
    #[display("query serialization error: {_0}")]
    #[from(skip)]
    QuerySerialization(Arc<serde_html_form::ser::Error>),

    /// A resource ID was appended for a verb that does not address resources by ID.
    #[display("verb {_0} does not support ID-based addressing")]
    #[from(skip)]
    IdNotSupported(#[error(not(source))] String),

    /// Unrecognized HTTP verb token.
    #[display("invalid HTTP verb: {_0:?}")]
    #[from(skip)]
    InvalidVerb(#[error(not(source))] String),

    /// No verb was set before finalization.
    #[display("missing HTTP verb")]
    #[from(skip)]
    MissingVerb,

    /// No URL was set before finalization.
    #[display("missing URL")]
    #[from(skip)]
    MissingUrl,

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// The transport could not turn the request into a wire request.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonSerialization(Arc::new(err))
    }
}

impl Error {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns `true` if this error was raised by a configuration step.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::JsonSerialization(_)
                | Self::FormSerialization(_)
                | Self::QuerySerialization(_)
                | Self::IdNotSupported(_)
                | Self::InvalidVerb(_)
        )
    }

    /// Returns `true` if this error was raised by finalization.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingVerb | Self::MissingUrl)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
