//! HTTP method types.

use std::str::FromStr;

use derive_more::Display;

use crate::Error;

/// HTTP request method.
///
/// The nine standard method tokens. Parsing is case-sensitive, so `"get"` is
/// not a valid verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method - retrieve a resource.
    #[display("GET")]
    Get,
    /// PUT method - replace a resource.
    #[display("PUT")]
    Put,
    /// POST method - create a resource.
    #[display("POST")]
    Post,
    /// DELETE method - remove a resource.
    #[display("DELETE")]
    Delete,
    /// PATCH method - partially update a resource.
    #[display("PATCH")]
    Patch,
    /// HEAD method - retrieve headers only.
    #[display("HEAD")]
    Head,
    /// TRACE method - loop-back test along the request path.
    #[display("TRACE")]
    Trace,
    /// CONNECT method - establish a tunnel.
    #[display("CONNECT")]
    Connect,
    /// OPTIONS method - retrieve allowed methods.
    #[display("OPTIONS")]
    Options,
}

impl Method {
    /// Every supported method.
    pub const ALL: [Self; 9] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Patch,
        Self::Head,
        Self::Trace,
        Self::Connect,
        Self::Options,
    ];

    /// The method token, e.g. `"GET"`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
            Self::Options => "OPTIONS",
        }
    }

    /// Parse a method token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVerb`] if the token is not one of the nine
    /// method names (exact, upper-case match).
    pub fn parse(token: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == token)
            .ok_or_else(|| Error::InvalidVerb(token.to_string()))
    }

    /// Returns `true` if a resource ID may be appended to the URL for this method.
    #[must_use]
    pub const fn supports_id(&self) -> bool {
        matches!(self, Self::Get | Self::Put | Self::Delete)
    }

    /// Returns `true` if the method is safe (does not modify resources).
    #[must_use]
    pub const fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options | Self::Trace)
    }

    /// Returns `true` if the method is idempotent.
    #[must_use]
    pub const fn is_idempotent(&self) -> bool {
        self.is_safe() || matches!(self, Self::Put | Self::Delete)
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Put => Self::PUT,
            Method::Post => Self::POST,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Trace => Self::TRACE,
            Method::Connect => Self::CONNECT,
            Method::Options => Self::OPTIONS,
        }
    }
}

impl TryFrom<http::Method> for Method {
    type Error = Error;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        Self::parse(method.as_str())
    }
}
