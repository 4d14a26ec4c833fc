//! Finalized outgoing request.
//!
//! A [`Request`] is what a [`Transport`](crate::Transport) receives: the verb,
//! the fully-qualified URL (query string included), the headers (credentials
//! included) and the body bytes. It is produced by
//! [`RequestSpec::into_request`](crate::RequestSpec::into_request).

use std::collections::HashMap;

use bytes::Bytes;

use crate::Method;

/// An HTTP request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Request {
    /// Creates a request from its parts.
    #[must_use]
    pub fn new(
        method: Method,
        url: impl Into<String>,
        headers: HashMap<String, String>,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            method,
            url: url.into(),
            headers,
            body: body.into(),
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Fully-qualified request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request body, possibly empty.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, String, HashMap<String, String>, Bytes) {
        (self.method, self.url, self.headers, self.body)
    }
}
