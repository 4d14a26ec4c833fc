//! Fluent request specification.
//!
//! A [`RequestSpec`] accumulates everything about one HTTP request through
//! chained `with_*` and verb calls. Configuration steps never fail in place:
//! a step that cannot complete latches its error inside the spec and the chain
//! keeps going. The first latched error wins and is reported by
//! [`RequestSpec::build`] (or [`RequestSpec::dispatch`]).
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use hammer_core::{Method, RequestSpec};
//!
//! let spec = RequestSpec::new()
//!     .get()
//!     .with_url("http://localhost:8081/")
//!     .with_body(&BTreeMap::from([("key", "value")]))
//!     .with_query_param("newKey", "newValue")
//!     .build()
//!     .expect("valid request");
//!
//! assert_eq!(spec.method(), Some(Method::Get));
//! assert_eq!(spec.body().as_ref(), br#"{"key":"value"}"#);
//! ```

mod dispatch;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use base64::Engine;
use bytes::Bytes;
use tracing::debug;

use crate::{ContentType, Error, Method, Result};

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    /// Create credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// `Authorization` header value: `Basic <base64(user:pass)>`.
    #[must_use]
    pub fn header_value(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Accumulating description of one HTTP request.
///
/// Not meant for sharing between concurrent callers: clone it (or seed a new
/// chain with [`RequestSpec::with_template`]) instead.
#[derive(Debug, Clone, Default)]
pub struct RequestSpec {
    method: Option<Method>,
    url: String,
    headers: HashMap<String, String>,
    query_params: BTreeMap<String, String>,
    body_params: BTreeMap<String, String>,
    body: Bytes,
    content_type: Option<ContentType>,
    basic_auth: Option<BasicAuth>,
    error: Option<Error>,
}

impl RequestSpec {
    /// Creates an empty spec: no verb, no URL, empty maps, no latched error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn latch(&mut self, err: Error) {
        match &self.error {
            Some(latched) => {
                debug!(error = %err, latched = %latched, "configuration error dropped, earlier error kept");
            }
            None => {
                debug!(error = %err, "configuration error latched");
                self.error = Some(err);
            }
        }
    }

    // ========================================================================
    // Verbs
    // ========================================================================

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the HTTP method from a free-form token such as `"PATCH"`.
    ///
    /// An unrecognized token latches [`Error::InvalidVerb`] and leaves the
    /// current method untouched.
    #[must_use]
    pub fn with_verb(mut self, token: impl AsRef<str>) -> Self {
        match Method::parse(token.as_ref()) {
            Ok(method) => self.method = Some(method),
            Err(err) => self.latch(err),
        }
        self
    }

    /// Use `GET`.
    #[must_use]
    pub fn get(self) -> Self {
        self.with_method(Method::Get)
    }

    /// Use `PUT`.
    #[must_use]
    pub fn put(self) -> Self {
        self.with_method(Method::Put)
    }

    /// Use `POST`.
    #[must_use]
    pub fn post(self) -> Self {
        self.with_method(Method::Post)
    }

    /// Use `DELETE`.
    #[must_use]
    pub fn delete(self) -> Self {
        self.with_method(Method::Delete)
    }

    /// Use `PATCH`.
    #[must_use]
    pub fn patch(self) -> Self {
        self.with_method(Method::Patch)
    }

    /// Use `HEAD`.
    #[must_use]
    pub fn head(self) -> Self {
        self.with_method(Method::Head)
    }

    /// Use `TRACE`.
    #[must_use]
    pub fn trace(self) -> Self {
        self.with_method(Method::Trace)
    }

    /// Use `CONNECT`.
    #[must_use]
    pub fn connect(self) -> Self {
        self.with_method(Method::Connect)
    }

    /// Use `OPTIONS`.
    #[must_use]
    pub fn options(self) -> Self {
        self.with_method(Method::Options)
    }

    // ========================================================================
    // Target
    // ========================================================================

    /// Sets the URL verbatim.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Appends `/{id}` to the URL.
    ///
    /// Only `GET`, `PUT` and `DELETE` address resources by ID. For any other
    /// verb (or no verb yet) the URL is left alone and
    /// [`Error::IdNotSupported`] is latched. A single trailing `/` on the URL
    /// is not doubled.
    #[must_use]
    pub fn with_id(mut self, id: impl fmt::Display) -> Self {
        match self.method {
            Some(method) if method.supports_id() => {
                let base = self.url.strip_suffix('/').unwrap_or(&self.url);
                self.url = format!("{base}/{id}");
            }
            other => {
                let verb = other.map_or("<unset>", |method| method.as_str());
                self.latch(Error::IdNotSupported(verb.to_string()));
            }
        }
        self
    }

    // ========================================================================
    // Headers & parameters
    // ========================================================================

    /// Sets a header, replacing any previous value for the same name.
    ///
    /// Names compare case-insensitively; the last write keeps its spelling.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|key, _| !key.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    /// Sets multiple headers, in iteration order.
    #[must_use]
    pub fn with_headers<K, V>(self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |spec, (name, value)| spec.with_header(name, value))
    }

    /// Sets the `Content-Type` header.
    #[must_use]
    pub fn with_content_type(self, content_type: ContentType) -> Self {
        self.with_header("Content-Type", content_type.as_str())
    }

    /// Sets a query parameter, replacing any previous value for the same name.
    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    /// Sets multiple query parameters.
    #[must_use]
    pub fn with_query_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query_params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets a body parameter, replacing any previous value for the same name.
    ///
    /// Body parameters are JSON-encoded into the body at dispatch time, unless
    /// a body was set explicitly.
    #[must_use]
    pub fn with_body_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.body_params.insert(name.into(), value.into());
        self
    }

    /// Sets basic-auth credentials.
    #[must_use]
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some(BasicAuth::new(username, password));
        self
    }

    // ========================================================================
    // Body
    // ========================================================================

    /// Sets a JSON body serialized from `value`.
    ///
    /// A serialization failure latches [`Error::JsonSerialization`] and leaves
    /// the current body untouched.
    #[must_use]
    pub fn with_body<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Self {
        match crate::to_json(value) {
            Ok(body) => {
                self.body = body;
                self.content_type = Some(ContentType::Json);
            }
            Err(err) => self.latch(err),
        }
        self
    }

    /// Sets a form-urlencoded body serialized from `value`.
    ///
    /// A serialization failure latches [`Error::FormSerialization`].
    #[must_use]
    pub fn with_form_body<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Self {
        match crate::to_form(value) {
            Ok(body) => {
                self.body = body;
                self.content_type = Some(ContentType::FormUrlEncoded);
            }
            Err(err) => self.latch(err),
        }
        self
    }

    /// Sets the body bytes verbatim.
    #[must_use]
    pub fn with_raw_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self.content_type = None;
        self
    }

    // ========================================================================
    // Templates & finalization
    // ========================================================================

    /// Replaces this spec with an independent copy of `template`.
    ///
    /// Everything is copied, including a latched error; later changes to either
    /// spec do not affect the other.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn with_template(self, template: &Self) -> Self {
        template.clone()
    }

    /// Validates the spec.
    ///
    /// Checks, in order: a latched configuration error, a verb, a non-empty
    /// URL. On success the spec is returned unchanged.
    pub fn build(mut self) -> Result<Self> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        if self.method.is_none() {
            return Err(Error::MissingVerb);
        }
        if self.url.is_empty() {
            return Err(Error::MissingUrl);
        }
        Ok(self)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// HTTP method, if set.
    #[must_use]
    pub const fn method(&self) -> Option<Method> {
        self.method
    }

    /// URL as configured (without query parameters).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name, ignoring case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Query parameters.
    #[must_use]
    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query_params
    }

    /// Body parameters.
    #[must_use]
    pub fn body_params(&self) -> &BTreeMap<String, String> {
        &self.body_params
    }

    /// Body bytes, empty if none were set.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Basic-auth credentials, if set.
    #[must_use]
    pub const fn basic_auth(&self) -> Option<&BasicAuth> {
        self.basic_auth.as_ref()
    }

    /// The latched configuration error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    const TEST_URL: &str = "http://localhost:8081/";

    #[derive(serde::Serialize)]
    struct Nested {
        field: String,
        field2: i32,
        field3: u32,
    }

    #[derive(serde::Serialize)]
    struct Employee {
        name: String,
        job_title: String,
        nested: Nested,
    }

    fn employee() -> Employee {
        Employee {
            name: "name".to_string(),
            job_title: "jobTitle1".to_string(),
            nested: Nested {
                field: "field1".to_string(),
                field2: 0,
                field3: 0,
            },
        }
    }

    fn spec_with(method: Method, url: &str) -> RequestSpec {
        RequestSpec::new().with_method(method).with_url(url)
    }

    #[test]
    fn new_spec_is_empty() {
        let spec = RequestSpec::new();

        assert!(spec.method().is_none());
        assert!(spec.url().is_empty());
        assert!(spec.headers().is_empty());
        assert!(spec.query_params().is_empty());
        assert!(spec.body_params().is_empty());
        assert!(spec.body().is_empty());
        assert!(spec.basic_auth().is_none());
        assert!(spec.error().is_none());
    }

    #[test]
    fn with_header_last_write_wins() {
        let spec = RequestSpec::new()
            .with_header("testKey", "first")
            .with_header("other", "value")
            .with_header("testKey", "second");

        assert_eq!(spec.header("testKey"), Some("second"));
        assert_eq!(spec.header("other"), Some("value"));
        assert_eq!(spec.headers().len(), 2);
    }

    #[test]
    fn with_headers_extends() {
        let spec = RequestSpec::new()
            .with_header("a", "1")
            .with_headers([("a", "2"), ("b", "3")]);

        assert_eq!(spec.header("a"), Some("2"));
        assert_eq!(spec.header("b"), Some("3"));
    }

    #[test]
    fn with_header_replaces_name_in_any_case() {
        let spec = RequestSpec::new()
            .with_header("content-type", "text/plain")
            .with_content_type(ContentType::Json);

        assert_eq!(spec.headers().len(), 1);
        assert_eq!(spec.headers().get("Content-Type").map(String::as_str), Some("application/json"));
        assert_eq!(spec.header("CONTENT-TYPE"), Some("application/json"));

        let spec = RequestSpec::new().with_headers([("X-Tenant", "a"), ("x-tenant", "b")]);
        assert_eq!(spec.headers().len(), 1);
        assert_eq!(spec.headers().get("x-tenant").map(String::as_str), Some("b"));
    }

    #[test]
    fn with_query_param_last_write_wins() {
        let spec = RequestSpec::new()
            .with_query_param("testKey", "first")
            .with_query_params([("testKey", "second"), ("page", "2")]);

        assert_eq!(spec.query_params().get("testKey").map(String::as_str), Some("second"));
        assert_eq!(spec.query_params().get("page").map(String::as_str), Some("2"));
    }

    #[test]
    fn with_body_param_last_write_wins() {
        let spec = RequestSpec::new()
            .with_body_param("testKey", "first")
            .with_body_param("testKey", "testValue");

        assert_eq!(spec.body_params().len(), 1);
        assert_eq!(spec.body_params().get("testKey").map(String::as_str), Some("testValue"));
    }

    #[test]
    fn with_url_sets_verbatim() {
        let spec = RequestSpec::new().with_url(TEST_URL);
        assert_eq!(spec.url(), TEST_URL);
    }

    #[test]
    fn with_basic_auth_sets_credentials() {
        let spec = RequestSpec::new().with_basic_auth("user", "pass");

        assert_eq!(spec.basic_auth(), Some(&BasicAuth::new("user", "pass")));
    }

    #[test]
    fn basic_auth_header_value_and_debug() {
        let auth = BasicAuth::new("user", "pass");

        assert_eq!(auth.header_value(), "Basic dXNlcjpwYXNz");
        let debug = format!("{auth:?}");
        assert!(debug.contains("user"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("\"pass\""));
    }

    #[test]
    fn verb_setters() {
        let cases: [(fn(RequestSpec) -> RequestSpec, Method); 9] = [
            (RequestSpec::get, Method::Get),
            (RequestSpec::put, Method::Put),
            (RequestSpec::post, Method::Post),
            (RequestSpec::delete, Method::Delete),
            (RequestSpec::patch, Method::Patch),
            (RequestSpec::head, Method::Head),
            (RequestSpec::trace, Method::Trace),
            (RequestSpec::connect, Method::Connect),
            (RequestSpec::options, Method::Options),
        ];

        for (set, expected) in cases {
            let spec = set(RequestSpec::new());
            assert_eq!(spec.method(), Some(expected), "verb {expected}");
            assert!(spec.error().is_none());
        }
    }

    #[test]
    fn with_verb_parses_token() {
        let spec = RequestSpec::new().with_verb("PATCH");
        assert_eq!(spec.method(), Some(Method::Patch));
        assert!(spec.error().is_none());
    }

    #[test]
    fn with_verb_latches_unknown_token() {
        let spec = RequestSpec::new().get().with_verb("\\\\\\");

        assert_eq!(spec.method(), Some(Method::Get));
        let_assert!(Some(Error::InvalidVerb(token)) = spec.error());
        check!(token == "\\\\\\");
    }

    #[test]
    fn with_id_on_every_verb() {
        let id = "8s09df890asd8";
        for method in Method::ALL {
            let spec = spec_with(method, TEST_URL).with_id(id);

            if method.supports_id() {
                assert_eq!(spec.url(), "http://localhost:8081/8s09df890asd8");
                assert!(spec.error().is_none());
            } else {
                assert_eq!(spec.url(), TEST_URL);
                let_assert!(Some(Error::IdNotSupported(verb)) = spec.error());
                check!(verb == method.as_str());
            }
        }
    }

    #[test]
    fn with_id_joins_with_single_slash() {
        let spec = spec_with(Method::Get, "http://host/").with_id(42);
        assert_eq!(spec.url(), "http://host/42");

        let spec = spec_with(Method::Delete, "http://host/users").with_id(7);
        assert_eq!(spec.url(), "http://host/users/7");
    }

    #[test]
    fn with_id_strips_only_one_trailing_slash() {
        let spec = spec_with(Method::Put, "http://host//").with_id(42);
        assert_eq!(spec.url(), "http://host//42");
    }

    #[test]
    fn with_id_without_verb_latches() {
        let spec = RequestSpec::new().with_url(TEST_URL).with_id("42");

        assert_eq!(spec.url(), TEST_URL);
        let_assert!(Some(Error::IdNotSupported(verb)) = spec.error());
        check!(verb == "<unset>");
    }

    #[test]
    fn with_body_matches_independent_serialization() {
        let record = employee();
        let spec = RequestSpec::new().with_body(&record);
        let expected = serde_json::to_vec(&record).expect("serialize");
        assert_eq!(spec.body().as_ref(), expected.as_slice());

        let animals = BTreeMap::from([("90", "Dog"), ("91", "Cat"), ("92", "Cow")]);
        let spec = RequestSpec::new().with_body(&animals);
        let expected = serde_json::to_vec(&animals).expect("serialize");
        assert_eq!(spec.body().as_ref(), expected.as_slice());
        assert!(spec.error().is_none());
    }

    #[test]
    fn with_body_failure_latches_and_keeps_body() {
        let bad = BTreeMap::from([(vec![1_u8], "value")]);
        let spec = RequestSpec::new().with_raw_body("kept").with_body(&bad);

        assert_eq!(spec.body().as_ref(), b"kept");
        let_assert!(Some(Error::JsonSerialization(_)) = spec.error());
    }

    #[test]
    fn with_form_body_encodes_fields() {
        let fields = BTreeMap::from([("user", "alice"), ("role", "admin")]);
        let spec = RequestSpec::new().with_form_body(&fields);
        assert_eq!(spec.body().as_ref(), b"role=admin&user=alice");
        assert!(spec.error().is_none());
    }

    #[test]
    fn with_form_body_failure_latches_and_keeps_body() {
        let nested = BTreeMap::from([("outer", BTreeMap::from([("inner", "value")]))]);
        let spec = RequestSpec::new()
            .with_raw_body("kept")
            .with_form_body(&nested);

        assert_eq!(spec.body().as_ref(), b"kept");
        let_assert!(Some(Error::FormSerialization(_)) = spec.error());
    }

    #[test]
    fn first_latched_error_wins() {
        let bad = BTreeMap::from([(vec![1_u8], "value")]);
        let spec = spec_with(Method::Post, TEST_URL)
            .with_id("42")
            .with_body(&bad)
            .with_verb("nope")
            .get()
            .with_id("43")
            .with_header("still", "fluent");

        assert_eq!(spec.header("still"), Some("fluent"));
        assert_eq!(spec.url(), "http://localhost:8081/43");
        let_assert!(Err(Error::IdNotSupported(verb)) = spec.build());
        check!(verb == "POST");
    }

    #[test]
    fn build_succeeds_with_verb_and_url() {
        let spec = RequestSpec::new()
            .get()
            .with_url(TEST_URL)
            .with_body(&BTreeMap::from([("key", "value")]))
            .with_query_param("newKey", "newValue")
            .with_query_param("newKey2", "newValue2")
            .build()
            .expect("valid spec");

        assert_eq!(spec.method(), Some(Method::Get));
        assert_eq!(spec.url(), TEST_URL);
        assert_eq!(spec.body().as_ref(), br#"{"key":"value"}"#);
        assert_eq!(spec.query_params().get("newKey").map(String::as_str), Some("newValue"));

        RequestSpec::new()
            .get()
            .with_url(TEST_URL)
            .with_body_param("bodyParam", "bodyparam")
            .build()
            .expect("valid spec with body params");
    }

    #[test]
    fn build_reports_missing_parts() {
        let_assert!(Err(Error::MissingVerb) = RequestSpec::new().build());
        let_assert!(Err(Error::MissingUrl) = RequestSpec::new().get().build());
        let_assert!(Err(Error::MissingVerb) = RequestSpec::new().with_url(TEST_URL).build());
    }

    #[test]
    fn build_reports_latched_error_before_missing_parts() {
        let spec = RequestSpec::new().with_id("42");
        let_assert!(Err(Error::IdNotSupported(_)) = spec.build());
    }

    #[test]
    fn with_template_copies_everything() {
        let template = RequestSpec::new()
            .get()
            .with_url(TEST_URL)
            .with_body(&BTreeMap::from([("key", "value")]))
            .with_query_param("newKey", "newValue")
            .with_basic_auth("user", "pass")
            .build()
            .expect("valid template");

        let spec = RequestSpec::new().with_header("dropped", "yes").with_template(&template);

        assert_eq!(spec.method(), template.method());
        assert_eq!(spec.url(), template.url());
        assert_eq!(spec.headers(), template.headers());
        assert_eq!(spec.query_params(), template.query_params());
        assert_eq!(spec.body(), template.body());
        assert_eq!(spec.basic_auth(), template.basic_auth());
        assert!(spec.header("dropped").is_none());
    }

    #[test]
    fn with_template_is_independent() {
        let template = spec_with(Method::Put, TEST_URL).with_query_param("shared", "original");

        let copy = RequestSpec::new()
            .with_template(&template)
            .with_query_param("shared", "changed")
            .with_id("1");

        assert_eq!(template.query_params().get("shared").map(String::as_str), Some("original"));
        assert_eq!(template.url(), TEST_URL);
        assert_eq!(copy.url(), "http://localhost:8081/1");
    }

    #[test]
    fn with_template_carries_latched_error() {
        let template = spec_with(Method::Post, TEST_URL).with_id("42");
        let spec = RequestSpec::new().with_template(&template);

        let_assert!(Err(Error::IdNotSupported(_)) = spec.build());
    }
}
