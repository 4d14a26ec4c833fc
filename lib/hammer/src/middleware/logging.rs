//! Dispatch logging.
//!
//! Each request runs inside a `dispatch` span carrying its verb and URL.
//! Credentials never reach the log: only whether basic auth was applied.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Error, Request, Response, Result};

const REDACTED_HEADERS: [&str; 2] = ["authorization", "proxy-authorization"];

/// Layer that adds request/response logging.
///
/// # Example
///
/// ```ignore
/// use hammer::HyperTransport;
/// use hammer::middleware::LoggingLayer;
///
/// let transport = HyperTransport::builder()
///     .layer(LoggingLayer::new())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogLevel {
    /// Log at debug level (request details, headers included).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Logging<S> {
    /// Create a new logging service wrapping the given service.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }
}

/// Headers as logged: sorted, credentials replaced.
fn loggable_headers(request: &Request) -> BTreeMap<&str, &str> {
    request
        .headers()
        .iter()
        .map(|(name, value)| {
            let redacted = REDACTED_HEADERS
                .iter()
                .any(|sensitive| name.eq_ignore_ascii_case(sensitive));
            (name.as_str(), if redacted { "<redacted>" } else { value.as_str() })
        })
        .collect()
}

/// Whether the request carries credentials added by `with_basic_auth`.
fn uses_basic_auth(request: &Request) -> bool {
    request
        .header("Authorization")
        .is_some_and(|value| value.starts_with("Basic "))
}

fn status_class(response: &Response) -> &'static str {
    if response.is_success() {
        "success"
    } else if response.is_redirection() {
        "redirection"
    } else if response.is_client_error() {
        "client_error"
    } else if response.is_server_error() {
        "server_error"
    } else {
        "informational"
    }
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let verb = request.method();
        let span = span!(Level::INFO, "dispatch", %verb, url = %request.url());

        match self.level {
            LogLevel::Debug => debug!(
                parent: &span,
                basic_auth = uses_basic_auth(&request),
                content_type = request.header("Content-Type"),
                body_len = request.body().len(),
                headers = ?loggable_headers(&request),
                "dispatching"
            ),
            LogLevel::Info => info!(
                parent: &span,
                basic_auth = uses_basic_auth(&request),
                body_len = request.body().len(),
                "dispatching"
            ),
        }

        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) if response.is_success() => info!(
                        status = response.status(),
                        body_len = response.body().len(),
                        elapsed_ms,
                        "dispatched"
                    ),
                    Ok(response) => warn!(
                        status = response.status(),
                        class = status_class(response),
                        body_len = response.body().len(),
                        elapsed_ms,
                        "server answered with an error status"
                    ),
                    Err(err) => warn!(
                        error = %err,
                        connection = err.is_connection(),
                        elapsed_ms,
                        "transport failed"
                    ),
                }

                result
            }
            .instrument(span),
        )
    }
}
