//! Transport trait.
//!
//! A [`Transport`] is the only piece that touches the network. The core never
//! opens sockets itself; implement this trait to plug in a real HTTP client or
//! a test double.

use std::future::Future;

use crate::{Request, Response, Result};

/// Capability that sends a finalized request and reports the response.
///
/// # Example
///
/// ```
/// use hammer_core::{Request, Response, Result, Transport};
///
/// struct Echo;
///
/// impl Transport for Echo {
///     async fn execute(&self, request: Request) -> Result<Response> {
///         Ok(Response::new(200, request.body().clone()))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Send the request and return its status and body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be delivered or answered.
    /// [`RequestSpec::dispatch`](crate::RequestSpec::dispatch) hands this error
    /// back to the caller unchanged.
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}
