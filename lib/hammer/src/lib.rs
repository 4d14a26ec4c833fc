//! Fluent HTTP request builder.
//!
//! Configure a request through chained calls, let errors latch instead of
//! aborting the chain, surface them once at [`RequestSpec::build`], then
//! dispatch through a [`Transport`]. [`HyperTransport`] is the bundled
//! transport.
//!
//! # Example
//!
//! ```ignore
//! use hammer::prelude::*;
//!
//! #[derive(Serialize)]
//! struct NewUser {
//!     name: String,
//! }
//!
//! let transport = HyperTransport::builder().with_logging().build();
//!
//! let response = RequestSpec::new()
//!     .post()
//!     .with_url("https://api.example.com/users")
//!     .with_body(&NewUser { name: "Ada".to_string() })
//!     .with_basic_auth("admin", "secret")
//!     .dispatch(&transport)
//!     .await?;
//!
//! assert!(response.is_success());
//! ```

mod config;
pub mod middleware;
pub mod prelude;
mod transport;

// Re-export transport types
pub use config::{DEFAULT_USER_AGENT, TransportConfig, TransportConfigBuilder};
pub use transport::{BoxedService, HyperTransport, HyperTransportBuilder, ServiceFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use hammer_core::{
    BasicAuth, ContentType, Error, Method, Request, RequestSpec, Response, Result, Transport,
    to_form, to_json, to_query_string,
};
