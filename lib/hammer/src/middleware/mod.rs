//! Tower middleware layers for the hyper transport.
//!
//! Layers wrap the innermost hyper service of a
//! [`HyperTransport`](crate::HyperTransport). Any tower layer whose service
//! speaks [`Request`](crate::Request) / [`Response`](crate::Response) can be
//! added with [`HyperTransportBuilder::layer`](crate::HyperTransportBuilder::layer).
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use hammer::HyperTransport;
//!
//! let transport = HyperTransport::builder()
//!     .with_logging()
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for custom middleware
pub use tower::{Layer, Service, ServiceBuilder};
