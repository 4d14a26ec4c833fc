//! Core types for the hammer fluent HTTP request builder.
//!
//! This crate provides the foundational types used by hammer:
//! - [`RequestSpec`] - fluent, error-latching request description
//! - [`Method`] - the nine HTTP verbs
//! - [`Request`] - finalized request handed to a transport
//! - [`Response`] - status and raw body reported by a transport
//! - [`Transport`] - the capability that actually sends requests
//! - [`Error`] and [`Result`] - Error handling
//!
//! The flow is: configure a [`RequestSpec`], call [`RequestSpec::build`] to
//! surface any latched error, then [`RequestSpec::dispatch`] it through a
//! [`Transport`].

mod body;
mod builder;
mod client;
mod error;
mod method;
pub mod prelude;
mod request;
mod response;

pub use body::{ContentType, to_form, to_json, to_query_string};
pub use builder::{BasicAuth, RequestSpec};
pub use client::Transport;
pub use error::{Error, Result};
pub use method::Method;
pub use request::Request;
pub use response::Response;
