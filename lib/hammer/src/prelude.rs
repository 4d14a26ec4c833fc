//! Prelude module for convenient imports.
//!
//! ```ignore
//! use hammer::prelude::*;
//! ```

pub use crate::{
    ContentType, Error, HyperTransport, Method, Request, RequestSpec, Response, Result,
    Transport, TransportConfig,
};
pub use serde::Serialize;
