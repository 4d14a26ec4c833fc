//! Prelude module for convenient imports.
//!
//! ```
//! use hammer_core::prelude::*;
//! ```

pub use crate::{
    BasicAuth, ContentType, Error, Method, Request, RequestSpec, Response, Result, Transport,
    to_form, to_json,
};
