//! Turning a spec into a wire request and sending it.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::RequestSpec;
use crate::{ContentType, Error, Request, Response, Result, Transport};

const AUTHORIZATION: &str = "Authorization";
const CONTENT_TYPE: &str = "Content-Type";

fn has_header(headers: &HashMap<String, String>, name: &str) -> bool {
    headers.keys().any(|key| key.eq_ignore_ascii_case(name))
}

/// Appends `query` to the query component of `url`, ahead of any `#fragment`.
fn append_query(url: &mut String, query: &str) {
    let fragment = url.find('#').map(|at| url.split_off(at));
    if !url.contains('?') {
        url.push('?');
    } else if !url.ends_with(['?', '&']) {
        url.push('&');
    }
    url.push_str(query);
    if let Some(fragment) = fragment {
        url.push_str(&fragment);
    }
}

impl RequestSpec {
    /// Validates the spec and assembles the outgoing [`Request`].
    ///
    /// - Query parameters are appended to the URL as a query string.
    /// - When no body was set, non-empty body parameters become a JSON body.
    /// - Basic-auth credentials become the `Authorization` header.
    /// - A body set through [`with_body`](Self::with_body) or
    ///   [`with_form_body`](Self::with_form_body) gets its `Content-Type`,
    ///   unless the caller already set one.
    pub fn into_request(self) -> Result<Request> {
        let spec = self.build()?;
        let method = spec.method.ok_or(Error::MissingVerb)?;

        let (body, content_type) = if spec.body.is_empty() && !spec.body_params.is_empty() {
            (crate::to_json(&spec.body_params)?, Some(ContentType::Json))
        } else {
            (spec.body, spec.content_type)
        };

        let mut url = spec.url;
        if !spec.query_params.is_empty() {
            append_query(&mut url, &crate::to_query_string(&spec.query_params)?);
        }

        let mut headers = spec.headers;
        if let Some(content_type) = content_type.filter(|_| !body.is_empty())
            && !has_header(&headers, CONTENT_TYPE)
        {
            headers.insert(CONTENT_TYPE.to_string(), content_type.as_str().to_string());
        }
        if let Some(auth) = &spec.basic_auth {
            headers.retain(|name, _| !name.eq_ignore_ascii_case(AUTHORIZATION));
            headers.insert(AUTHORIZATION.to_string(), auth.header_value());
        }

        Ok(Request::new(method, url, headers, body))
    }

    /// Validates the spec and sends it through `transport`.
    ///
    /// Nothing reaches the transport when validation fails. Errors reported by
    /// the transport are returned unchanged; on success the transport's status
    /// and body are returned verbatim.
    pub async fn dispatch<T: Transport>(self, transport: &T) -> Result<Response> {
        let request = self
            .into_request()
            .inspect_err(|err| warn!(error = %err, "request rejected before dispatch"))?;

        debug!(method = %request.method(), url = %request.url(), "dispatching request");
        transport
            .execute(request)
            .await
            .inspect_err(|err| warn!(error = %err, "transport failed"))
    }
}
