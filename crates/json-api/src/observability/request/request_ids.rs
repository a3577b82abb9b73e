//! Request ID resolution and propagation.

use std::fmt;

use salvo::{
    Request,
    http::header::HeaderValue,
    prelude::{Depot, Response},
};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";
const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Correlation id for one request, taken from `x-request-id` or generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestId(String);

impl RequestId {
    pub(super) fn from_request(req: &Request) -> Self {
        Self::resolve(req.header::<String>(REQUEST_ID_HEADER))
    }

    fn resolve(header_value: Option<String>) -> Self {
        let value = header_value
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Uuid::now_v7().to_string());

        Self(value)
    }

    /// Expose the id to downstream handlers and echo it on the response.
    pub(super) fn propagate(&self, depot: &mut Depot, res: &mut Response) {
        depot.insert(REQUEST_ID_DEPOT_KEY, self.0.clone());

        match HeaderValue::from_str(&self.0) {
            Ok(value) => {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Err(source) => warn!(
                request_id = %self,
                "could not encode request id for response header: {source}"
            ),
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
