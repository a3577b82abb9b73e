//! Request-level logging, request IDs, and HTTP metrics.

mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};

use super::metrics::HttpMetrics;

use request_ids::RequestId;

/// Per-request span, access log and metrics hoop.
#[derive(Debug)]
pub(crate) struct RequestLogging {
    metrics: Option<HttpMetrics>,
    slow_request_threshold: Duration,
}

impl RequestLogging {
    pub(crate) fn new(metrics: Option<HttpMetrics>, slow_request_threshold: Duration) -> Self {
        Self {
            metrics,
            slow_request_threshold,
        }
    }
}

#[handler]
impl RequestLogging {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if req.uri().path() == "/metrics" {
            ctrl.call_next(req, depot, res).await;
            return;
        }

        let started = Instant::now();

        let request_id = RequestId::from_request(req);
        request_id.propagate(depot, res);

        let method = req.method().to_string();
        let path = req.uri().path().to_owned();
        let route = spans::route_label(&path);
        let remote_addr = req.remote_addr().to_string();
        let _in_flight = self.metrics.as_ref().map(HttpMetrics::track_in_flight);

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            request_id = %request_id,
            method = %method,
            route = %route,
            remote_addr = %remote_addr,
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;

        let duration = started.elapsed();
        let status = res.status_code.unwrap_or(StatusCode::OK);
        let duration_ms = duration.as_millis();
        let threshold_ms = self.slow_request_threshold.as_millis();

        if let Some(metrics) = &self.metrics {
            metrics.observe_request(&method, route, status.as_u16(), duration.as_secs_f64());
        }

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            info!(status = status.as_u16(), duration_ms, "request.completed");

            if status.is_server_error() {
                error!(
                    status = status.as_u16(),
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    "server error response"
                );
            } else if status.is_client_error() {
                warn!(
                    status = status.as_u16(),
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    "client error response"
                );
            }

            if duration > self.slow_request_threshold {
                warn!(
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    duration_ms,
                    threshold_ms,
                    "slow request detected"
                );
            }
        });
    }
}
