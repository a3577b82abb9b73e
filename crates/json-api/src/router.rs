//! App Router

use std::{sync::Arc, time::Duration};

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};

use crate::{
    healthcheck,
    observability::{HttpMetrics, MetricsEndpoint, RequestLogging},
    products,
    state::State,
};

/// Product routes.
pub(crate) fn products_router() -> Router {
    Router::new()
        .push(Router::with_path("products").get(products::index::handler))
        .push(
            Router::with_path("product").post(products::create::handler).push(
                Router::with_path("{id}")
                    .get(products::get::handler)
                    .put(products::update::handler)
                    .delete(products::delete::handler),
            ),
        )
}

/// Full application router with middleware.
///
/// `/metrics` is only mounted when `metrics` is present.
pub(crate) fn app_router(
    state: Arc<State>,
    metrics: Option<HttpMetrics>,
    slow_request_threshold: Duration,
) -> Router {
    let mut router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(RequestLogging::new(metrics.clone(), slow_request_threshold))
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler));

    if let Some(metrics) = metrics {
        router = router.push(Router::with_path("metrics").get(MetricsEndpoint::new(metrics)));
    }

    router.push(products_router())
}
