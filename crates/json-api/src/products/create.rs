//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};
use tracing::info;

use crate::{
    envelope::{ApiError, Reply},
    extensions::*,
    products::models::{ProductResponse, product_request},
    state::State,
};

/// Create Product Handler
///
/// Responds `201 Created` with the stored product and its location.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Reply<ProductResponse>, ApiError> {
    let request = product_request(req).await?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .create_product(request.into())
        .await?;

    info!(product_id = %product.uuid, "created product");

    res.add_header(LOCATION, format!("/product/{}", product.uuid), true)
        .or_500("failed to set location header")?;

    Ok(Reply::created(product.into()))
}
