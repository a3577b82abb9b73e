//! Update Product Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{
    envelope::{ApiError, Reply},
    extensions::*,
    products::models::{ProductResponse, product_id, product_request},
    state::State,
};

/// Update Product Handler
///
/// Replaces the name and price and echoes the stored product.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<ProductResponse>, ApiError> {
    let uuid = product_id(req)?;
    let request = product_request(req).await?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .update_product(uuid, request.into())
        .await?;

    info!(product_id = %uuid, "updated product");

    Ok(Reply::ok(product.into()))
}
