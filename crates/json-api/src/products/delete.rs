//! Delete Product Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{
    envelope::{ApiError, Reply},
    extensions::*,
    products::models::product_id,
    state::State,
};

/// Delete Product Handler
///
/// Idempotent: deleting an unknown product still succeeds.
#[handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<Reply<()>, ApiError> {
    let uuid = product_id(req)?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state.app.products.delete_product(uuid).await?;

    info!(product_id = %uuid, "deleted product");

    Ok(Reply::message("successfully deleted product"))
}
