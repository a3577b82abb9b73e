//! List Products Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, Reply},
    extensions::*,
    products::models::ProductResponse,
    state::State,
};

/// List Products Handler
///
/// Returns every product.
#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Reply<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state.app.products.list_products().await?;

    Ok(Reply::ok(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}
