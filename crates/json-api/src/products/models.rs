//! Product wire models.

use jiff::Timestamp;
use salvo::Request;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use catalog_app::products::models::{NewProduct, Product, ProductUpdate};

use crate::envelope::ApiError;

/// Product as rendered in response envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,

    /// The product name
    pub name: String,

    /// The product price
    pub price: f64,

    /// When the product was created
    pub created_at: Timestamp,

    /// When the product was last updated
    pub updated_at: Timestamp,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.uuid,
            name: product.name,
            price: product.price,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Body accepted by create and update. Unknown fields such as `id` or
/// timestamps are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProductRequest {
    pub name: String,
    pub price: f64,
}

impl From<ProductRequest> for NewProduct {
    fn from(request: ProductRequest) -> Self {
        NewProduct {
            name: request.name,
            price: request.price,
        }
    }
}

impl From<ProductRequest> for ProductUpdate {
    fn from(request: ProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            price: request.price,
        }
    }
}

/// The `{id}` path segment as a UUID.
pub(crate) fn product_id(req: &Request) -> Result<Uuid, ApiError> {
    let raw = req.param::<String>("id").unwrap_or_default();

    Uuid::parse_str(&raw).map_err(|error| {
        debug!(product_id = %raw, "rejected product id: {error}");

        ApiError::bad_request("invalid product id")
    })
}

/// The JSON body as a [`ProductRequest`].
pub(crate) async fn product_request(req: &mut Request) -> Result<ProductRequest, ApiError> {
    req.parse_json::<ProductRequest>().await.map_err(|error| {
        debug!("rejected product payload: {error}");

        ApiError::bad_request("malformed product payload")
    })
}
