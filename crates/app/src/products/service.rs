//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::products::{
    errors::ProductsServiceError,
    models::{NewProduct, Product, ProductUpdate},
    repository::ProductsRepository,
};

#[derive(Clone)]
pub struct CatalogProductsService {
    repository: Arc<dyn ProductsRepository>,
}

impl std::fmt::Debug for CatalogProductsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogProductsService").finish_non_exhaustive()
    }
}

impl CatalogProductsService {
    #[must_use]
    pub(crate) fn new(repository: Arc<dyn ProductsRepository>) -> Self {
        Self { repository }
    }
}

fn ensure_valid_price(price: f64) -> Result<(), ProductsServiceError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ProductsServiceError::InvalidPrice)
    }
}

#[async_trait]
impl ProductsService for CatalogProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        self.repository.list_products().await
    }

    async fn get_product(&self, uuid: Uuid) -> Result<Option<Product>, ProductsServiceError> {
        self.repository.get_product(uuid).await
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        ensure_valid_price(product.price)?;

        self.repository.create_product(product).await
    }

    async fn update_product(
        &self,
        uuid: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        ensure_valid_price(update.price)?;

        self.repository.update_product(uuid, update).await
    }

    async fn delete_product(&self, uuid: Uuid) -> Result<(), ProductsServiceError> {
        self.repository.delete_product(uuid).await
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product, or `None` when it does not exist.
    async fn get_product(&self, uuid: Uuid) -> Result<Option<Product>, ProductsServiceError>;

    /// Creates a new product. The identifier and timestamps are assigned on insert.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Updates the name and price of the product with the given UUID.
    async fn update_product(
        &self,
        uuid: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes the product with the given UUID. Missing products are ignored.
    async fn delete_product(&self, uuid: Uuid) -> Result<(), ProductsServiceError>;
}
