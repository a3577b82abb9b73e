//! Products Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::products::{
    errors::ProductsServiceError,
    models::{NewProduct, Product, ProductUpdate},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(ProductsServiceError::from)
    }

    async fn get_product(&self, uuid: Uuid) -> Result<Option<Product>, ProductsServiceError> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(ProductsServiceError::from)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let now = SqlxTimestamp::from(Timestamp::now());

        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(Uuid::now_v7())
            .bind(product.name)
            .bind(product.price)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(ProductsServiceError::from)
    }

    async fn update_product(
        &self,
        uuid: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        // `fetch_one` yields `RowNotFound` for an unknown uuid, which maps to `NotFound`.
        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(uuid)
            .bind(update.name)
            .bind(update.price)
            .bind(SqlxTimestamp::from(Timestamp::now()))
            .fetch_one(&self.pool)
            .await
            .map_err(ProductsServiceError::from)
    }

    async fn delete_product(&self, uuid: Uuid) -> Result<(), ProductsServiceError> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(ProductsServiceError::from)?
            .rows_affected();

        tracing::debug!(product_uuid = %uuid, rows_affected, "deleted product");

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

/// Persistence contract for the `products` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub(crate) trait ProductsRepository: Send + Sync {
    /// Every stored product, in no particular order.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// The product with the given UUID, or `None` when no row matches.
    async fn get_product(&self, uuid: Uuid) -> Result<Option<Product>, ProductsServiceError>;

    /// Inserts a product with a fresh UUID and `created_at == updated_at`.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Overwrites name and price and refreshes `updated_at`.
    async fn update_product(
        &self,
        uuid: Uuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Removes the product. Unknown UUIDs are not an error.
    async fn delete_product(&self, uuid: Uuid) -> Result<(), ProductsServiceError>;
}
