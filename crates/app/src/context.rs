//! App Context

use std::sync::Arc;

use sqlx::{PgPool, migrate::MigrateError};
use thiserror::Error;

use crate::{
    database::{self, DatabaseConfig},
    products::{CatalogProductsService, ProductsService, repository::PgProductsRepository},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from database settings.
    ///
    /// Pending migrations are applied first when `database_run_migrations` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_database_config(config: &DatabaseConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(config)
            .await
            .map_err(AppInitError::Database)?;

        if config.database_run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            tracing::info!("database migrations applied");
        }

        Ok(Self::from_pool(pool))
    }

    /// Build application context from an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        let repository = Arc::new(PgProductsRepository::new(pool));

        Self {
            products: Arc::new(CatalogProductsService::new(repository)),
        }
    }
}
