//! Get Product Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    envelope::{ApiError, Reply},
    extensions::*,
    products::models::{ProductResponse, product_id},
    state::State,
};

/// Get Product Handler
///
/// Returns a product.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Reply<ProductResponse>, ApiError> {
    let uuid = product_id(req)?;
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("product not found"))?;

    Ok(Reply::ok(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use catalog_app::products::MockProductsService;

    use crate::{
        envelope::Envelope,
        test_helpers::{make_product, products_service, strict_products_mock},
    };

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("product/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let mut repo = MockProductsService::new();
        let uuid = Uuid::now_v7();

        let product = make_product(uuid);

        repo.expect_get_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(Some(product)));

        repo.expect_list_products().never();
        repo.expect_create_product().never();
        repo.expect_update_product().never();
        repo.expect_delete_product().never();

        let mut res = TestClient::get(format!("http://example.com/product/{uuid}"))
            .send(&make_service(repo))
            .await;

        let body: Envelope<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data, Some(ProductResponse::from(make_product(uuid))));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_renders_camel_case_fields() -> TestResult {
        let mut repo = MockProductsService::new();
        let uuid = Uuid::now_v7();

        repo.expect_get_product()
            .once()
            .return_once(move |_| Ok(Some(make_product(uuid))));

        repo.expect_list_products().never();
        repo.expect_create_product().never();
        repo.expect_update_product().never();
        repo.expect_delete_product().never();

        let mut res = TestClient::get(format!("http://example.com/product/{uuid}"))
            .send(&make_service(repo))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(body["data"]["id"], uuid.to_string());
        assert_eq!(body["data"]["createdAt"], "1970-01-01T00:00:00Z");
        assert_eq!(body["data"]["updatedAt"], "1970-01-01T00:00:00Z");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let mut repo = MockProductsService::new();
        let uuid = Uuid::now_v7();

        repo.expect_get_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Ok(None));

        repo.expect_list_products().never();
        repo.expect_create_product().never();
        repo.expect_update_product().never();
        repo.expect_delete_product().never();

        let mut res = TestClient::get(format!("http://example.com/product/{uuid}"))
            .send(&make_service(repo))
            .await;

        let body: Envelope<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.status, 404);
        assert_eq!(body.message, "product not found");
        assert!(body.data.is_none(), "404 carries no data");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_id_returns_400() -> TestResult {
        let mut res = TestClient::get("http://example.com/product/not-a-uuid")
            .send(&make_service(strict_products_mock()))
            .await;

        let body: Envelope<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "invalid product id");

        Ok(())
    }
}
