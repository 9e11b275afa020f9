use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::get_product::ProductData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::models::ProductId;
use crate::inbound::http::router::AppState;

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id =
        ProductId::from_string(&product_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .product_service
        .delete_product(&product_id)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}

pub async fn delete_all_products(
    State(state): State<AppState>,
) -> Result<ApiSuccess<DeleteAllProductsResponseData>, ApiError> {
    let deleted = state.product_service.delete_all_products().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DeleteAllProductsResponseData { deleted },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteAllProductsResponseData {
    pub deleted: u64,
}
