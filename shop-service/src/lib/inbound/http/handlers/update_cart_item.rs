use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_cart::CartData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::models::LineQuantity;
use crate::domain::product::models::ProductId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_cart_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
    Json(body): Json<UpdateCartItemRequest>,
) -> Result<ApiSuccess<CartData>, ApiError> {
    let product_id =
        ProductId::from_string(&product_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let quantity = LineQuantity::new(body.quantity).map_err(CartError::from)?;

    state
        .cart_service
        .set_item_quantity(&user.id, &product_id, quantity)
        .await
        .and_then(|cart| CartData::try_from(&cart))
        .map_err(ApiError::from)
        .map(|data| ApiSuccess::new(StatusCode::OK, data))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateCartItemRequest {
    quantity: i32,
}
