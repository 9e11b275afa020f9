use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::get_cart::CartData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::models::ProductId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn remove_cart_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<CartData>, ApiError> {
    let product_id =
        ProductId::from_string(&product_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .cart_service
        .remove_item(&user.id, &product_id)
        .await
        .and_then(|cart| CartData::try_from(&cart))
        .map_err(ApiError::from)
        .map(|data| ApiSuccess::new(StatusCode::OK, data))
}
