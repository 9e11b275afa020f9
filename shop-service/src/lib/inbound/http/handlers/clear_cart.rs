use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::get_cart::CartData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<CartData>, ApiError> {
    let cart = state.cart_service.clear_cart(&user.id).await?;

    tracing::debug!(user_id = %user.id, "Cart cleared");

    Ok(ApiSuccess::new(StatusCode::OK, CartData::try_from(&cart)?))
}
