use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::models::Cart;
use crate::domain::cart::models::CartLine;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<CartData>, ApiError> {
    state
        .cart_service
        .get_cart(&user.id)
        .await
        .and_then(|cart| CartData::try_from(&cart))
        .map_err(ApiError::from)
        .map(|data| ApiSuccess::new(StatusCode::OK, data))
}

/// Cart as exposed over HTTP. Every cart handler answers with the resulting cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartData {
    pub user_id: String,
    pub lines: Vec<CartLineData>,
    pub item_count: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineData {
    pub product_id: String,
    pub slug: String,
    pub name: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub line_total: i64,
}

impl From<&CartLine> for CartLineData {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            slug: line.slug.as_str().to_string(),
            name: line.name.as_str().to_string(),
            unit_price: line.unit_price.amount(),
            quantity: line.quantity.value(),
            line_total: line.line_total(),
        }
    }
}

impl TryFrom<&Cart> for CartData {
    type Error = CartError;

    /// Fails when prices changed after the lines were added and the total no longer fits.
    fn try_from(cart: &Cart) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: cart.user_id.to_string(),
            lines: cart.lines.iter().map(Into::into).collect(),
            item_count: cart.item_count(),
            total: cart.total().ok_or(CartError::TotalOverflow)?,
        })
    }
}
