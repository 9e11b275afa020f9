use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::get_product::ProductData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::Stock;
use crate::domain::product::models::UpdateProductCommand;
use crate::inbound::http::router::AppState;

pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product_id =
        ProductId::from_string(&product_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .product_service
        .update_product(&product_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}

/// HTTP request body for updating a product (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub quantity: Option<i32>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub olfactory_profile: Option<String>,
    pub description: Option<String>,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ProductError> {
        // Validation happens here - errors are automatically converted via #[from]
        Ok(UpdateProductCommand {
            name: self.name.map(ProductName::new).transpose()?,
            price: self.price.map(Price::new).transpose()?,
            quantity: self.quantity.map(Stock::new).transpose()?,
            image_url: self.image_url,
            category: self.category,
            olfactory_profile: self.olfactory_profile,
            description: self.description,
        })
    }
}
