use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_product::ProductData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::ProductSlug;
use crate::domain::product::models::Stock;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(body): Json<CreateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let product = state
        .product_service
        .create_product(body.try_into_command()?)
        .await?;

    tracing::debug!(product_id = %product.id, created_by = %user.id, "Catalogue entry added");

    Ok(ApiSuccess::new(StatusCode::CREATED, (&product).into()))
}

/// HTTP request body for creating a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateProductRequest {
    name: String,
    slug: String,
    price: i64,
    quantity: i32,
    image_url: Option<String>,
    category: Option<String>,
    olfactory_profile: Option<String>,
    description: Option<String>,
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ProductError> {
        Ok(CreateProductCommand {
            name: ProductName::new(self.name)?,
            slug: ProductSlug::new(self.slug)?,
            price: Price::new(self.price)?,
            quantity: Stock::new(self.quantity)?,
            image_url: self.image_url,
            category: self.category,
            olfactory_profile: self.olfactory_profile,
            description: self.description,
        })
    }
}
