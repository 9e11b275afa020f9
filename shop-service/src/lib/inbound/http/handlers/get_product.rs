use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductSlug;
use crate::inbound::http::router::AppState;

pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let slug = ProductSlug::new(slug.clone())
        .map_err(|_| ApiError::NotFound(format!("Product not found with slug: {}", slug)))?;

    state
        .product_service
        .get_product_by_slug(&slug)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}

/// Product as exposed over HTTP. Shared by every product handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductData {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: i64,
    pub quantity: i32,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub olfactory_profile: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.as_str().to_string(),
            slug: product.slug.as_str().to_string(),
            price: product.price.amount(),
            quantity: product.quantity.value(),
            image_url: product.image_url.clone(),
            category: product.category.clone(),
            olfactory_profile: product.olfactory_profile.clone(),
            description: product.description.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
