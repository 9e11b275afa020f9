use thiserror::Error;

use crate::domain::product::errors::ProductError;

/// Error for cart line quantity validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LineQuantityError {
    #[error("Quantity must be at least 1, got {0}")]
    NotPositive(i32),
}

/// Top-level error for all cart operations
#[derive(Debug, Clone, Error)]
pub enum CartError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] LineQuantityError),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Product {0} is not in the cart")]
    LineNotFound(String),

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i32,
    },

    #[error("Cart total exceeds the largest supported amount")]
    TotalOverflow,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<ProductError> for CartError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => CartError::ProductNotFound(id),
            other => CartError::DatabaseError(other.to_string()),
        }
    }
}
