use thiserror::Error;

/// Error for ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for ProductName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductNameError {
    #[error("Product name cannot be empty")]
    Empty,

    #[error("Product name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for ProductSlug validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductSlugError {
    #[error("Slug cannot be empty")]
    Empty,

    #[error("Slug too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Slug may only contain lowercase letters, digits, and inner hyphens")]
    InvalidCharacters,
}

/// Error for price and stock amounts
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Price cannot be negative, got {0}")]
    NegativePrice(i64),

    #[error("Price too high: maximum {max}, got {actual}")]
    PriceTooHigh { max: i64, actual: i64 },

    #[error("Stock quantity cannot be negative, got {0}")]
    NegativeStock(i32),
}

/// Top-level error for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid product ID: {0}")]
    InvalidProductId(#[from] ProductIdError),

    #[error("Invalid product name: {0}")]
    InvalidName(#[from] ProductNameError),

    #[error("Invalid slug: {0}")]
    InvalidSlug(#[from] ProductSlugError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product not found with slug: {0}")]
    NotFoundBySlug(String),

    #[error("Slug already exists: {0}")]
    SlugAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
