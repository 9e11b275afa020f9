use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::product::errors::AmountError;
use crate::domain::product::errors::ProductIdError;
use crate::domain::product::errors::ProductNameError;
use crate::domain::product::errors::ProductSlugError;

/// Product aggregate entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub slug: ProductSlug,
    pub price: Price,
    pub quantity: Stock,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub olfactory_profile: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    /// Generate a new random product ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a product ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name of a product. Trimmed, non-blank, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    const MAX_LENGTH: usize = 200;

    pub fn new(name: String) -> Result<Self, ProductNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if length == 0 {
            Err(ProductNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(ProductNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// URL-safe unique product handle, e.g. `lavender-oil-10ml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSlug(String);

impl ProductSlug {
    const MAX_LENGTH: usize = 100;

    /// # Errors
    /// * `Empty` - Slug is empty
    /// * `TooLong` - More than 100 characters
    /// * `InvalidCharacters` - Anything other than `[a-z0-9-]`, or a leading/trailing hyphen
    pub fn new(slug: String) -> Result<Self, ProductSlugError> {
        if slug.is_empty() {
            return Err(ProductSlugError::Empty);
        }
        if slug.len() > Self::MAX_LENGTH {
            return Err(ProductSlugError::TooLong {
                max: Self::MAX_LENGTH,
                actual: slug.len(),
            });
        }

        let valid_chars = slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid_chars || slug.starts_with('-') || slug.ends_with('-') {
            return Err(ProductSlugError::InvalidCharacters);
        }

        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unit price in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(i64);

impl Price {
    /// Largest accepted unit price. Any price times any `i32` quantity fits in an `i64`.
    pub const MAX: i64 = i64::MAX / i32::MAX as i64;

    pub fn new(amount: i64) -> Result<Self, AmountError> {
        if amount < 0 {
            Err(AmountError::NegativePrice(amount))
        } else if amount > Self::MAX {
            Err(AmountError::PriceTooHigh {
                max: Self::MAX,
                actual: amount,
            })
        } else {
            Ok(Self(amount))
        }
    }

    pub fn amount(&self) -> i64 {
        self.0
    }
}

/// Units in stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stock(i32);

impl Stock {
    pub fn new(quantity: i32) -> Result<Self, AmountError> {
        if quantity < 0 {
            Err(AmountError::NegativeStock(quantity))
        } else {
            Ok(Self(quantity))
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// Command to create a new product with validated fields
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: ProductName,
    pub slug: ProductSlug,
    pub price: Price,
    pub quantity: Stock,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub olfactory_profile: Option<String>,
    pub description: Option<String>,
}

/// Partial product update. Only provided fields change; the slug is fixed.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductCommand {
    pub name: Option<ProductName>,
    pub price: Option<Price>,
    pub quantity: Option<Stock>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub olfactory_profile: Option<String>,
    pub description: Option<String>,
}

impl UpdateProductCommand {
    /// Apply the provided fields onto `product`.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if self.image_url.is_some() {
            product.image_url = self.image_url;
        }
        if self.category.is_some() {
            product.category = self.category;
        }
        if self.olfactory_profile.is_some() {
            product.olfactory_profile = self.olfactory_profile;
        }
        if self.description.is_some() {
            product.description = self.description;
        }
    }
}
