use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::models::Cart;
use crate::domain::cart::models::LineQuantity;
use crate::domain::product::models::ProductId;
use crate::domain::user::models::UserId;

/// Port for shopping cart operations. Every call is scoped to one user.
#[async_trait]
pub trait CartServicePort: Send + Sync + 'static {
    /// The user's current cart (empty if nothing was added).
    async fn get_cart(&self, user_id: &UserId) -> Result<Cart, CartError>;

    /// Add units of a product, merging with an existing line.
    ///
    /// # Errors
    /// * `ProductNotFound` - Product does not exist
    /// * `InsufficientStock` - Resulting quantity exceeds stock
    /// * `DatabaseError` - Database operation failed
    async fn add_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: LineQuantity,
    ) -> Result<Cart, CartError>;

    /// Replace the quantity of an existing line.
    ///
    /// # Errors
    /// * `LineNotFound` - Product is not in the cart
    /// * `ProductNotFound` - Product no longer exists
    /// * `InsufficientStock` - Quantity exceeds stock
    /// * `DatabaseError` - Database operation failed
    async fn set_item_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: LineQuantity,
    ) -> Result<Cart, CartError>;

    /// # Errors
    /// * `LineNotFound` - Product is not in the cart
    /// * `DatabaseError` - Database operation failed
    async fn remove_item(&self, user_id: &UserId, product_id: &ProductId)
        -> Result<Cart, CartError>;

    /// Remove every line from the cart.
    async fn clear_cart(&self, user_id: &UserId) -> Result<Cart, CartError>;
}

/// Persistence operations for carts.
#[async_trait]
pub trait CartRepository: Send + Sync + 'static {
    /// Load the user's lines joined with product name, slug and price.
    async fn find_cart(&self, user_id: &UserId) -> Result<Cart, CartError>;

    /// Insert the line or overwrite its quantity.
    async fn upsert_line(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: LineQuantity,
    ) -> Result<(), CartError>;

    /// Remove one line. Returns `false` if there was nothing to remove.
    async fn remove_line(&self, user_id: &UserId, product_id: &ProductId)
        -> Result<bool, CartError>;

    /// Remove all of the user's lines, returning how many were removed.
    async fn clear(&self, user_id: &UserId) -> Result<u64, CartError>;
}
