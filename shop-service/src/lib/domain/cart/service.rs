use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::models::Cart;
use crate::domain::cart::models::CartLine;
use crate::domain::cart::models::LineQuantity;
use crate::domain::cart::ports::CartRepository;
use crate::domain::cart::ports::CartServicePort;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;
use crate::domain::user::models::UserId;

/// Domain service for shopping carts.
///
/// Reads products through the product repository to enforce stock limits.
pub struct CartService<CR, PR>
where
    CR: CartRepository,
    PR: ProductRepository,
{
    carts: Arc<CR>,
    products: Arc<PR>,
}

impl<CR, PR> CartService<CR, PR>
where
    CR: CartRepository,
    PR: ProductRepository,
{
    pub fn new(carts: Arc<CR>, products: Arc<PR>) -> Self {
        Self { carts, products }
    }

    async fn load_product(&self, product_id: &ProductId) -> Result<Product, CartError> {
        self.products
            .find_by_id(product_id)
            .await?
            .ok_or(CartError::ProductNotFound(product_id.to_string()))
    }

    fn ensure_in_stock(product: &Product, requested: i64) -> Result<(), CartError> {
        let available = product.quantity.value();
        if requested > i64::from(available) {
            return Err(CartError::InsufficientStock {
                product_id: product.id.to_string(),
                requested,
                available,
            });
        }
        Ok(())
    }

    /// Reject a line change whose resulting cart total would not fit in an `i64`.
    fn ensure_total_fits(
        cart: &Cart,
        product: &Product,
        quantity: LineQuantity,
    ) -> Result<(), CartError> {
        let mut projected = cart.clone();
        projected.lines.retain(|line| line.product_id != product.id);
        projected.lines.push(CartLine {
            product_id: product.id,
            slug: product.slug.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
        });

        projected
            .total()
            .map(|_| ())
            .ok_or(CartError::TotalOverflow)
    }
}

#[async_trait]
impl<CR, PR> CartServicePort for CartService<CR, PR>
where
    CR: CartRepository,
    PR: ProductRepository,
{
    async fn get_cart(&self, user_id: &UserId) -> Result<Cart, CartError> {
        self.carts.find_cart(user_id).await
    }

    async fn add_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: LineQuantity,
    ) -> Result<Cart, CartError> {
        let product = self.load_product(product_id).await?;
        let cart = self.carts.find_cart(user_id).await?;

        let existing = cart
            .line(product_id)
            .map_or(0, |line| i64::from(line.quantity.value()));
        let requested = existing + i64::from(quantity.value());
        Self::ensure_in_stock(&product, requested)?;

        // requested <= stock, which is an i32
        let merged = LineQuantity::new(requested as i32)?;
        Self::ensure_total_fits(&cart, &product, merged)?;
        self.carts.upsert_line(user_id, product_id, merged).await?;
        tracing::debug!(
            user_id = %user_id,
            product_id = %product_id,
            quantity = merged.value(),
            "Cart line added"
        );

        self.carts.find_cart(user_id).await
    }

    async fn set_item_quantity(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: LineQuantity,
    ) -> Result<Cart, CartError> {
        let cart = self.carts.find_cart(user_id).await?;
        if cart.line(product_id).is_none() {
            return Err(CartError::LineNotFound(product_id.to_string()));
        }

        let product = self.load_product(product_id).await?;
        Self::ensure_in_stock(&product, i64::from(quantity.value()))?;
        Self::ensure_total_fits(&cart, &product, quantity)?;

        self.carts.upsert_line(user_id, product_id, quantity).await?;

        self.carts.find_cart(user_id).await
    }

    async fn remove_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<Cart, CartError> {
        if !self.carts.remove_line(user_id, product_id).await? {
            return Err(CartError::LineNotFound(product_id.to_string()));
        }

        self.carts.find_cart(user_id).await
    }

    async fn clear_cart(&self, user_id: &UserId) -> Result<Cart, CartError> {
        let removed = self.carts.clear(user_id).await?;
        tracing::debug!(user_id = %user_id, removed, "Cart cleared");

        Ok(Cart::empty(*user_id))
    }
}
