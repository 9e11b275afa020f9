use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::models::Cart;
use crate::domain::cart::models::CartLine;
use crate::domain::cart::models::LineQuantity;
use crate::domain::cart::ports::CartRepository;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::ProductSlug;
use crate::domain::user::models::UserId;

pub struct PostgresCartRepository {
    pool: PgPool,
}

impl PostgresCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_line(row: PgRow) -> Result<CartLine, CartError> {
        let corrupt = |e: String| CartError::DatabaseError(format!("Corrupt cart row: {}", e));

        Ok(CartLine {
            product_id: ProductId(row.get("product_id")),
            slug: ProductSlug::new(row.get("slug")).map_err(|e| corrupt(e.to_string()))?,
            name: ProductName::new(row.get("name")).map_err(|e| corrupt(e.to_string()))?,
            unit_price: Price::new(row.get("price")).map_err(|e| corrupt(e.to_string()))?,
            quantity: LineQuantity::new(row.get("quantity"))?,
        })
    }
}

#[async_trait]
impl CartRepository for PostgresCartRepository {
    async fn find_cart(&self, user_id: &UserId) -> Result<Cart, CartError> {
        let rows = sqlx::query(
            r#"
            SELECT ci.product_id, p.slug, p.name, p.price, ci.quantity
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.user_id = $1
            ORDER BY ci.added_at ASC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        let lines = rows
            .into_iter()
            .map(Self::row_to_line)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart {
            user_id: *user_id,
            lines,
        })
    }

    async fn upsert_line(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: LineQuantity,
    ) -> Result<(), CartError> {
        sqlx::query(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity, added_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, product_id) DO UPDATE SET quantity = EXCLUDED.quantity
            "#,
        )
        .bind(user_id.0)
        .bind(product_id.as_uuid())
        .bind(quantity.value())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation()
                    && db_err.constraint() == Some("cart_items_product_id_fkey")
                {
                    return CartError::ProductNotFound(product_id.to_string());
                }
            }
            CartError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn remove_line(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, CartError> {
        let result = sqlx::query(
            r#"
            DELETE FROM cart_items
            WHERE user_id = $1 AND product_id = $2
            "#,
        )
        .bind(user_id.0)
        .bind(product_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, user_id: &UserId) -> Result<u64, CartError> {
        let result = sqlx::query(
            r#"
            DELETE FROM cart_items
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| CartError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
