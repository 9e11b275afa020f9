use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::ProductSlug;
use crate::domain::product::models::Stock;
use crate::domain::product::ports::ProductRepository;

const PRODUCT_COLUMNS: &str = "id, name, slug, price, quantity, image_url, category, \
     olfactory_profile, description, created_at, updated_at";

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: PgRow) -> Result<Product, ProductError> {
        Ok(Product {
            id: ProductId(row.get("id")),
            name: ProductName::new(row.get("name"))?,
            slug: ProductSlug::new(row.get("slug"))?,
            price: Price::new(row.get("price"))?,
            quantity: Stock::new(row.get("quantity"))?,
            image_url: row.get("image_url"),
            category: row.get("category"),
            olfactory_profile: row.get("olfactory_profile"),
            description: row.get("description"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    fn map_write_error(e: sqlx::Error, product: &Product) -> ProductError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some("products_slug_key") {
                return ProductError::SlugAlreadyExists(product.slug.to_string());
            }
        }
        ProductError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, slug, price, quantity, image_url, category,
                                  olfactory_profile, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(product.name.as_str())
        .bind(product.slug.as_str())
        .bind(product.price.amount())
        .bind(product.quantity.value())
        .bind(&product.image_url)
        .bind(&product.category)
        .bind(&product.olfactory_profile)
        .bind(&product.description)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &product))?;

        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_product).transpose()
    }

    async fn find_by_slug(&self, slug: &ProductSlug) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM products WHERE slug = $1",
            PRODUCT_COLUMNS
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_product).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM products ORDER BY created_at DESC",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price = $3, quantity = $4, image_url = $5, category = $6,
                olfactory_profile = $7, description = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(product.name.as_str())
        .bind(product.price.amount())
        .bind(product.quantity.value())
        .bind(&product.image_url)
        .bind(&product.category)
        .bind(&product.olfactory_profile)
        .bind(&product.description)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &product))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(product.id.to_string()));
        }

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query(&format!(
            "DELETE FROM products WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_product).transpose()
    }

    async fn delete_all(&self) -> Result<u64, ProductError> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await
            .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
