use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductSlug;
use crate::domain::product::models::UpdateProductCommand;

/// Port for product catalogue operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Add a product to the catalogue.
    ///
    /// # Errors
    /// * `SlugAlreadyExists` - Another product uses this slug
    /// * `DatabaseError` - Database operation failed
    async fn create_product(&self, command: CreateProductCommand)
        -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFoundBySlug` - No product with this slug
    /// * `DatabaseError` - Database operation failed
    async fn get_product_by_slug(&self, slug: &ProductSlug) -> Result<Product, ProductError>;

    /// List the catalogue, newest first.
    async fn list_products(&self) -> Result<Vec<Product>, ProductError>;

    /// Partially update a product.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Delete a product and return it as it was.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    /// Empty the catalogue, returning how many products were removed.
    async fn delete_all_products(&self) -> Result<u64, ProductError>;
}

/// Persistence operations for the product aggregate.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// # Errors
    /// * `SlugAlreadyExists` - Unique slug constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, product: Product) -> Result<Product, ProductError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    async fn find_by_slug(&self, slug: &ProductSlug) -> Result<Option<Product>, ProductError>;

    async fn list_all(&self) -> Result<Vec<Product>, ProductError>;

    /// Overwrite the stored product.
    ///
    /// # Errors
    /// * `NotFound` - No row with this id
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, product: Product) -> Result<Product, ProductError>;

    /// Delete by id, returning the removed row if there was one.
    async fn delete(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    /// Delete every product, returning the number of rows removed.
    async fn delete_all(&self) -> Result<u64, ProductError>;
}
