use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductSlug;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;

/// Domain service implementation for the product catalogue.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn create_product(
        &self,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            name: command.name,
            slug: command.slug,
            price: command.price,
            quantity: command.quantity,
            image_url: command.image_url,
            category: command.category,
            olfactory_profile: command.olfactory_profile,
            description: command.description,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(product).await?;
        tracing::info!(product_id = %created.id, slug = %created.slug, "Product created");

        Ok(created)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))
    }

    async fn get_product_by_slug(&self, slug: &ProductSlug) -> Result<Product, ProductError> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or(ProductError::NotFoundBySlug(slug.to_string()))
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.repository.list_all().await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self.get_product(id).await?;

        command.apply_to(&mut product);
        product.updated_at = Utc::now();

        self.repository.update(product).await
    }

    async fn delete_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        let deleted = self
            .repository
            .delete(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))?;
        tracing::info!(product_id = %deleted.id, "Product deleted");

        Ok(deleted)
    }

    async fn delete_all_products(&self) -> Result<u64, ProductError> {
        let deleted = self.repository.delete_all().await?;
        tracing::warn!(deleted, "All products deleted");

        Ok(deleted)
    }
}
