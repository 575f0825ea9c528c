//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn count_products(&self) -> Result<u64, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.repository.count_products(&mut tx).await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn featured_products(
        &self,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.featured_products(&mut tx, limit).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, product.uuid, product.details)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update.details)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn set_product_image(
        &self,
        product: ProductUuid,
        image: String,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_product_image(&mut tx, product, image)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn set_product_images(
        &self,
        product: ProductUuid,
        images: Vec<String>,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_product_images(&mut tx, product, images)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves products, optionally restricted to a set of categories.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Counts all products.
    async fn count_products(&self) -> Result<u64, ProductsServiceError>;

    /// Retrieves up to `limit` featured products, newest first.
    async fn featured_products(&self, limit: u32)
    -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product's descriptive fields.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Sets the product's main image URL.
    async fn set_product_image(
        &self,
        product: ProductUuid,
        image: String,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the product's gallery image URLs.
    async fn set_product_images(
        &self,
        product: ProductUuid,
        images: Vec<String>,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
