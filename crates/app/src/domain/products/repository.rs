//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    query, query_as, query_scalar,
};
use uuid::Uuid;

use crate::domain::{
    categories::records::CategoryUuid,
    columns::{amount_param, try_get_amount, try_get_unsigned},
    products::{
        data::{ProductDetails, ProductFilter},
        records::{ProductRecord, ProductUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const FEATURED_PRODUCTS_SQL: &str = include_str!("sql/featured_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SET_PRODUCT_IMAGE_SQL: &str = include_str!("sql/set_product_image.sql");
const SET_PRODUCT_IMAGES_SQL: &str = include_str!("sql/set_product_images.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let categories: Vec<Uuid> = filter
            .categories
            .iter()
            .copied()
            .map(CategoryUuid::into_uuid)
            .collect();

        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(categories)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_PRODUCTS_SQL).fetch_one(&mut **tx).await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "product_count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn featured_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(FEATURED_PRODUCTS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        details: ProductDetails,
    ) -> Result<ProductRecord, sqlx::Error> {
        bind_details(
            query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL).bind(product.into_uuid()),
            details,
        )?
        .fetch_one(&mut **tx)
        .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        details: ProductDetails,
    ) -> Result<ProductRecord, sqlx::Error> {
        bind_details(
            query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL).bind(product.into_uuid()),
            details,
        )?
        .fetch_one(&mut **tx)
        .await
    }

    pub(crate) async fn set_product_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        image: String,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SET_PRODUCT_IMAGE_SQL)
            .bind(product.into_uuid())
            .bind(image)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_product_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        images: Vec<String>,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SET_PRODUCT_IMAGES_SQL)
            .bind(product.into_uuid())
            .bind(images)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn bind_details(
    query: QueryAs<'_, Postgres, ProductRecord, PgArguments>,
    details: ProductDetails,
) -> Result<QueryAs<'_, Postgres, ProductRecord, PgArguments>, sqlx::Error> {
    let price = amount_param(details.price, "price")?;

    let num_reviews = i32::try_from(details.num_reviews)
        .map_err(|e| sqlx::Error::Encode(format!("num_reviews: {e}").into()))?;

    Ok(query
        .bind(details.category_uuid.into_uuid())
        .bind(details.name)
        .bind(details.description)
        .bind(details.rich_description)
        .bind(details.brand)
        .bind(price)
        .bind(i16::from(details.count_in_stock))
        .bind(details.rating)
        .bind(num_reviews)
        .bind(details.is_featured))
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            rich_description: row.try_get("rich_description")?,
            image: row.try_get("image")?,
            images: row.try_get("images")?,
            brand: row.try_get("brand")?,
            price: try_get_amount(row, "price")?,
            count_in_stock: try_get_unsigned::<u8, i16>(row, "count_in_stock")?,
            rating: row.try_get("rating")?,
            num_reviews: try_get_unsigned::<u32, i32>(row, "num_reviews")?,
            is_featured: row.try_get("is_featured")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
