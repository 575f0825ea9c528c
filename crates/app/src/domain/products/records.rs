//! Product Records

use jiff::Timestamp;

use crate::{domain::categories::records::CategoryUuid, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub image: String,
    pub images: Vec<String>,
    pub brand: String,
    pub price: u64,
    pub count_in_stock: u8,
    pub rating: f64,
    pub num_reviews: u32,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
