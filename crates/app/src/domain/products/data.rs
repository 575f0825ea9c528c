//! Products Data

use crate::domain::{categories::records::CategoryUuid, products::records::ProductUuid};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub details: ProductDetails,
}

/// Product Update Data
///
/// Updates replace every descriptive field; images are managed separately.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub details: ProductDetails,
}

/// Editable product fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: String,
    pub rich_description: String,
    pub brand: String,

    /// Price in minor currency units.
    pub price: u64,
    pub count_in_stock: u8,
    pub rating: f64,
    pub num_reviews: u32,
    pub is_featured: bool,
}

/// Product listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Restrict results to these categories; empty means every category.
    pub categories: Vec<CategoryUuid>,
}
