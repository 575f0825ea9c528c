//! Category Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
