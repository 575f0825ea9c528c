//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
///
/// The password hash never leaves the repository layer.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_admin: bool,
    pub street: String,
    pub apartment: String,
    pub zip: String,
    pub city: String,
    pub country: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
