//! User Data

use std::fmt;

use crate::domain::users::records::UserUuid;

/// New User Data
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub is_admin: bool,
    pub street: String,
    pub apartment: String,
    pub zip: String,
    pub city: String,
    pub country: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("phone", &self.phone)
            .field("is_admin", &self.is_admin)
            .field("street", &self.street)
            .field("apartment", &self.apartment)
            .field("zip", &self.zip)
            .field("city", &self.city)
            .field("country", &self.country)
            .finish()
    }
}
