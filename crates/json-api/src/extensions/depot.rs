//! Depot helper extensions.

use std::any::Any;

use eshop_app::auth::Identity;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_identity(&mut self, identity: Identity);

    /// The authenticated caller, or 401 when the request carried no valid token.
    fn identity_or_401(&self) -> Result<Identity, StatusError>;

    /// The authenticated caller if they are an administrator, otherwise 403.
    fn admin_or_403(&self) -> Result<Identity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<Identity, StatusError> {
        self.obtain::<Identity>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn admin_or_403(&self) -> Result<Identity, StatusError> {
        let identity = self.identity_or_401()?;

        if !identity.is_admin {
            return Err(StatusError::forbidden().brief("Administrator access required"));
        }

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use eshop_app::{auth::SessionUuid, domain::users::records::UserUuid};
    use salvo::http::StatusCode;

    use super::*;

    fn identity(is_admin: bool) -> Identity {
        Identity {
            session_uuid: SessionUuid::new(),
            user_uuid: UserUuid::new(),
            is_admin,
        }
    }

    #[test]
    fn missing_identity_is_unauthorized() {
        let depot = Depot::new();

        let error = depot.identity_or_401().err();

        assert_eq!(error.map(|e| e.code), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn shopper_identity_is_not_admin() {
        let mut depot = Depot::new();
        let shopper = identity(false);

        depot.insert_identity(shopper);

        assert_eq!(depot.identity_or_401().ok(), Some(shopper));
        assert_eq!(
            depot.admin_or_403().err().map(|e| e.code),
            Some(StatusCode::FORBIDDEN)
        );
    }

    #[test]
    fn admin_identity_passes_admin_check() {
        let mut depot = Depot::new();
        let admin = identity(true);

        depot.insert_identity(admin);

        assert_eq!(depot.admin_or_403().ok(), Some(admin));
    }
}
