//! Order Data

use crate::{
    auth::Identity,
    domain::{
        orders::records::{OrderItemUuid, OrderUuid},
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

/// Shipping Details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingDetails {
    pub shipping_address1: String,
    pub shipping_address2: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
}

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub shipping: ShippingDetails,
    pub items: Vec<NewOrderLine>,
}

/// A product and quantity requested when the order is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// New Order Item Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Which orders a caller may address.
///
/// Orders outside the caller's reach behave as if they did not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAccess {
    Any,
    OwnedBy(UserUuid),
}

impl OrderAccess {
    #[must_use]
    pub const fn for_identity(identity: &Identity) -> Self {
        if identity.is_admin {
            Self::Any
        } else {
            Self::OwnedBy(identity.user_uuid)
        }
    }

    #[must_use]
    pub const fn owner(self) -> Option<UserUuid> {
        match self {
            Self::Any => None,
            Self::OwnedBy(user) => Some(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::SessionUuid;

    use super::*;

    #[test]
    fn admins_reach_any_order() {
        let identity = Identity {
            session_uuid: SessionUuid::new(),
            user_uuid: UserUuid::new(),
            is_admin: true,
        };

        assert_eq!(OrderAccess::for_identity(&identity), OrderAccess::Any);
        assert_eq!(OrderAccess::Any.owner(), None);
    }

    #[test]
    fn shoppers_reach_only_their_own_orders() {
        let user_uuid = UserUuid::new();
        let identity = Identity {
            session_uuid: SessionUuid::new(),
            user_uuid,
            is_admin: false,
        };

        let access = OrderAccess::for_identity(&identity);

        assert_eq!(access, OrderAccess::OwnedBy(user_uuid));
        assert_eq!(access.owner(), Some(user_uuid));
    }
}
