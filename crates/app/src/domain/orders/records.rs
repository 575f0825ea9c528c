//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        orders::{data::ShippingDetails, status::OrderStatus},
        products::records::ProductUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub status: OrderStatus,
    pub shipping: ShippingDetails,
    pub total_price: u64,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
///
/// `price` is the unit price captured when the product was added.
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub quantity: u32,
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
