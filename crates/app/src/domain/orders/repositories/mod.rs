//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{PgOrderItemsRepository, StockLine};
pub(crate) use orders::PgOrdersRepository;
