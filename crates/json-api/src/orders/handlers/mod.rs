//! Order Handlers

pub(crate) mod active;
pub(crate) mod count;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod items;
pub(crate) mod status;
pub(crate) mod total_sales;
pub(crate) mod update;
pub(crate) mod user_orders;
