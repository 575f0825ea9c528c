//! Order Item Handlers

pub(crate) mod add;
pub(crate) mod remove;
pub(crate) mod update;
