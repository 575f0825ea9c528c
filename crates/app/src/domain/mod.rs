//! Shop Domain Concerns

pub mod categories;
mod columns;
pub mod orders;
pub mod products;
pub mod users;
