//! Authentication

mod errors;
mod models;
pub mod password;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use password::{PasswordError, hash_password, missing_account_hash, verify_password};
pub use service::*;
pub use token::*;
