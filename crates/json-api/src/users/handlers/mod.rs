//! User Handlers

pub(crate) mod count;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod register;
