//! Product Handlers

pub(crate) mod count;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod featured;
pub(crate) mod gallery;
pub(crate) mod get;
pub(crate) mod image;
pub(crate) mod index;
pub(crate) mod update;
