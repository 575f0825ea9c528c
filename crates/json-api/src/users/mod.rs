//! Users and sessions

pub(crate) mod errors;
mod handlers;

pub(crate) use handlers::*;
