//! User Errors

use salvo::http::StatusError;
use tracing::error;

use eshop_app::{
    auth::{AuthServiceError, PasswordError},
    domain::users::UsersServiceError,
};

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email is already registered")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::Password(PasswordError::Empty) => {
            StatusError::bad_request().brief("Password cannot be empty")
        }
        UsersServiceError::InvalidReference
        | UsersServiceError::MissingRequiredData
        | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::Password(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("user storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn into_auth_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::NotFound => StatusError::unauthorized().brief("Session not found"),
        other => {
            error!("session error: {other}");

            StatusError::internal_server_error()
        }
    }
}
