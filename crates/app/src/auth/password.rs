//! Password hashing with Argon2.

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;

/// Verified in place of a stored hash when a login names no account.
static MISSING_ACCOUNT_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("missing-account-placeholder").ok());

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password cannot be empty")]
    Empty,

    #[error("password hashing failed: {0}")]
    Hash(password_hash::Error),
}

/// Hash a plain-text password into a PHC string.
///
/// # Errors
///
/// Returns an error when the password is empty or hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Check a plain-text password against a stored PHC string.
///
/// A malformed stored hash never verifies.
#[must_use]
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// A real Argon2 hash no password is known for. Verify against it when a
/// login names no account so that miss costs the same as a wrong password.
#[must_use]
pub fn missing_account_hash() -> &'static str {
    MISSING_ACCOUNT_HASH.as_deref().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("correct horse").expect("hashing should succeed");

        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("battery staple", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("secret").expect("hashing should succeed");
        let second = hash_password("secret").expect("hashing should succeed");

        assert_ne!(first, second, "each hash should carry its own salt");
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(matches!(hash_password(""), Err(PasswordError::Empty)));
    }

    #[test]
    fn missing_account_hash_is_a_real_argon2_hash() {
        let parsed = PasswordHash::new(missing_account_hash())
            .expect("placeholder should be a PHC string");

        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        assert!(!verify_password("hunter22", missing_account_hash()));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("secret", "not-a-phc-string"));
    }
}
