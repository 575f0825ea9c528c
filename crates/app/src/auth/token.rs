//! Session token formatting, parsing, and hashing.
//!
//! Tokens look like `es_v1_<uuid>.<secret hex>`. The uuid locates the stored
//! session; only a SHA-256 digest of the whole token is persisted.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::auth::models::SessionUuid;

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "es";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

const SESSION_TOKEN_SECRET_HEX_CHARS: usize = SESSION_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for SessionTokenVersion {
    type Error = SessionTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

impl From<SessionTokenVersion> for i16 {
    fn from(value: SessionTokenVersion) -> Self {
        value.as_i16()
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct SessionTokenSecret {
    bytes: [u8; SESSION_TOKEN_SECRET_BYTES],
}

impl SessionTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for SessionTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionTokenSecret(**redacted**)")
    }
}

impl Drop for SessionTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedSessionToken {
    pub session_uuid: SessionUuid,
    pub version: SessionTokenVersion,
    pub secret: SessionTokenSecret,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_session_token_secret() -> SessionTokenSecret {
    let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    SessionTokenSecret::from_bytes(secret)
}

#[must_use]
pub fn format_session_token(
    session_uuid: SessionUuid,
    version: SessionTokenVersion,
    secret: &SessionTokenSecret,
) -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        session_uuid.into_uuid().simple(),
        encode_hex(secret.as_bytes())
    )
}

/// Split a bearer token into its session uuid, version and secret.
///
/// # Errors
///
/// Returns an error when any segment is missing or malformed.
pub fn parse_session_token(token: &str) -> Result<ParsedSessionToken, SessionTokenError> {
    let (prefix_and_id, secret_hex) = token
        .split_once('.')
        .ok_or(SessionTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let uuid_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX {
        return Err(SessionTokenError::InvalidFormat);
    }

    let version = SessionTokenVersion::from_str(version_segment)?;

    let session_uuid =
        Uuid::try_parse(uuid_segment).map_err(|_| SessionTokenError::InvalidFormat)?;

    let secret = decode_secret_hex(secret_hex).ok_or(SessionTokenError::InvalidSecretEncoding)?;

    Ok(ParsedSessionToken {
        session_uuid: SessionUuid::from_uuid(session_uuid),
        version,
        secret: SessionTokenSecret::from_bytes(secret),
    })
}

/// SHA-256 digest of the full token, hex encoded, as stored in `session_tokens`.
#[must_use]
pub fn hash_session_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Lowercase hex encoding.
#[must_use]
pub fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(char::from(HEX[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }

    encoded
}

/// Decode a hex string of any case into bytes.
#[must_use]
pub fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }

    hex.as_bytes()
        .chunks_exact(2)
        .map(|pair| match pair {
            [hi, lo] => Some((decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?),
            _ => None,
        })
        .collect()
}

fn decode_secret_hex(secret_hex: &str) -> Option<[u8; SESSION_TOKEN_SECRET_BYTES]> {
    if secret_hex.len() != SESSION_TOKEN_SECRET_HEX_CHARS {
        return None;
    }

    decode_hex(secret_hex)?.try_into().ok()
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}
