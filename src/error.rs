use thiserror::Error;

use crate::registry::Crypt;

/// Errors produced while decoding, generating or verifying crypt hashes.
///
/// Decode failures are kept apart from [`CryptError::KeyMismatch`] so callers
/// can tell a hash they cannot read from a wrong password.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptError {
    #[error("invalid magic prefix: expected {expected}")]
    PrefixMismatch { expected: &'static str },

    #[error("malformed rounds field: {0:?}")]
    MalformedRounds(String),

    #[error("rounds {rounds} outside of allowed range {min}..={max}")]
    RoundsOutOfRange { rounds: u64, min: u32, max: u32 },

    #[error("salt too short: {len} bytes, minimum is {min}")]
    SaltTooShort { len: usize, min: usize },

    #[error("salt too long: {len} bytes, maximum is {max}")]
    SaltTooLong { len: usize, max: usize },

    #[error("invalid salt byte 0x{0:02x}")]
    InvalidSaltByte(u8),

    #[error("hash has no checksum field")]
    MissingChecksum,

    #[error("given password does not match")]
    KeyMismatch,

    #[error("unknown crypt function: {0}")]
    UnknownAlgorithm(String),

    #[error("crypt function {0} is already registered")]
    AlreadyRegistered(Crypt),

    #[error("OS random generator unavailable")]
    Random,
}

pub type Result<T> = std::result::Result<T, CryptError>;
