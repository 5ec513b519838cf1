//! Unix crypt(3)-style password hashing.
//!
//! Implements the SHA-crypt family (`$5$`, `$6$`) and MD5-crypt (`$1$`,
//! `$apr1$`) behind one [`Crypter`] interface, with a [`Registry`] that picks
//! the right algorithm from the prefix of a stored hash.
//!
//! ```
//! use unixcrypt::{Crypt, Crypter, Registry};
//!
//! let registry = Registry::with_defaults();
//! let crypter = registry.new_by_tag(Crypt::Sha256).unwrap();
//! let hash = crypter.generate(b"secret", b"$5$salt").unwrap();
//! assert_eq!(hash, "$5$salt$kpa26zwgX83BPSR8d7w93OIXbFt/d3UOTZaAu5vsTM6");
//!
//! registry.new_from_hash(&hash).unwrap().verify(&hash, b"secret").unwrap();
//! ```

pub mod algorithms;
pub mod config;
mod crypter;
pub mod crypto;
mod error;
pub mod registry;
pub mod salt;

pub use crate::config::Settings;
pub use crate::crypter::{CryptScheme, Crypter, Engine, constant_time_eq};
pub use crate::error::{CryptError, Result};
pub use crate::registry::{Crypt, Factory, Registry};
pub use crate::salt::{DecodeMode, Salt, SaltParams};

/// Verifies `key` against `hashed_key`, detecting the algorithm from its prefix.
///
/// # Errors
///
/// Returns [`CryptError::UnknownAlgorithm`] for an unrecognized prefix, the
/// decode error for a malformed hash and [`CryptError::KeyMismatch`] for a
/// wrong key.
pub fn verify(registry: &Registry, hashed_key: &str, key: &[u8]) -> Result<()> {
    registry.new_from_hash(hashed_key)?.verify(hashed_key, key)
}
