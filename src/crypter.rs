//! The `Generate / Verify / Cost` contract and its shared implementation.

use zeroize::Zeroizing;

use crate::crypto::{SecretBytes, hash64};
use crate::error::{CryptError, Result};
use crate::salt::{DecodeMode, ROUNDS_PREFIX, Salt, SaltParams};

/// Common interface of every crypt function.
pub trait Crypter: Send + Sync {
    /// Hashes `key`, returning a full hash suitable for storage.
    ///
    /// `salt` is either empty (a random salt of maximum length and the default
    /// rounds are used), a configuration string such as `$5$rounds=6000$salt`,
    /// or a complete earlier hash whose parameters are reused.
    fn generate(&self, key: &[u8], salt: &[u8]) -> Result<String>;

    /// Checks `key` against `hashed_key`.
    ///
    /// Fails with [`CryptError::KeyMismatch`] on a wrong key, and with the
    /// decode error itself when `hashed_key` cannot be read.
    fn verify(&self, hashed_key: &str, key: &[u8]) -> Result<()>;

    /// Returns the rounds used to create `hashed_key`.
    fn cost(&self, hashed_key: &str) -> Result<u32>;

    /// The salt configuration this crypter is bound to.
    fn salt(&self) -> &Salt;
}

/// Digest engine signature: key and decoded parameters in, raw digest out.
pub type Engine = fn(&[u8], &SaltParams) -> SecretBytes;

/// A crypt function built from a salt codec, a digest engine and the byte
/// order used to encode the engine's output.
#[derive(Debug, Clone, Copy)]
pub struct CryptScheme {
    salt: Salt,
    engine: Engine,
    transpose: &'static [u8],
}

impl CryptScheme {
    pub const fn new(salt: Salt, engine: Engine, transpose: &'static [u8]) -> Self {
        Self {
            salt,
            engine,
            transpose,
        }
    }

    fn hash(&self, key: &[u8], salt: &[u8], mode: DecodeMode) -> Result<String> {
        let (params, _) = self.salt.decode(salt, mode)?;

        log::debug!(
            "computing {} hash with {} rounds",
            params.magic(),
            params.rounds()
        );
        let digest = (self.engine)(key, &params);

        // MAGIC [rounds=N$] SALT $ CHECKSUM
        let rounds_len = if params.rounds_explicit() {
            ROUNDS_PREFIX.len() + params.rounds().to_string().len() + 1
        } else {
            0
        };
        let mut out = String::with_capacity(
            params.magic().len()
                + rounds_len
                + params.salt().len()
                + 1
                + hash64::encoded_len(digest.len()),
        );
        params.write_prefix(&mut out);
        out.push_str(&hash64::encode_permuted(&digest, self.transpose));
        Ok(out)
    }
}

impl Crypter for CryptScheme {
    fn generate(&self, key: &[u8], salt: &[u8]) -> Result<String> {
        if salt.is_empty() {
            let config = self
                .salt
                .generate_with_rounds(self.salt.salt_len_max(), self.salt.rounds_default())?;
            return self.hash(key, config.as_bytes(), DecodeMode::Config);
        }
        self.hash(key, salt, DecodeMode::Config)
    }

    fn verify(&self, hashed_key: &str, key: &[u8]) -> Result<()> {
        let fresh = Zeroizing::new(self.hash(key, hashed_key.as_bytes(), DecodeMode::Stored)?);
        if constant_time_eq(fresh.as_bytes(), hashed_key.as_bytes()) {
            Ok(())
        } else {
            Err(CryptError::KeyMismatch)
        }
    }

    fn cost(&self, hashed_key: &str) -> Result<u32> {
        let (params, _) = self.salt.decode(hashed_key.as_bytes(), DecodeMode::Stored)?;
        Ok(params.rounds())
    }

    fn salt(&self) -> &Salt {
        &self.salt
    }
}

/// Compares two byte strings over the full length of the longer one.
///
/// Running time depends only on the lengths, never on where the inputs
/// first differ.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let mut diff = a.len() ^ b.len();
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= usize::from(x ^ y);
    }
    diff == 0
}
