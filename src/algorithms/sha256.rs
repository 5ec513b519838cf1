//! SHA-256-crypt, Ulrich Drepper's SHA-2 based crypt with the 256-bit digest.
//!
//! Hash format: `$5$[rounds=N$]SALT$CHECKSUM`, with a 43-character checksum.

use sha2::Sha256;

use crate::crypter::{CryptScheme, Crypter};
use crate::crypto::{SHA256_TRANSPOSE, SecretBytes, sha_crypt};
use crate::error::Result;
use crate::registry::{Crypt, Registry};
use crate::salt::{Salt, SaltParams};

pub const MAGIC_PREFIX: &str = "$5$";
pub const SALT_LEN_MIN: usize = 1;
pub const SALT_LEN_MAX: usize = 16;
pub const ROUNDS_MIN: u32 = 1000;
pub const ROUNDS_MAX: u32 = 999_999_999;
pub const ROUNDS_DEFAULT: u32 = 5000;

pub const SALT: Salt = Salt::with_rounds(
    MAGIC_PREFIX,
    SALT_LEN_MIN,
    SALT_LEN_MAX,
    ROUNDS_MIN,
    ROUNDS_DEFAULT,
    ROUNDS_MAX,
);

fn engine(key: &[u8], params: &SaltParams) -> SecretBytes {
    sha_crypt::<Sha256>(key, params.salt().as_bytes(), params.rounds())
}

/// Returns a crypter computing SHA-256-crypt.
pub fn new() -> Box<dyn Crypter> {
    Box::new(CryptScheme::new(SALT, engine, &SHA256_TRANSPOSE))
}

pub fn register(registry: &mut Registry) -> Result<()> {
    registry.register(Crypt::Sha256, new, MAGIC_PREFIX)
}
