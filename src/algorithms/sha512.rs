//! SHA-512-crypt, the 512-bit sibling of [`sha256`](super::sha256).
//!
//! Hash format: `$6$[rounds=N$]SALT$CHECKSUM`, with an 86-character checksum.

use sha2::Sha512;

use crate::crypter::{CryptScheme, Crypter};
use crate::crypto::{SHA512_TRANSPOSE, SecretBytes, sha_crypt};
use crate::error::Result;
use crate::registry::{Crypt, Registry};
use crate::salt::{Salt, SaltParams};

pub const MAGIC_PREFIX: &str = "$6$";
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
    sha_crypt::<Sha512>(key, params.salt().as_bytes(), params.rounds())
}

/// Returns a crypter computing SHA-512-crypt.
pub fn new() -> Box<dyn Crypter> {
    Box::new(CryptScheme::new(SALT, engine, &SHA512_TRANSPOSE))
}

pub fn register(registry: &mut Registry) -> Result<()> {
    registry.register(Crypt::Sha512, new, MAGIC_PREFIX)
}
