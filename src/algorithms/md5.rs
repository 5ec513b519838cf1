//! MD5-crypt, Poul-Henning Kamp's FreeBSD password hash.
//!
//! Hash format: `$1$SALT$CHECKSUM`; the cost is fixed at 1000 rounds.

use crate::crypter::{CryptScheme, Crypter};
use crate::crypto::{MD5_TRANSPOSE, SecretBytes, md5_crypt};
use crate::error::Result;
use crate::registry::{Crypt, Registry};
use crate::salt::{Salt, SaltParams};

pub const MAGIC_PREFIX: &str = "$1$";
pub const SALT_LEN_MIN: usize = 1;
pub const SALT_LEN_MAX: usize = 8;
pub const ROUNDS_DEFAULT: u32 = 1000;

pub const SALT: Salt = Salt::fixed_cost(MAGIC_PREFIX, SALT_LEN_MIN, SALT_LEN_MAX, ROUNDS_DEFAULT);

// The magic is read from the parameters, so APR1 runs through here too.
fn engine(key: &[u8], params: &SaltParams) -> SecretBytes {
    md5_crypt(
        key,
        params.salt().as_bytes(),
        params.magic().as_bytes(),
        params.rounds(),
    )
}

/// Returns a crypter computing MD5-crypt with `salt` as its configuration.
///
/// Derived algorithms such as APR1 differ only in their salt configuration.
pub fn with_salt(salt: Salt) -> Box<dyn Crypter> {
    Box::new(CryptScheme::new(salt, engine, &MD5_TRANSPOSE))
}

/// Returns a crypter computing MD5-crypt.
pub fn new() -> Box<dyn Crypter> {
    with_salt(SALT)
}

pub fn register(registry: &mut Registry) -> Result<()> {
    registry.register(Crypt::Md5, new, MAGIC_PREFIX)
}
