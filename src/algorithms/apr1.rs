//! APR1, the Apache variant of MD5-crypt.
//!
//! Identical to [`md5`](super::md5) except for the `$apr1$` magic, which is
//! also mixed into the digest.

use crate::crypter::Crypter;
use crate::error::Result;
use crate::registry::{Crypt, Registry};
use crate::salt::Salt;

use super::md5;

pub const MAGIC_PREFIX: &str = "$apr1$";
pub const SALT_LEN_MIN: usize = 1;
pub const SALT_LEN_MAX: usize = 8;
pub const ROUNDS_DEFAULT: u32 = 1000;

pub const SALT: Salt = Salt::fixed_cost(MAGIC_PREFIX, SALT_LEN_MIN, SALT_LEN_MAX, ROUNDS_DEFAULT);

/// Returns a crypter computing APR1.
pub fn new() -> Box<dyn Crypter> {
    md5::with_salt(SALT)
}

pub fn register(registry: &mut Registry) -> Result<()> {
    registry.register(Crypt::Apr1, new, MAGIC_PREFIX)
}
