//! The shipped crypt functions.
//!
//! Each module exposes its constants, a `new` factory and a `register`
//! function that adds it to a [`Registry`].

use crate::error::Result;
use crate::registry::Registry;

pub mod apr1;
pub mod md5;
pub mod sha256;
pub mod sha512;

/// Registers every shipped algorithm.
pub fn register_all(registry: &mut Registry) -> Result<()> {
    apr1::register(registry)?;
    md5::register(registry)?;
    sha256::register(registry)?;
    sha512::register(registry)?;
    Ok(())
}
