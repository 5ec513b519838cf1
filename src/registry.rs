//! Algorithm registry: maps crypt tags and magic prefixes to crypters.
//!
//! A [`Registry`] is built once, filled through each algorithm's `register`
//! function and then shared by reference. Registration needs `&mut self`, so
//! lookups on a shared registry never race with writes and take no lock.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithms;
use crate::crypter::Crypter;
use crate::error::{CryptError, Result};

/// Identifies a crypt function.
///
/// The declaration order is the order in which prefixes are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crypt {
    Apr1,
    Md5,
    Sha256,
    Sha512,
}

impl Crypt {
    /// Every tag, in matching order.
    pub const ALL: [Crypt; 4] = [Crypt::Apr1, Crypt::Md5, Crypt::Sha256, Crypt::Sha512];

    pub fn name(self) -> &'static str {
        match self {
            Crypt::Apr1 => "apr1",
            Crypt::Md5 => "md5",
            Crypt::Sha256 => "sha256",
            Crypt::Sha512 => "sha512",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Crypt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Crypt {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self> {
        Crypt::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CryptError::UnknownAlgorithm(s.to_string()))
    }
}

/// Builds a fresh crypter.
pub type Factory = fn() -> Box<dyn Crypter>;

#[derive(Debug, Clone, Copy)]
struct Entry {
    factory: Factory,
    prefix: &'static str,
}

/// Table of registered crypt functions, indexed by [`Crypt`].
#[derive(Debug, Default)]
pub struct Registry {
    entries: [Option<Entry>; Crypt::ALL.len()],
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every shipped algorithm.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        // The shipped tags are distinct, so registration into an empty table
        // cannot collide.
        if let Err(e) = algorithms::register_all(&mut registry) {
            log::error!("failed to register built-in crypt functions: {e}");
        }
        registry
    }

    /// Registers `factory` for `tag`, detected by `prefix`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptError::AlreadyRegistered`] if `tag` already has a factory.
    pub fn register(&mut self, tag: Crypt, factory: Factory, prefix: &'static str) -> Result<()> {
        let slot = &mut self.entries[tag.index()];
        if slot.is_some() {
            return Err(CryptError::AlreadyRegistered(tag));
        }
        *slot = Some(Entry { factory, prefix });
        log::debug!("registered crypt function {tag} with prefix {prefix}");
        Ok(())
    }

    /// Reports whether `tag` has a registered factory.
    pub fn is_available(&self, tag: Crypt) -> bool {
        self.entries[tag.index()].is_some()
    }

    /// Builds the crypter registered for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptError::UnknownAlgorithm`] if nothing is registered for `tag`.
    pub fn new_by_tag(&self, tag: Crypt) -> Result<Box<dyn Crypter>> {
        self.entries[tag.index()]
            .map(|entry| (entry.factory)())
            .ok_or_else(|| CryptError::UnknownAlgorithm(tag.name().to_string()))
    }

    /// Finds the tag whose prefix starts `hashed_key`; the first match wins.
    ///
    /// # Errors
    ///
    /// Returns [`CryptError::UnknownAlgorithm`] carrying the `$id$` prefix of
    /// `hashed_key` if no registered prefix matches.
    pub fn identify(&self, hashed_key: &str) -> Result<Crypt> {
        let found = self
            .algorithms()
            .find(|(_, prefix)| hashed_key.starts_with(prefix))
            .map(|(tag, _)| tag);

        match found {
            Some(tag) => {
                log::debug!("hash identified as {tag}");
                Ok(tag)
            }
            None => Err(CryptError::UnknownAlgorithm(magic_of(hashed_key).to_string())),
        }
    }

    /// Builds the crypter matching the prefix of `hashed_key`.
    ///
    /// # Errors
    ///
    /// See [`Registry::identify`].
    pub fn new_from_hash(&self, hashed_key: &str) -> Result<Box<dyn Crypter>> {
        self.new_by_tag(self.identify(hashed_key)?)
    }

    /// Reports whether some registered crypt function recognizes `hashed_key`.
    pub fn is_supported(&self, hashed_key: &str) -> bool {
        self.identify(hashed_key).is_ok()
    }

    /// Iterates over registered tags and their prefixes, in matching order.
    pub fn algorithms(&self) -> impl Iterator<Item = (Crypt, &'static str)> + '_ {
        Crypt::ALL
            .into_iter()
            .filter_map(|tag| self.entries[tag.index()].map(|entry| (tag, entry.prefix)))
    }
}

/// Extracts the leading `$id$` of a hash for diagnostics.
fn magic_of(hashed_key: &str) -> &str {
    match hashed_key.strip_prefix('$').and_then(|rest| rest.find('$')) {
        Some(end) => &hashed_key[..end + 2],
        None => hashed_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{apr1, sha256};

    #[test]
    fn new_from_hash_detects_apr1() {
        let registry = Registry::with_defaults();
        let crypter = registry.new_from_hash("$apr1$salt$hash").unwrap();
        assert_eq!(crypter.salt().magic(), "$apr1$");
        assert_eq!(registry.identify("$apr1$salt$hash").unwrap(), Crypt::Apr1);
    }

    #[test]
    fn new_from_hash_unknown_carries_prefix() {
        let registry = Registry::with_defaults();
        let err = registry.new_from_hash("$unknown$salt$hash").err().unwrap();
        assert_eq!(err, CryptError::UnknownAlgorithm("$unknown$".to_string()));
        assert!(err.to_string().contains("unknown"));
        assert!(err.to_string().ends_with("$unknown$"));
    }

    #[test]
    fn every_shipped_prefix_is_detected() {
        let registry = Registry::with_defaults();
        assert_eq!(registry.identify("$1$salt$x").unwrap(), Crypt::Md5);
        assert_eq!(registry.identify("$5$salt$x").unwrap(), Crypt::Sha256);
        assert_eq!(registry.identify("$6$rounds=6000$salt$x").unwrap(), Crypt::Sha512);
        assert!(!registry.is_supported("$2y$05$abc"));
        assert!(!registry.is_supported("plain"));
    }

    #[test]
    fn empty_registry_supports_nothing() {
        let registry = Registry::new();
        assert!(!registry.is_available(Crypt::Sha256));
        assert!(!registry.is_supported("$5$salt$x"));
        assert_eq!(
            registry.new_by_tag(Crypt::Sha256).err(),
            Some(CryptError::UnknownAlgorithm("sha256".to_string()))
        );
    }

    #[test]
    fn partial_registry_only_knows_registered_tags() {
        let mut registry = Registry::new();
        apr1::register(&mut registry).unwrap();

        assert!(registry.is_available(Crypt::Apr1));
        assert!(registry.is_supported("$apr1$salt$x"));
        assert!(!registry.is_supported("$1$salt$x"));
    }

    #[test]
    fn double_registration_fails() {
        let mut registry = Registry::new();
        sha256::register(&mut registry).unwrap();
        assert_eq!(
            sha256::register(&mut registry),
            Err(CryptError::AlreadyRegistered(Crypt::Sha256))
        );
    }

    #[test]
    fn algorithms_lists_in_matching_order() {
        let registry = Registry::with_defaults();
        let listed: Vec<_> = registry.algorithms().collect();
        assert_eq!(
            listed,
            vec![
                (Crypt::Apr1, "$apr1$"),
                (Crypt::Md5, "$1$"),
                (Crypt::Sha256, "$5$"),
                (Crypt::Sha512, "$6$"),
            ]
        );
    }

    #[test]
    fn crypt_parses_names() {
        assert_eq!("sha512".parse::<Crypt>().unwrap(), Crypt::Sha512);
        assert_eq!("APR1".parse::<Crypt>().unwrap(), Crypt::Apr1);
        assert!("des".parse::<Crypt>().is_err());
        assert_eq!(Crypt::Md5.to_string(), "md5");
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        let registry = Registry::with_defaults();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let crypter = registry.new_from_hash("$5$salt").unwrap();
                    let hash = crypter.generate(b"secret", b"$5$salt").unwrap();
                    crypter.verify(&hash, b"secret").unwrap();
                });
            }
        });
    }

    #[test]
    fn magic_extraction() {
        assert_eq!(magic_of("$unknown$salt$hash"), "$unknown$");
        assert_eq!(magic_of("$x"), "$x");
        assert_eq!(magic_of("nodollar"), "nodollar");
    }
}
