//! Salt and parameter codec for modular crypt strings.
//!
//! Format:
//! ```text
//! MAGIC | [rounds=N$] | SALT | [$CHECKSUM]
//! ```
//!
//! A [`Salt`] holds the per-algorithm constants (magic prefix, salt length
//! bounds, rounds bounds) and turns text into [`SaltParams`] and back.

use getrandom::fill;
use zeroize::Zeroizing;

use crate::crypto::hash64;
use crate::error::{CryptError, Result};

/// Literal that opens an explicit rounds field.
pub const ROUNDS_PREFIX: &str = "rounds=";
/// Field separator.
pub const SEPARATOR: u8 = b'$';

/// How strictly [`Salt::decode`] treats its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Input is a configuration for a new hash: long salts are truncated,
    /// out-of-range rounds are clamped, the checksum is optional.
    Config,
    /// Input is a stored hash: long salts and out-of-range rounds are
    /// rejected and the checksum separator must be present.
    Stored,
}

/// Per-algorithm salt configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Salt {
    magic: &'static str,
    salt_len_min: usize,
    salt_len_max: usize,
    rounds_min: u32,
    rounds_max: u32,
    rounds_default: u32,
    rounds_field: bool,
}

impl Salt {
    /// A configuration whose hashes may carry a `rounds=N$` field.
    pub const fn with_rounds(
        magic: &'static str,
        salt_len_min: usize,
        salt_len_max: usize,
        rounds_min: u32,
        rounds_default: u32,
        rounds_max: u32,
    ) -> Self {
        Self {
            magic,
            salt_len_min,
            salt_len_max,
            rounds_min,
            rounds_max,
            rounds_default,
            rounds_field: true,
        }
    }

    /// A configuration with a fixed cost and no rounds field.
    pub const fn fixed_cost(
        magic: &'static str,
        salt_len_min: usize,
        salt_len_max: usize,
        rounds: u32,
    ) -> Self {
        Self {
            magic,
            salt_len_min,
            salt_len_max,
            rounds_min: rounds,
            rounds_max: rounds,
            rounds_default: rounds,
            rounds_field: false,
        }
    }

    pub fn magic(&self) -> &'static str {
        self.magic
    }

    pub fn salt_len_min(&self) -> usize {
        self.salt_len_min
    }

    pub fn salt_len_max(&self) -> usize {
        self.salt_len_max
    }

    pub fn rounds_min(&self) -> u32 {
        self.rounds_min
    }

    pub fn rounds_max(&self) -> u32 {
        self.rounds_max
    }

    pub fn rounds_default(&self) -> u32 {
        self.rounds_default
    }

    /// Whether hashes of this algorithm may carry a `rounds=N$` field.
    pub fn has_rounds_field(&self) -> bool {
        self.rounds_field
    }

    /// Clamps `rounds` into the allowed range.
    pub fn clamp_rounds(&self, rounds: u64) -> u32 {
        let clamped = rounds.clamp(u64::from(self.rounds_min), u64::from(self.rounds_max));
        u32::try_from(clamped).unwrap_or(self.rounds_max)
    }

    /// Decodes `input` into salt parameters and the bytes after the salt
    /// separator (the checksum, when present).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The magic prefix is missing
    /// - The rounds field is not a terminated decimal number
    /// - The salt is empty, holds a non-ASCII byte or a byte that would break
    ///   a `passwd`-style line (`:`, newline, NUL)
    /// - In [`DecodeMode::Stored`], the salt is too long, the rounds are out
    ///   of range or the checksum separator is missing
    pub fn decode<'a>(&self, input: &'a [u8], mode: DecodeMode) -> Result<(SaltParams, &'a [u8])> {
        let rest = input
            .strip_prefix(self.magic.as_bytes())
            .ok_or(CryptError::PrefixMismatch {
                expected: self.magic,
            })?;

        let (rounds, rounds_explicit, rest) = match rest.strip_prefix(ROUNDS_PREFIX.as_bytes()) {
            Some(field) if self.rounds_field => {
                let end = field
                    .iter()
                    .position(|&b| b == SEPARATOR)
                    .ok_or_else(|| malformed_rounds(field))?;
                let requested = parse_rounds(&field[..end])?;
                (self.check_rounds(requested, mode)?, true, &field[end + 1..])
            }
            _ => (self.rounds_default, false, rest),
        };

        let (mut salt, remainder, has_checksum) = match rest.iter().position(|&b| b == SEPARATOR) {
            Some(end) => (&rest[..end], &rest[end + 1..], true),
            None => (rest, &rest[rest.len()..], false),
        };

        if salt.len() > self.salt_len_max {
            if mode == DecodeMode::Stored {
                return Err(CryptError::SaltTooLong {
                    len: salt.len(),
                    max: self.salt_len_max,
                });
            }
            salt = &salt[..self.salt_len_max];
        }
        if salt.len() < self.salt_len_min {
            return Err(CryptError::SaltTooShort {
                len: salt.len(),
                min: self.salt_len_min,
            });
        }
        if let Some(&bad) = salt.iter().find(|&&b| !is_salt_byte(b)) {
            return Err(CryptError::InvalidSaltByte(bad));
        }
        if mode == DecodeMode::Stored && !has_checksum {
            return Err(CryptError::MissingChecksum);
        }

        log::trace!(
            "decoded {} salt: {} bytes, {rounds} rounds (explicit: {rounds_explicit})",
            self.magic,
            salt.len()
        );

        let params = SaltParams {
            magic: self.magic,
            salt: salt.iter().copied().map(char::from).collect(),
            rounds,
            rounds_explicit,
        };
        Ok((params, remainder))
    }

    fn check_rounds(&self, requested: u64, mode: DecodeMode) -> Result<u32> {
        let rounds = self.clamp_rounds(requested);
        if mode == DecodeMode::Stored && u64::from(rounds) != requested {
            return Err(CryptError::RoundsOutOfRange {
                rounds: requested,
                min: self.rounds_min,
                max: self.rounds_max,
            });
        }
        Ok(rounds)
    }

    /// Generates `len` random salt characters, `len` clamped into the allowed
    /// salt length range.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS random generator is unavailable.
    pub fn generate(&self, len: usize) -> Result<String> {
        let len = len.clamp(self.salt_len_min, self.salt_len_max);
        let mut raw = Zeroizing::new(vec![0u8; len]);
        fill(&mut raw).map_err(|_| CryptError::Random)?;
        Ok(raw.iter().copied().map(hash64::symbol).collect())
    }

    /// Generates a complete configuration string (`MAGIC[rounds=N$]SALT`).
    ///
    /// # Errors
    ///
    /// Returns an error if the OS random generator is unavailable.
    pub fn generate_with_rounds(&self, len: usize, rounds: u32) -> Result<String> {
        let salt = self.generate(len)?;
        Ok(self.compose(&salt, Some(rounds)))
    }

    /// Builds a configuration string from a bare salt.
    ///
    /// The rounds field is written only when the clamped value differs from
    /// the default; fixed-cost algorithms ignore `rounds`.
    pub fn compose(&self, salt: &str, rounds: Option<u32>) -> String {
        let mut out = String::from(self.magic);
        if let Some(rounds) = rounds.filter(|_| self.rounds_field) {
            let rounds = self.clamp_rounds(u64::from(rounds));
            if rounds != self.rounds_default {
                out.push_str(ROUNDS_PREFIX);
                out.push_str(&rounds.to_string());
                out.push(char::from(SEPARATOR));
            }
        }
        out.push_str(salt);
        out
    }
}

fn malformed_rounds(field: &[u8]) -> CryptError {
    CryptError::MalformedRounds(String::from_utf8_lossy(field).into_owned())
}

// Salts are not limited to the generation alphabet; any byte that survives
// the hash text unchanged is accepted.
fn is_salt_byte(b: u8) -> bool {
    b.is_ascii() && !matches!(b, b':' | b'\n' | b'\0')
}

// Leading zeros are rejected: the value is re-emitted in canonical form and
// would no longer match the stored text.
fn parse_rounds(digits: &[u8]) -> Result<u64> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(malformed_rounds(digits));
    }
    if digits.len() > 1 && digits[0] == b'0' {
        return Err(malformed_rounds(digits));
    }
    Ok(digits.iter().fold(0u64, |acc, &d| {
        acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
    }))
}

/// Decoded configuration of one hash instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltParams {
    magic: &'static str,
    salt: String,
    rounds: u32,
    rounds_explicit: bool,
}

impl SaltParams {
    pub fn magic(&self) -> &'static str {
        self.magic
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Whether the rounds field must be written back out.
    pub fn rounds_explicit(&self) -> bool {
        self.rounds_explicit
    }

    /// Appends `MAGIC[rounds=N$]SALT$` to `out`.
    pub fn write_prefix(&self, out: &mut String) {
        out.push_str(self.magic);
        if self.rounds_explicit {
            out.push_str(ROUNDS_PREFIX);
            out.push_str(&self.rounds.to_string());
            out.push(char::from(SEPARATOR));
        }
        out.push_str(&self.salt);
        out.push(char::from(SEPARATOR));
    }
}
