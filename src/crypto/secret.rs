//! Scoped handling of secret intermediate buffers.
//!
//! Every buffer derived from the key lives in a [`Zeroizing`] wrapper, so it is
//! wiped on drop on every exit path, early returns included.

use sha2::digest::{Digest, FixedOutputReset, generic_array::GenericArray};
use zeroize::Zeroizing;

/// A heap buffer that is zeroed when dropped.
pub type SecretBytes = Zeroizing<Vec<u8>>;

/// Expands `input` cyclically (repeating and truncating) to exactly `len` bytes.
///
/// An empty `input` yields an empty buffer.
pub fn repeat_sequence(input: &[u8], len: usize) -> SecretBytes {
    let mut sequence = Zeroizing::new(Vec::with_capacity(len));
    sequence.extend(input.iter().copied().cycle().take(len));
    sequence
}

/// Finishes `hasher` into a fresh zeroizing buffer and resets it for reuse.
pub fn finish<D: Digest + FixedOutputReset>(hasher: &mut D) -> SecretBytes {
    let mut out = Zeroizing::new(vec![0u8; <D as Digest>::output_size()]);
    finish_into(hasher, &mut out);
    out
}

/// Finishes `hasher` directly into `out`, overwriting it, and resets the hasher.
///
/// `out` must be exactly one digest long.
pub fn finish_into<D: Digest + FixedOutputReset>(hasher: &mut D, out: &mut [u8]) {
    Digest::finalize_into_reset(hasher, GenericArray::from_mut_slice(out));
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Sha256;

    #[test]
    fn repeat_truncates_short_lengths() {
        assert_eq!(*repeat_sequence(b"abcdef", 4), b"abcd");
    }

    #[test]
    fn repeat_cycles_long_lengths() {
        assert_eq!(*repeat_sequence(b"abc", 8), b"abcabcab");
        assert_eq!(*repeat_sequence(b"abc", 6), b"abcabc");
    }

    #[test]
    fn repeat_handles_empty_cases() {
        assert!(repeat_sequence(b"abc", 0).is_empty());
        assert!(repeat_sequence(b"", 5).is_empty());
    }

    #[test]
    fn finish_matches_one_shot_digest_and_resets() {
        let mut hasher = Sha256::new();
        hasher.update(b"hello");
        let first = finish(&mut hasher);
        assert_eq!(first.as_slice(), Sha256::digest(b"hello").as_slice());

        hasher.update(b"hello");
        let second = finish(&mut hasher);
        assert_eq!(first, second);
    }

    #[test]
    fn finish_into_overwrites_buffer() {
        let mut hasher = Sha256::new();
        let mut out = [0xffu8; 32];
        hasher.update(b"abc");
        finish_into(&mut hasher, &mut out);
        assert_eq!(out.as_slice(), Sha256::digest(b"abc").as_slice());
    }
}
