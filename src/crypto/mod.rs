//! Cryptographic building blocks for the crypt family.
//!
//! Provides the digest engines, the radix-64 text encoding and the helpers
//! that keep key-derived buffers from outliving the call that made them.

pub mod hash64;
pub mod md5_crypt;
pub mod secret;
pub mod sha_crypt;

pub use md5_crypt::md5_crypt;
pub use secret::{SecretBytes, repeat_sequence};
pub use sha_crypt::sha_crypt;

/// Raw digest length of SHA-256-crypt (32 bytes).
pub const SHA256_LEN: usize = 32;
/// Raw digest length of SHA-512-crypt (64 bytes).
pub const SHA512_LEN: usize = 64;
/// Raw digest length of MD5-crypt (16 bytes).
pub const MD5_LEN: usize = 16;

/// Output order of the SHA-256-crypt digest bytes before encoding.
pub const SHA256_TRANSPOSE: [u8; SHA256_LEN] = [
    20, 10, 0, 11, 1, 21, 2, 22, 12, 23, 13, 3, 14, 4, 24, 5, //
    25, 15, 26, 16, 6, 17, 7, 27, 8, 28, 18, 29, 19, 9, 30, 31,
];

/// Output order of the SHA-512-crypt digest bytes before encoding.
pub const SHA512_TRANSPOSE: [u8; SHA512_LEN] = [
    42, 21, 0, 1, 43, 22, 23, 2, 44, 45, 24, 3, 4, 46, 25, 26, //
    5, 47, 48, 27, 6, 7, 49, 28, 29, 8, 50, 51, 30, 9, 10, 52, //
    31, 32, 11, 53, 54, 33, 12, 13, 55, 34, 35, 14, 56, 57, 36, 15, //
    16, 58, 37, 38, 17, 59, 60, 39, 18, 19, 61, 40, 41, 20, 62, 63,
];

/// Output order of the MD5-crypt digest bytes before encoding.
pub const MD5_TRANSPOSE: [u8; MD5_LEN] = [12, 6, 0, 13, 7, 1, 14, 8, 2, 15, 9, 3, 5, 10, 4, 11];

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(order: &[u8]) -> bool {
        let mut seen = vec![false; order.len()];
        for &i in order {
            let i = usize::from(i);
            if i >= seen.len() || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }

    #[test]
    fn transpose_tables_are_permutations() {
        assert!(is_permutation(&SHA256_TRANSPOSE));
        assert!(is_permutation(&SHA512_TRANSPOSE));
        assert!(is_permutation(&MD5_TRANSPOSE));
    }
}
