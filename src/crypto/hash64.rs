//! The crypt(3) radix-64 text encoding.
//!
//! Same 64 symbols as Base64 but in the order `./0-9A-Za-z`, no padding, and
//! each 3-byte group is read little-endian with the low 6 bits emitted first.

use zeroize::Zeroizing;

/// The crypt(3) radix-64 alphabet.
pub const ALPHABET: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of symbols produced for `len` input bytes.
pub const fn encoded_len(len: usize) -> usize {
    (len * 8).div_ceil(6)
}

/// Returns `true` if `byte` is a symbol of [`ALPHABET`].
pub fn is_alphabet_byte(byte: u8) -> bool {
    matches!(byte, b'.' | b'/' | b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z')
}

/// Maps one random byte straight onto the alphabet.
pub fn symbol(byte: u8) -> char {
    char::from(ALPHABET[usize::from(byte & 0x3f)])
}

/// Encodes `src` group by group.
///
/// A trailing single byte produces 2 symbols, a trailing pair produces 3; the
/// unused high bits are zero.
pub fn encode(src: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(src.len()));

    for group in src.chunks(3) {
        let value = group
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &b)| acc | u32::from(b) << (8 * i));

        for i in 0..=group.len() {
            out.push(char::from(ALPHABET[((value >> (6 * i)) & 0x3f) as usize]));
        }
    }

    out
}

/// Reorders `digest` through `order` and encodes the result.
///
/// `order[i]` names the digest byte that lands at position `i`. The reordered
/// copy is wiped before returning.
pub fn encode_permuted(digest: &[u8], order: &[u8]) -> String {
    debug_assert_eq!(digest.len(), order.len());

    let permuted = Zeroizing::new(
        order
            .iter()
            .map(|&i| digest[usize::from(i)])
            .collect::<Vec<u8>>(),
    );
    encode(&permuted)
}
