//! The MD5-crypt digest engine shared by `$1$` and `$apr1$`.

use md5::{Digest, Md5};

use super::secret::{SecretBytes, finish, finish_into};

/// Runs MD5-crypt for `rounds` rounds (1000 for every published variant).
///
/// The magic prefix is part of the digest input, which is why `$1$` and
/// `$apr1$` hashes differ for the same key and salt.
pub fn md5_crypt(key: &[u8], salt: &[u8], magic: &[u8], rounds: u32) -> SecretBytes {
    let mut hasher = Md5::new();

    hasher.update(key);
    hasher.update(salt);
    hasher.update(key);
    let alt = finish(&mut hasher);

    hasher.update(key);
    hasher.update(magic);
    hasher.update(salt);
    for chunk in key.chunks(alt.len()) {
        hasher.update(&alt[..chunk.len()]);
    }
    drop(alt);

    let mut bits = key.len();
    while bits > 0 {
        if bits & 1 != 0 {
            hasher.update([0u8]);
        } else {
            hasher.update(&key[..1]);
        }
        bits >>= 1;
    }
    let mut sum = finish(&mut hasher);

    for round in 0..rounds {
        let odd = round & 1 != 0;

        if odd {
            hasher.update(key);
        } else {
            hasher.update(&*sum);
        }
        if round % 3 != 0 {
            hasher.update(salt);
        }
        if round % 7 != 0 {
            hasher.update(key);
        }
        if odd {
            hasher.update(&*sum);
        } else {
            hasher.update(key);
        }
        finish_into(&mut hasher, &mut sum);
    }

    log::trace!("md5-crypt digest computed: {rounds} rounds, {} byte salt", salt.len());
    sum
}
