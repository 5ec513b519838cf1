//! The SHA-crypt digest engine, generic over the SHA-2 width.

use sha2::digest::{Digest, FixedOutputReset};

use super::secret::{SecretBytes, finish, finish_into, repeat_sequence};

/// Runs the SHA-crypt construction and returns the raw digest.
///
/// The output is a pure function of `(key, salt, rounds)`. Every buffer
/// derived from the key is zeroed before this returns.
pub fn sha_crypt<D: Digest + FixedOutputReset>(key: &[u8], salt: &[u8], rounds: u32) -> SecretBytes {
    let mut hasher = D::new();

    Digest::update(&mut hasher, key);
    Digest::update(&mut hasher, salt);
    Digest::update(&mut hasher, key);
    let sum_b = finish(&mut hasher);

    Digest::update(&mut hasher, key);
    Digest::update(&mut hasher, salt);
    Digest::update(&mut hasher, &*repeat_sequence(&sum_b, key.len()));
    let mut bits = key.len();
    while bits > 0 {
        if bits & 1 != 0 {
            Digest::update(&mut hasher, &*sum_b);
        } else {
            Digest::update(&mut hasher, key);
        }
        bits >>= 1;
    }
    let mut sum_a = finish(&mut hasher);
    drop(sum_b);

    for _ in 0..key.len() {
        Digest::update(&mut hasher, key);
    }
    let seq_p = repeat_sequence(&finish(&mut hasher), key.len());

    for _ in 0..16 + usize::from(sum_a[0]) {
        Digest::update(&mut hasher, salt);
    }
    let seq_s = repeat_sequence(&finish(&mut hasher), salt.len());

    for round in 0..rounds {
        let odd = round & 1 != 0;

        if odd {
            Digest::update(&mut hasher, &*seq_p);
        } else {
            Digest::update(&mut hasher, &*sum_a);
        }
        if round % 3 != 0 {
            Digest::update(&mut hasher, &*seq_s);
        }
        if round % 7 != 0 {
            Digest::update(&mut hasher, &*seq_p);
        }
        if odd {
            Digest::update(&mut hasher, &*sum_a);
        } else {
            Digest::update(&mut hasher, &*seq_p);
        }
        finish_into(&mut hasher, &mut sum_a);
    }

    log::trace!(
        "sha-crypt digest computed: {} bytes, {rounds} rounds, {} byte salt",
        sum_a.len(),
        salt.len()
    );
    sum_a
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Sha256, Sha512};

    #[test]
    fn output_width_follows_primitive() {
        assert_eq!(sha_crypt::<Sha256>(b"pw", b"salt", 1000).len(), 32);
        assert_eq!(sha_crypt::<Sha512>(b"pw", b"salt", 1000).len(), 64);
    }

    #[test]
    fn deterministic() {
        let a = sha_crypt::<Sha256>(b"secret", b"salt", 1000);
        let b = sha_crypt::<Sha256>(b"secret", b"salt", 1000);
        assert_eq!(a, b);
    }

    #[test]
    fn every_input_changes_the_digest() {
        let base = sha_crypt::<Sha256>(b"secret", b"salt", 1000);
        assert_ne!(base, sha_crypt::<Sha256>(b"secreT", b"salt", 1000));
        assert_ne!(base, sha_crypt::<Sha256>(b"secret", b"salT", 1000));
        assert_ne!(base, sha_crypt::<Sha256>(b"secret", b"salt", 1001));
    }

    #[test]
    fn empty_key_is_accepted() {
        let digest = sha_crypt::<Sha512>(b"", b"salt", 1000);
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn key_longer_than_digest() {
        let key = [b'k'; 200];
        let digest = sha_crypt::<Sha256>(&key, b"salt", 1000);
        assert_eq!(digest.len(), 32);
    }
}
