use sha2::{Digest, Sha256};

/// SHA-256 digest (32 bytes).
pub type Hash = [u8; 32];

/// Hash arbitrary data with SHA-256.
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 over the ordered concatenation of all messages.
///
/// The reveal-all suites sign this digest; Dilithium-SD signs it over the
/// chain digests instead of the raw messages.
pub fn sha256_concat<M: AsRef<[u8]>>(messages: &[M]) -> Hash {
    let mut hasher = Sha256::new();
    for m in messages {
        hasher.update(m.as_ref());
    }
    hasher.finalize().into()
}

/// One link of the salted hash chain: `SHA256(seed ‖ message)`.
pub fn chain_digest(seed: &[u8], message: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update(message);
    hasher.finalize().into()
}

/// Salted hash chain over an ordered message list.
///
/// `h_i = SHA256(s_{i-1} ‖ m_i)` with `s_0 = seed` and `s_i = h_i`. Each
/// digest commits to its message and to everything chained before it, so
/// altering any message changes every digest from that position forward.
pub fn salted_hash_chain<M: AsRef<[u8]>>(seed: &[u8], messages: &[M]) -> Vec<Hash> {
    let mut digests = Vec::with_capacity(messages.len());
    let mut current: Vec<u8> = seed.to_vec();
    for m in messages {
        let h = chain_digest(&current, m.as_ref());
        digests.push(h);
        current = h.to_vec();
    }
    digests
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_deterministic() {
        let h1 = sha256(b"veil test data");
        let h2 = sha256(b"veil test data");
        assert_eq!(h1, h2);
        assert_ne!(h1, sha256(b"other data"));
    }

    #[test]
    fn test_sha256_concat_equals_manual_concat() {
        let messages = [b"alpha".to_vec(), b"beta".to_vec(), b"gamma".to_vec()];
        let mut joined = Vec::new();
        for m in &messages {
            joined.extend_from_slice(m);
        }
        assert_eq!(sha256_concat(&messages), sha256(&joined));
    }

    #[test]
    fn test_chain_is_deterministic() {
        let salt = [0x42u8; 16];
        let messages = [b"m1".to_vec(), b"m2".to_vec(), b"m3".to_vec()];
        let c1 = salted_hash_chain(&salt, &messages);
        let c2 = salted_hash_chain(&salt, &messages);
        assert_eq!(c1, c2);
        assert_eq!(c1.len(), 3);
    }

    #[test]
    fn test_chain_differs_when_message_altered() {
        let salt = [0xA1u8; 16];
        let messages = [b"m1".to_vec(), b"m2".to_vec(), b"m3".to_vec()];
        let altered = [b"m1".to_vec(), b"mX".to_vec(), b"m3".to_vec()];
        let c1 = salted_hash_chain(&salt, &messages);
        let c2 = salted_hash_chain(&salt, &altered);

        // Prefix before the altered message is untouched; everything from
        // that position forward diverges.
        assert_eq!(c1[0], c2[0]);
        assert_ne!(c1[1], c2[1]);
        assert_ne!(c1[2], c2[2]);
    }

    #[test]
    fn test_chain_differs_per_salt() {
        let messages = [b"m1".to_vec(), b"m2".to_vec()];
        let c1 = salted_hash_chain(&[0x01u8; 16], &messages);
        let c2 = salted_hash_chain(&[0x02u8; 16], &messages);
        assert_ne!(c1[0], c2[0]);
        assert_ne!(c1[1], c2[1]);
    }

    #[test]
    fn test_chain_links_are_seeded() {
        let salt = [0x07u8; 16];
        let messages = [b"m1".to_vec(), b"m2".to_vec()];
        let chain = salted_hash_chain(&salt, &messages);
        assert_eq!(chain[0], chain_digest(&salt, b"m1"));
        assert_eq!(chain[1], chain_digest(&chain[0], b"m2"));
    }

    #[test]
    fn test_chain_empty_messages() {
        let chain = salted_hash_chain::<Vec<u8>>(&[0u8; 16], &[]);
        assert!(chain.is_empty());
    }
}
