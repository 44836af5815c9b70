use rand::RngCore;
use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of the given data and returns it as a hex string.
pub fn digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Computes a 32-byte block hash for a block proposal.
///
/// The hash covers the summary plus a caller-supplied nonce, so two
/// proposals with identical summaries never collide. `block_hash`
/// picks a random nonce; `block_hash_with_nonce` is deterministic and
/// used by tests.
pub fn block_hash(summary: &str) -> [u8; 32] {
    let mut nonce = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut nonce);
    block_hash_with_nonce(summary, u64::from_le_bytes(nonce))
}

pub fn block_hash_with_nonce(summary: &str, nonce: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(summary.as_bytes());
    hasher.update(nonce.to_le_bytes());
    hasher.finalize().into()
}
