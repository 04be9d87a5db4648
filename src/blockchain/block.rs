use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::GENESIS_PREVIOUS_HASH;
use crate::transaction::Transaction;

/// Link from a block to its predecessor.
///
/// Genesis carries the numeric sentinel `1` instead of a digest, and it
/// serializes as a bare JSON number so hashes agree with other nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreviousHash {
    Sentinel(u64),
    Digest(String),
}

impl PreviousHash {
    /// True if this link points at a block whose hash is `digest`.
    pub fn matches(&self, digest: &str) -> bool {
        match self {
            PreviousHash::Digest(d) => d == digest,
            PreviousHash::Sentinel(_) => false,
        }
    }
}

impl From<String> for PreviousHash {
    fn from(digest: String) -> Self {
        PreviousHash::Digest(digest)
    }
}

/// A single block in the chain holding a batch of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // seconds since the Unix epoch (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: PreviousHash,
}

impl Block {
    /// Create the first block of a chain.
    pub fn genesis(proof: u64) -> Self {
        Self::new(1, Vec::new(), proof, PreviousHash::Sentinel(GENESIS_PREVIOUS_HASH))
    }

    /// Create a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: PreviousHash,
    ) -> Self {
        Self::new_with_timestamp(index, transactions, proof, previous_hash, now_secs())
    }

    pub fn new_with_timestamp(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: PreviousHash,
        timestamp: f64,
    ) -> Self {
        Self {
            index,
            timestamp,
            transactions,
            proof,
            previous_hash,
        }
    }

    /// SHA-256 of the canonical form of this block.
    pub fn hash(&self) -> String {
        super::hasher::hash_block(self)
    }
}

/// Current time in fractional seconds.
fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::{Block, PreviousHash};
    use crate::transaction::Transaction;

    #[test]
    fn genesis_uses_sentinel_link() {
        let b = Block::genesis(100);
        assert_eq!(b.index, 1);
        assert_eq!(b.proof, 100);
        assert!(b.transactions.is_empty());
        assert_eq!(b.previous_hash, PreviousHash::Sentinel(1));
        assert!(b.timestamp > 0.0);
    }

    #[test]
    fn previous_hash_serializes_untagged() {
        let sentinel = serde_json::to_string(&PreviousHash::Sentinel(1)).unwrap();
        assert_eq!(sentinel, "1");

        let digest = serde_json::to_string(&PreviousHash::Digest("ab".into())).unwrap();
        assert_eq!(digest, "\"ab\"");

        let back: PreviousHash = serde_json::from_str("1").unwrap();
        assert_eq!(back, PreviousHash::Sentinel(1));
        let back: PreviousHash = serde_json::from_str("\"ab\"").unwrap();
        assert_eq!(back, PreviousHash::Digest("ab".into()));
    }

    #[test]
    fn sentinel_never_matches_a_digest() {
        assert!(!PreviousHash::Sentinel(1).matches("1"));
        assert!(PreviousHash::Digest("ff".into()).matches("ff"));
        assert!(!PreviousHash::Digest("ff".into()).matches("fe"));
    }

    #[test]
    fn block_json_uses_wire_field_names() {
        let b = Block::new_with_timestamp(
            2,
            vec![Transaction::new("a", "b", -3)],
            35293,
            PreviousHash::Digest("abc".into()),
            1.5,
        );
        let v = serde_json::to_value(&b).unwrap();
        for key in ["index", "timestamp", "transactions", "proof", "previous_hash"] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
        assert_eq!(v["transactions"][0]["amount"], -3);
        assert_eq!(v["transactions"][0]["sender"], "a");
        assert_eq!(v["transactions"][0]["recipient"], "b");

        let back: Block = serde_json::from_value(v).unwrap();
        assert_eq!(back, b);
    }
}
