use log::{debug, trace};

use super::{Block, hash_block, valid_proof};

/// Check linkage and proof-of-work across an entire chain.
///
/// Every block after the first must point at its predecessor's hash and
/// carry a proof solving the predecessor's puzzle. Empty and one-block chains
/// are valid.
///
/// Transaction contents, index monotonicity and timestamp ordering are not
/// checked. A peer can therefore serve a chain with renumbered or
/// back-dated blocks and it will still be accepted.
pub fn is_valid_chain(chain: &[Block]) -> bool {
    for (i, pair) in chain.windows(2).enumerate() {
        let (prev, block) = (&pair[0], &pair[1]);
        trace!("VALIDATE - {prev:?} -> {block:?}");

        let prev_hash = hash_block(prev);
        if !block.previous_hash.matches(&prev_hash) {
            debug!(
                "VALIDATE - block at position {} does not link to {prev_hash}",
                i + 1
            );
            return false;
        }

        if !valid_proof(prev.proof, block.proof) {
            debug!(
                "VALIDATE - block at position {} has invalid proof {} (last_proof={})",
                i + 1,
                block.proof,
                prev.proof
            );
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::is_valid_chain;
    use crate::blockchain::{Block, Ledger, PreviousHash, find_proof};

    fn mined_chain(blocks: usize) -> Vec<Block> {
        let mut ledger = Ledger::new();
        for i in 1..blocks {
            ledger.new_transaction("A", "B", 10 * i as i64);
            let job = ledger.mining_job();
            let proof = find_proof(job.last_proof);
            ledger.seal_mined(&job, proof, "miner").unwrap();
        }
        ledger.chain().to_vec()
    }

    #[test]
    fn trivial_chains_are_valid() {
        assert!(is_valid_chain(&[]));
        assert!(is_valid_chain(&[Block::genesis(100)]));
        // a lone block is never inspected
        assert!(is_valid_chain(&[Block::genesis(7)]));
    }

    #[test]
    fn mined_chain_is_valid() {
        assert!(is_valid_chain(&mined_chain(3)));
    }

    #[test]
    fn tampered_amount_breaks_the_link() {
        let mut chain = mined_chain(3);
        chain[1].transactions[0].amount += 1;
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn wrong_proof_is_rejected() {
        let mut chain = mined_chain(2);
        chain[1].proof += 1;
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn sentinel_link_after_genesis_is_rejected() {
        let mut chain = mined_chain(2);
        chain[1].previous_hash = PreviousHash::Sentinel(1);
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn index_and_timestamp_are_not_checked() {
        let genesis = Block::genesis(100);
        let next = Block::new_with_timestamp(
            42,
            vec![],
            find_proof(100),
            PreviousHash::Digest(genesis.hash()),
            0.0,
        );
        assert!(is_valid_chain(&[genesis, next]));
    }
}
