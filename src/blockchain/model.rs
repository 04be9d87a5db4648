use log::{debug, info};

use super::{
    Block, GENESIS_PROOF, MINING_REWARD, PreviousHash, REWARD_SENDER, hash_block, is_valid_chain,
};
use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;

/// What a miner needs from the tip to search for the next proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningJob {
    pub last_proof: u64,
    pub previous_hash: String,
}

/// In-memory chain plus the pool of transactions waiting for the next block.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a ledger whose chain holds only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis(GENESIS_PROOF)],
            pending: Vec::new(),
        }
    }

    /// Queue a transaction and return the index of the block that will hold it.
    pub fn new_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: i64,
    ) -> u64 {
        self.pending.push(Transaction::new(sender, recipient, amount));
        self.chain.len() as u64 + 1
    }

    /// Seal the pending pool into a new block and append it.
    ///
    /// Without `previous_hash` the block links to the current tip.
    pub fn new_block(&mut self, proof: u64, previous_hash: Option<PreviousHash>) -> Result<&Block> {
        let previous_hash = match previous_hash {
            Some(h) => h,
            None => {
                let tip = self.chain.last().ok_or(LedgerError::EmptyChain)?;
                PreviousHash::Digest(hash_block(tip))
            }
        };

        let block = Block::new(
            self.chain.len() as u64 + 1,
            std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        );
        debug!(
            "LEDGER - sealed block #{} with {} txs (proof={})",
            block.index,
            block.transactions.len(),
            block.proof
        );
        self.chain.push(block);
        Ok(self.tip())
    }

    /// Return the last block in the chain.
    pub fn tip(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Snapshot of the tip for an off-lock proof search.
    pub fn mining_job(&self) -> MiningJob {
        let tip = self.tip();
        MiningJob {
            last_proof: tip.proof,
            previous_hash: hash_block(tip),
        }
    }

    /// Finish a mining round: reward `miner` and seal the block on top of the
    /// tip the job was taken from.
    ///
    /// Fails with `StaleTip` if the chain moved since `job` was taken; the
    /// pool is left untouched in that case.
    pub fn seal_mined(&mut self, job: &MiningJob, proof: u64, miner: &str) -> Result<&Block> {
        if hash_block(self.tip()) != job.previous_hash {
            return Err(LedgerError::StaleTip);
        }
        self.new_transaction(REWARD_SENDER, miner, MINING_REWARD);
        let block = self.new_block(proof, Some(PreviousHash::Digest(job.previous_hash.clone())))?;
        info!(
            "MINER - forged block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        Ok(block)
    }

    /// Swap in a whole new chain (consensus replacement).
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        info!(
            "LEDGER - chain replaced: {} -> {} blocks",
            self.chain.len(),
            chain.len()
        );
        self.chain = chain;
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_valid(&self) -> bool {
        is_valid_chain(&self.chain)
    }
}
