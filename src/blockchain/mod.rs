pub mod block;
pub mod hasher;
pub mod model;
pub mod pow;
pub mod validator;

pub use block::{Block, PreviousHash};
pub use hasher::hash_block;
pub use model::{Ledger, MiningJob};
pub use pow::{CancelFlag, ProofOfWork, find_proof, valid_proof};
pub use validator::is_valid_chain;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Stand-in for the genesis block's missing predecessor hash.
pub const GENESIS_PREVIOUS_HASH: u64 = 1;

/// Hex prefix a proof digest must start with (fixed difficulty).
pub const POW_PREFIX: &str = "0000";

/// Default ceiling on proof candidates before a search gives up.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 100_000_000;

/// Sender recorded on mining rewards.
pub const REWARD_SENDER: &str = "0";

/// Amount credited to the miner of each block.
pub const MINING_REWARD: i64 = 1;
