use thiserror::Error;

/// Errors surfaced by ledger, mining and peer operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("chain is empty and no previous hash was given")]
    EmptyChain,

    #[error("chain tip moved while the proof was being searched")]
    StaleTip,

    #[error("proof-of-work search was cancelled")]
    ProofCancelled,

    #[error("proof-of-work search gave up after {attempts} candidates")]
    ProofExhausted { attempts: u64 },

    #[error("invalid peer address {address:?}: {reason}")]
    InvalidPeerAddress { address: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
