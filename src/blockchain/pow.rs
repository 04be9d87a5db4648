use log::{debug, info};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{DEFAULT_MAX_ATTEMPTS, POW_PREFIX};
use crate::error::{LedgerError, Result};

/// How many candidates are tried between cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 4096;

/// Check whether `proof` solves the puzzle posed by `last_proof`.
///
/// The puzzle is the SHA-256 of both numbers written in decimal back to back,
/// which must start with `POW_PREFIX` in hex.
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    let digest = Sha256::digest(guess.as_bytes());
    hex::encode(&digest[..POW_PREFIX.len().div_ceil(2)]).starts_with(POW_PREFIX)
}

/// Smallest proof (counting up from 0) that solves the puzzle for `last_proof`.
///
/// Unbounded. Prefer [`ProofOfWork::search`] where a caller may need to stop it.
pub fn find_proof(last_proof: u64) -> u64 {
    let mut proof = 0;
    while !valid_proof(last_proof, proof) {
        proof += 1;
    }
    proof
}

/// Shared stop signal for long-running searches.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Brute-force proof search with a ceiling and cooperative cancellation.
#[derive(Debug, Clone, Copy)]
pub struct ProofOfWork {
    max_attempts: u64,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl ProofOfWork {
    pub fn new(max_attempts: u64) -> Self {
        Self { max_attempts }
    }

    /// Same answer as [`find_proof`], but gives up once `max_attempts`
    /// candidates were tried or `cancel` is raised.
    pub fn search(&self, last_proof: u64, cancel: &CancelFlag) -> Result<u64> {
        debug!("POW - searching proof for last_proof={last_proof}");
        for proof in 0..self.max_attempts {
            if proof % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
                info!("POW - search for last_proof={last_proof} cancelled at candidate {proof}");
                return Err(LedgerError::ProofCancelled);
            }
            if valid_proof(last_proof, proof) {
                debug!("POW - found proof={proof} for last_proof={last_proof}");
                return Ok(proof);
            }
        }
        Err(LedgerError::ProofExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CancelFlag, ProofOfWork, find_proof, valid_proof};
    use crate::error::LedgerError;

    #[test]
    fn known_proof_after_genesis() {
        assert!(valid_proof(100, 35293));
        assert_eq!(find_proof(100), 35293);
    }

    #[test]
    fn found_proofs_are_valid_and_minimal() {
        let proof = find_proof(35293);
        assert_eq!(proof, 35089);
        assert!(valid_proof(35293, proof));
        assert!((0..proof).all(|p| !valid_proof(35293, p)));
    }

    #[test]
    fn most_candidates_fail() {
        assert!(!valid_proof(100, 0));
        assert!(!valid_proof(100, 35292));
        assert!(!valid_proof(100, 35294));
    }

    #[test]
    fn search_agrees_with_find_proof() {
        let pow = ProofOfWork::default();
        assert_eq!(pow.search(100, &CancelFlag::new()).unwrap(), 35293);
    }

    #[test]
    fn search_stops_at_ceiling() {
        let pow = ProofOfWork::new(1000);
        match pow.search(100, &CancelFlag::new()) {
            Err(LedgerError::ProofExhausted { attempts }) => assert_eq!(attempts, 1000),
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn search_honours_cancellation() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let result = ProofOfWork::default().search(100, &cancel);
        assert!(matches!(result, Err(LedgerError::ProofCancelled)));
    }
}
