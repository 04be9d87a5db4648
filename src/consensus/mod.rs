pub mod http;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::pin::pin;
use std::sync::Mutex;

use crate::blockchain::{Block, Ledger, is_valid_chain};

pub use http::HttpChainSource;

/// A peer's chain as served on its `/chain` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// Where peer chains come from.
///
/// `None` means the peer could not be reached or answered with something
/// unusable; such peers are skipped.
pub trait ChainSource {
    fn fetch_chain(&self, peer: &str) -> impl Future<Output = Option<ChainSnapshot>> + Send;
}

/// A peer chain that beat the local one.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub peer: String,
    pub chain: Vec<Block>,
}

/// Outcome of one resolution round.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub replaced: bool,
    pub chain: Vec<Block>,
}

/// Longest-valid-chain rule over a set of peers.
pub struct ConsensusResolver<S> {
    source: S,
    concurrency: usize,
}

impl<S: ChainSource> ConsensusResolver<S> {
    /// `concurrency` bounds how many peer fetches are in flight at once.
    pub fn new(source: S, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    /// Find the longest valid peer chain strictly longer than `local_len`.
    ///
    /// Peers are judged in the order given. A later peer must be strictly
    /// longer than the best so far, so among equally long chains the first
    /// peer listed wins.
    pub async fn select_longest(&self, peers: &[String], local_len: usize) -> Option<Candidate> {
        let source = &self.source;
        let mut fetches = pin!(
            stream::iter(peers)
                .map(move |peer| async move { (peer, source.fetch_chain(peer).await) })
                .buffered(self.concurrency)
        );

        let mut best_len = local_len;
        let mut best = None;
        while let Some((peer, snapshot)) = fetches.next().await {
            let Some(snapshot) = snapshot else {
                debug!("CONSENSUS - peer {peer:?} skipped: no usable chain");
                continue;
            };
            if snapshot.length != snapshot.chain.len() {
                warn!(
                    "CONSENSUS - peer {peer:?} skipped: reports length {} but sent {} blocks",
                    snapshot.length,
                    snapshot.chain.len()
                );
                continue;
            }
            if snapshot.length <= best_len {
                debug!(
                    "CONSENSUS - peer {peer:?} not longer ({} <= {best_len})",
                    snapshot.length
                );
                continue;
            }
            if !is_valid_chain(&snapshot.chain) {
                debug!("CONSENSUS - peer {peer:?} sent an invalid chain");
                continue;
            }
            best_len = snapshot.length;
            best = Some(Candidate {
                peer: peer.clone(),
                chain: snapshot.chain,
            });
        }
        best
    }

    /// Replace the ledger's chain with the longest valid peer chain, if any
    /// is longer.
    ///
    /// Peers are contacted without holding the ledger lock; the swap itself
    /// happens under the lock and only if the winner still beats the local
    /// chain at that moment.
    pub async fn resolve(&self, peers: &[String], ledger: &Mutex<Ledger>) -> Resolution {
        let local_len = ledger.lock().expect("mutex poisoned").len();
        let winner = self.select_longest(peers, local_len).await;

        let mut ledger = ledger.lock().expect("mutex poisoned");
        let replaced = match winner {
            Some(candidate) if candidate.chain.len() > ledger.len() => {
                info!(
                    "CONSENSUS - adopting {} blocks from {:?}",
                    candidate.chain.len(),
                    candidate.peer
                );
                ledger.replace_chain(candidate.chain);
                true
            }
            Some(candidate) => {
                info!(
                    "CONSENSUS - chain from {:?} no longer longer than ours ({} blocks)",
                    candidate.peer,
                    ledger.len()
                );
                false
            }
            None => {
                debug!("CONSENSUS - our chain is authoritative ({} blocks)", ledger.len());
                false
            }
        };

        Resolution {
            replaced,
            chain: ledger.chain().to_vec(),
        }
    }
}
