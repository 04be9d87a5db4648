use crate::blockchain::{Block, CancelFlag, Ledger, PreviousHash, ProofOfWork};
use crate::config::NodeConfig;
use crate::consensus::{ConsensusResolver, HttpChainSource};
use crate::error::Result;
use crate::peer::{PeerRegistry, split_addresses};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Shared node state: the ledger, known peers and mining/consensus settings.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub peers: Mutex<PeerRegistry>,
    pub resolver: ConsensusResolver<HttpChainSource>,
    pub pow: ProofOfWork,
    pub node_id: String,
    pub cancel: CancelFlag,
}

impl AppState {
    pub fn new(config: &NodeConfig, cancel: CancelFlag) -> Result<Self> {
        let source = HttpChainSource::new(config.peer_timeout)?;
        Ok(Self {
            ledger: Mutex::new(Ledger::new()),
            peers: Mutex::new(PeerRegistry::new()),
            resolver: ConsensusResolver::new(source, config.resolve_concurrency),
            pow: ProofOfWork::new(config.pow_max_attempts),
            node_id: config.node_id.clone(),
            cancel,
        })
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: PreviousHash,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: i64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

/* ---------- Nodes API Models ---------- */

/// Peer addresses, either as a list or as one comma-separated string.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum NodeList {
    Many(Vec<String>),
    Delimited(String),
}

impl NodeList {
    pub fn addresses(&self) -> Vec<&str> {
        match self {
            NodeList::Many(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect(),
            NodeList::Delimited(list) => split_addresses(list).collect(),
        }
    }
}

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<NodeList>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    pub replaced: bool,
    pub chain: Vec<Block>,
}
