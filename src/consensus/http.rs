use log::debug;
use reqwest::Client;
use std::time::Duration;

use super::{ChainSnapshot, ChainSource};
use crate::error::{LedgerError, Result};

/// Path every node serves its full chain on.
pub const CHAIN_PATH: &str = "/chain";

/// Fetches peer chains over HTTP with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpChainSource {
    client: Client,
}

impl HttpChainSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Config(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

impl ChainSource for HttpChainSource {
    async fn fetch_chain(&self, peer: &str) -> Option<ChainSnapshot> {
        let url = format!("http://{peer}{CHAIN_PATH}");
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("FETCH - {url} unreachable: {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            debug!("FETCH - {url} answered {}", response.status());
            return None;
        }
        match response.json::<ChainSnapshot>().await {
            Ok(snapshot) => {
                debug!("FETCH - {url} served {} blocks", snapshot.chain.len());
                Some(snapshot)
            }
            Err(e) => {
                debug!("FETCH - {url} sent an undecodable chain: {e}");
                None
            }
        }
    }
}
