use log::{debug, info};
use std::collections::BTreeSet;
use url::{Position, Url};

use crate::error::{LedgerError, Result};

/// Separator for address lists submitted in a single string.
pub const ADDRESS_DELIMITER: char = ',';

/// Known peers, stored as `host[:port]`.
///
/// Kept sorted so consensus visits peers in a stable order.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    peers: BTreeSet<String>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one peer; returns the identifier it was stored under.
    ///
    /// Registering the same location twice is a no-op.
    pub fn register(&mut self, address: &str) -> Result<String> {
        let peer = canonical_peer(address)?;
        if self.peers.insert(peer.clone()) {
            info!("PEERS - registered {peer:?} (from {address:?})");
        } else {
            debug!("PEERS - {peer:?} already known");
        }
        Ok(peer)
    }

    /// Add every address in `addresses`, or none if any fails to parse.
    pub fn register_all<'a, I>(&mut self, addresses: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let parsed = addresses
            .into_iter()
            .map(canonical_peer)
            .collect::<Result<Vec<_>>>()?;
        for peer in &parsed {
            self.peers.insert(peer.clone());
        }
        info!("PEERS - {} known after registering {}", self.peers.len(), parsed.len());
        Ok(parsed)
    }

    /// Peers in ascending identifier order.
    pub fn peers(&self) -> Vec<String> {
        self.peers.iter().cloned().collect()
    }

    pub fn contains(&self, peer: &str) -> bool {
        self.peers.contains(peer)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

/// Split a delimited address list, dropping blank entries.
pub fn split_addresses(list: &str) -> impl Iterator<Item = &str> {
    list.split(ADDRESS_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Network location (`host[:port]`) of a peer address.
///
/// Bare `host:port` input is read as an `http` URL. URLs without a host
/// (`file:///x`) yield an empty identifier.
pub fn canonical_peer(address: &str) -> Result<String> {
    let address = address.trim();
    let parsed = if address.contains("://") {
        Url::parse(address)
    } else {
        Url::parse(&format!("http://{address}"))
    };
    let url = parsed.map_err(|e| LedgerError::InvalidPeerAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })?;
    Ok(url[Position::BeforeHost..Position::AfterPort].to_string())
}

#[cfg(test)]
mod tests {
    use super::{PeerRegistry, canonical_peer, split_addresses};
    use crate::error::LedgerError;

    #[test]
    fn canonical_form_is_host_and_port() {
        assert_eq!(canonical_peer("http://192.168.0.5:5000").unwrap(), "192.168.0.5:5000");
        assert_eq!(canonical_peer("http://192.168.0.5:5000/chain?x=1").unwrap(), "192.168.0.5:5000");
        assert_eq!(canonical_peer("https://node.example").unwrap(), "node.example");
        assert_eq!(canonical_peer("  localhost:5001 ").unwrap(), "localhost:5001");
        assert_eq!(canonical_peer("http://[::1]:5000").unwrap(), "[::1]:5000");
    }

    #[test]
    fn url_without_host_gives_empty_identifier() {
        assert_eq!(canonical_peer("file:///tmp/node").unwrap(), "");
    }

    #[test]
    fn unparseable_address_is_rejected() {
        let err = canonical_peer("http://host:notaport").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPeerAddress { .. }));
    }

    #[test]
    fn registration_is_idempotent() {
        let mut reg = PeerRegistry::new();
        reg.register("http://10.0.0.1:5000").unwrap();
        reg.register("http://10.0.0.1:5000/").unwrap();
        reg.register("10.0.0.1:5000").unwrap();
        assert_eq!(reg.len(), 1);
        assert!(reg.contains("10.0.0.1:5000"));
    }

    #[test]
    fn peers_come_out_sorted() {
        let mut reg = PeerRegistry::new();
        reg.register_all(split_addresses("http://c:1, http://a:1,http://b:1"))
            .unwrap();
        assert_eq!(reg.peers(), vec!["a:1", "b:1", "c:1"]);
    }

    #[test]
    fn bad_entry_rejects_the_whole_list() {
        let mut reg = PeerRegistry::new();
        let result = reg.register_all(split_addresses("http://a:1, http://b:x"));
        assert!(result.is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn blank_entries_are_dropped() {
        let items: Vec<_> = split_addresses(" a:1 , ,b:2,").collect();
        assert_eq!(items, vec!["a:1", "b:2"]);
    }
}
