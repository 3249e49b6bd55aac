//! Stock producers every node runs.

use crate::nfw::NodeForwarder;
use bytes::Bytes;
use futures::FutureExt;
use ndn_wire::{Data, Interest, Name};
use std::sync::Arc;
use tracing::debug;

/// The ping and certificate responders installed on every node.
///
/// Ping answers under `/ndn/<label>/ping` with zero freshness so repeated
/// MustBeFresh pings always travel the network. The certificate responder
/// serves `/ndn/<label>/cert` with a long freshness.
pub struct DefaultServers {
    fw: Arc<NodeForwarder>,
    label: String,
}

impl DefaultServers {
    /// Install the default producers on a forwarder
    pub fn install(fw: Arc<NodeForwarder>, label: impl Into<String>) -> Self {
        let servers = Self {
            fw,
            label: label.into(),
        };
        servers.restart();
        servers
    }

    /// Re-register the producers, e.g. after the node record changed
    pub fn restart(&self) {
        let base = Name::root().append("ndn").append(&self.label);

        self.fw.register_producer(
            base.append("ping"),
            Arc::new(|interest: Interest| {
                async move {
                    Some(Data::new(interest.name.clone(), Bytes::from_static(b"pong")))
                }
                .boxed()
            }),
        );

        let label = self.label.clone();
        self.fw.register_producer(
            base.append("cert"),
            Arc::new(move |interest: Interest| {
                let body = format!("self-signed certificate for /ndn/{}", label);
                async move {
                    Some(
                        Data::new(interest.name.clone(), Bytes::from(body))
                            .with_freshness(60_000),
                    )
                }
                .boxed()
            }),
        );

        debug!("Default servers up for /ndn/{}", self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfw::{ForwarderConfig, ForwarderRegistry};
    use ndn_topology::{Node, TopologyStore};
    use ndn_wire::InterestFlags;

    fn node_with_servers() -> (Arc<TopologyStore>, Arc<NodeForwarder>, DefaultServers) {
        let store = Arc::new(TopologyStore::new());
        let registry = Arc::new(ForwarderRegistry::new());
        store.add_node(Node::new("a".into(), "A"));
        let fw = NodeForwarder::new(
            "a".into(),
            store.clone(),
            registry.clone(),
            ForwarderConfig::default(),
        );
        registry.insert(fw.clone());
        let servers = DefaultServers::install(fw.clone(), "A");
        (store, fw, servers)
    }

    #[tokio::test]
    async fn test_ping_answers() {
        let (_store, fw, _servers) = node_with_servers();
        let interest = Interest::new("/ndn/A/ping/12345".parse().unwrap())
            .with_flags(InterestFlags::MUST_BE_FRESH);
        let data = fw.express_interest(interest).await.unwrap();
        assert_eq!(data.content, Bytes::from_static(b"pong"));
        assert_eq!(data.freshness_ms, 0);
    }

    #[tokio::test]
    async fn test_cert_answers_with_freshness() {
        let (_store, fw, _servers) = node_with_servers();
        let data = fw
            .express_interest(Interest::new("/ndn/A/cert".parse().unwrap()))
            .await
            .unwrap();
        assert_eq!(data.freshness_ms, 60_000);
    }

    #[tokio::test]
    async fn test_prefixes_advertised() {
        let (store, _fw, _servers) = node_with_servers();
        let node = store.node(&"a".into()).unwrap();
        let prefixes: Vec<String> = node
            .state
            .produced_prefixes
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert!(prefixes.contains(&"/ndn/A/ping".to_string()));
        assert!(prefixes.contains(&"/ndn/A/cert".to_string()));
    }
}
