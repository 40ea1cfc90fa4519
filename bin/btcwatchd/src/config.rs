use std::{fs, path::Path};

use anyhow::Context;
use bitcoin::Network;
use serde::Deserialize;

/// Daemon configuration, loaded from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// `host:port` of the bitcoind JSON-RPC endpoint.
    pub rpc_host: String,
    pub rpc_user: String,
    pub rpc_password: String,

    /// Connect over plain http instead of https.
    #[serde(default)]
    pub disable_tls: bool,

    #[serde(default = "default_network")]
    pub network: Network,

    /// Address the block notification endpoint listens on.
    #[serde(default = "default_http_listen")]
    pub http_listen: String,

    /// ZMQ PUB endpoint batches are published to.
    #[serde(default = "default_zmq_listen")]
    pub zmq_listen: String,
}

fn default_network() -> Network {
    Network::Bitcoin
}

fn default_http_listen() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_zmq_listen() -> String {
    "tcp://127.0.0.1:8001".to_string()
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("malformed config {}", path.display()))?;
        Ok(config)
    }

    pub fn rpc_url(&self) -> String {
        let scheme = if self.disable_tls { "http" } else { "https" };
        format!("{scheme}://{}", self.rpc_host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"rpc_host": "127.0.0.1:8332", "rpc_user": "u", "rpc_password": "p"}"#,
        )
        .unwrap();
        assert_eq!(config.network, Network::Bitcoin);
        assert_eq!(config.http_listen, "127.0.0.1:8000");
        assert_eq!(config.zmq_listen, "tcp://127.0.0.1:8001");
        assert_eq!(config.rpc_url(), "https://127.0.0.1:8332");
    }

    #[test]
    fn testnet_over_plain_http() {
        let config: Config = serde_json::from_str(
            r#"{
                "rpc_host": "node:18332",
                "rpc_user": "u",
                "rpc_password": "p",
                "disable_tls": true,
                "network": "testnet"
            }"#,
        )
        .unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.rpc_url(), "http://node:18332");
    }
}
