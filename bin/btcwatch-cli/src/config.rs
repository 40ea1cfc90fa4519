use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

/// Node connection settings; shares the daemon's config file and ignores
/// the fields only the daemon uses.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rpc_host: String,
    pub rpc_user: String,
    pub rpc_password: String,

    #[serde(default)]
    pub disable_tls: bool,
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
    fn daemon_only_fields_are_ignored() {
        let config: Config = serde_json::from_str(
            r#"{
                "rpc_host": "127.0.0.1:8332",
                "rpc_user": "u",
                "rpc_password": "p",
                "zmq_listen": "tcp://127.0.0.1:8001"
            }"#,
        )
        .unwrap();
        assert_eq!(config.rpc_url(), "https://127.0.0.1:8332");
    }
}
