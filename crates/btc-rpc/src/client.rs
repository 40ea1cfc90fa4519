use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine};
use bitcoin::{
    consensus::encode::{deserialize_hex, serialize_hex},
    Block, BlockHash, Transaction, Txid,
};
use reqwest::{
    header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::{de, Deserialize};
use serde_json::{json, value::Value};
use tracing::*;

use crate::{
    error::{BitcoinRpcError, ClientError, ClientResult},
    traits::{Broadcaster, Reader, Signer, Wallet},
    types::{SignRawTransactionResult, Unspent},
};

/// Serializes a value into a JSON-RPC parameter.
fn to_value<T: serde::Serialize>(value: T) -> ClientResult<Value> {
    serde_json::to_value(value).map_err(|e| ClientError::Param(e.to_string()))
}

/// An `async` client for a `bitcoind` instance.
///
/// Calls are single-shot: a failed lookup aborts the current block's
/// processing and is reported by the caller, so there is no retry loop here.
#[derive(Debug)]
pub struct BitcoinClient {
    /// The URL of the `bitcoind` RPC endpoint.
    url: String,
    /// The underlying `async` HTTP client.
    client: Client,
    /// The ID of the current request.
    id: AtomicUsize,
}

/// Response envelope returned by the `bitcoind` RPC server.
#[derive(Debug, Clone, Deserialize)]
struct Response<R> {
    result: Option<R>,
    error: Option<BitcoinRpcError>,
}

impl BitcoinClient {
    /// Creates a new [`BitcoinClient`] with the given URL, username, and password.
    pub fn new(url: String, username: String, password: String) -> ClientResult<Self> {
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::MissingUserPassword);
        }

        let user_pw = general_purpose::STANDARD.encode(format!("{username}:{password}"));
        let authorization = format!("Basic {user_pw}")
            .parse()
            .map_err(|_| ClientError::Other("error parsing auth header".to_string()))?;
        let content_type = "application/json"
            .parse()
            .map_err(|_| ClientError::Other("error parsing content-type header".to_string()))?;
        let headers =
            HeaderMap::from_iter([(AUTHORIZATION, authorization), (CONTENT_TYPE, content_type)]);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Other(format!("could not create client: {e}")))?;

        trace!(%url, "created bitcoin client");

        Ok(Self {
            url,
            client,
            id: AtomicUsize::new(0),
        })
    }

    fn next_id(&self) -> usize {
        self.id.fetch_add(1, Ordering::AcqRel)
    }

    async fn call<T: de::DeserializeOwned + fmt::Debug>(
        &self,
        method: &str,
        params: &[Value],
    ) -> ClientResult<T> {
        trace!(%method, ?params, "calling bitcoin client");

        let response = self
            .client
            .post(&self.url)
            .json(&json!({
                "jsonrpc": "1.0",
                "id": self.next_id(),
                "method": method,
                "params": params,
            }))
            .send()
            .await
            .map_err(|err| {
                if err.is_connect() {
                    ClientError::Connection(err.to_string())
                } else if err.is_timeout() {
                    ClientError::Timeout
                } else if err.is_status() {
                    ClientError::Status(err.to_string())
                } else {
                    ClientError::Other(err.to_string())
                }
            })?;

        let data = response
            .json::<Response<T>>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        if let Some(err) = data.error {
            return Err(err.into());
        }
        data.result
            .ok_or_else(|| ClientError::Parse("empty result".to_string()))
    }
}

#[async_trait]
impl Reader for BitcoinClient {
    async fn get_block_count(&self) -> ClientResult<u64> {
        self.call::<u64>("getblockcount", &[]).await
    }

    async fn get_block_hash(&self, height: u64) -> ClientResult<BlockHash> {
        self.call::<BlockHash>("getblockhash", &[to_value(height)?])
            .await
    }

    async fn get_block(&self, hash: &BlockHash) -> ClientResult<Block> {
        // Verbosity 0 yields the raw block as hex.
        let raw = self
            .call::<String>("getblock", &[to_value(hash.to_string())?, to_value(0)?])
            .await?;
        deserialize_hex::<Block>(&raw).map_err(|e| ClientError::Parse(e.to_string()))
    }

    async fn get_block_at(&self, height: u64) -> ClientResult<Block> {
        let hash = self.get_block_hash(height).await?;
        self.get_block(&hash).await
    }
}

#[async_trait]
impl Wallet for BitcoinClient {
    async fn list_unspent(&self) -> ClientResult<Vec<Unspent>> {
        self.call::<Vec<Unspent>>("listunspent", &[]).await
    }
}

#[async_trait]
impl Signer for BitcoinClient {
    async fn sign_raw_transaction_with_wallet(
        &self,
        tx: &Transaction,
    ) -> ClientResult<SignRawTransactionResult> {
        let tx_hex = serialize_hex(tx);
        trace!(%tx_hex, "signing transaction");
        self.call::<SignRawTransactionResult>(
            "signrawtransactionwithwallet",
            &[to_value(tx_hex)?],
        )
        .await
    }
}

#[async_trait]
impl Broadcaster for BitcoinClient {
    async fn send_raw_transaction(&self, tx: &Transaction) -> ClientResult<Txid> {
        let tx_hex = serialize_hex(tx);
        trace!(%tx_hex, "sending raw transaction");
        match self.call::<Txid>("sendrawtransaction", &[to_value(tx_hex)?]).await {
            Ok(txid) => Ok(txid),
            // -27: transaction already in chain, which is success for us.
            Err(ClientError::Server(-27, _)) => Ok(tx.compute_txid()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_credentials() {
        let err = BitcoinClient::new(
            "http://localhost:8332".to_string(),
            String::new(),
            "hunter2".to_string(),
        )
        .unwrap_err();
        assert_eq!(err, ClientError::MissingUserPassword);
    }

    #[test]
    fn unspent_deserializes_bitcoind_shape() {
        let raw = r#"{
            "txid": "aa5b5c95f3cb00000000000000000000000000000000000000000000000000aa",
            "vout": 1,
            "address": "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            "scriptPubKey": "76a91462e907b15cbf27d5425399ebf6f0fb50ebb88f1888ac",
            "amount": 0.05,
            "confirmations": 12,
            "spendable": true,
            "solvable": true
        }"#;
        let unspent: Unspent = serde_json::from_str(raw).unwrap();
        assert_eq!(unspent.vout, 1);
        assert!(unspent.spendable);
        assert_eq!(unspent.amount, 0.05);
    }
}
