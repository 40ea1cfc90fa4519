//! Per-block classification pipeline.

use std::sync::Arc;

use bitcoin::{Network, Transaction};
use btcwatch_codec::{decode_op_return, resolve_address};
use btcwatch_rpc::{traits::Reader, ClientError};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::*;

use crate::message::{tx_result, OpReturnMsg, ProcessedBlock, ProcessedTx, TxResult, ValueTransfer};

/// Error from [`BlockProcessor::process_block`].
#[derive(Debug, Error)]
pub enum ScanError {
    /// A node lookup failed; the whole height is aborted, nothing partial is
    /// published.
    #[error("bitcoind lookup failed: {0}")]
    Rpc(#[from] ClientError),

    /// The height does not fit the published batch's signed 32-bit field.
    #[error("height {0} does not fit the wire format")]
    HeightOutOfRange(u64),
}

/// Classifies every output of every transaction in a block.
///
/// Transactions are processed concurrently, one task each; the assembled
/// batch keeps only transactions that carried an OP_RETURN message. The
/// order of transactions in the batch follows task completion and is not
/// stable across runs; the order of outputs within a transaction is.
pub struct BlockProcessor<R> {
    client: Arc<R>,
    network: Network,
}

impl<R: Reader> BlockProcessor<R> {
    pub fn new(client: Arc<R>, network: Network) -> Self {
        Self { client, network }
    }

    /// Fetches the block at `height` and classifies it into a
    /// [`ProcessedBlock`]. A block with no message-carrying transactions
    /// still yields a batch, so subscribers see one message per block.
    pub async fn process_block(&self, height: u64) -> Result<ProcessedBlock, ScanError> {
        let wire_height =
            i32::try_from(height).map_err(|_| ScanError::HeightOutOfRange(height))?;
        let hash = self.client.get_block_hash(height).await?;
        let block = self.client.get_block(&hash).await?;

        debug!(height, txs = block.txdata.len(), "processing block");

        let mut workers = JoinSet::new();
        for tx in block.txdata {
            let network = self.network;
            workers.spawn(async move { classify_tx(&tx, network) });
        }

        let mut txs = Vec::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Some(processed)) => txs.push(processed),
                Ok(None) => {}
                // A failed worker loses only its own transaction.
                Err(err) => warn!(%err, height, "transaction worker failed"),
            }
        }

        Ok(ProcessedBlock {
            height: wire_height,
            txs,
        })
    }
}

/// Classifies every output of one transaction into a pre-sized slot array,
/// one [`TxResult`] per output index. Returns `Some` only when at least one
/// output decoded as an OP_RETURN message.
fn classify_tx(tx: &Transaction, network: Network) -> Option<ProcessedTx> {
    let mut results = vec![TxResult::default(); tx.output.len()];
    let mut has_message = false;

    for (i, txout) in tx.output.iter().enumerate() {
        let script = txout.script_pubkey.as_bytes();
        if let Some(address) = resolve_address(script, network) {
            results[i].result = Some(tx_result::Result::Transfer(ValueTransfer {
                address,
                amount: txout.value.to_sat(),
            }));
        } else if let Some(payload) = decode_op_return(script) {
            results[i].result = Some(tx_result::Result::Msg(OpReturnMsg {
                text: String::from_utf8_lossy(payload).into_owned(),
            }));
            has_message = true;
        }
        // neither: the slot stays unset
    }

    has_message.then(|| ProcessedTx {
        txid: tx.compute_txid().to_string(),
        results,
    })
}
