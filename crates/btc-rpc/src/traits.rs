//! Seams between the core pipeline and the full node.

use async_trait::async_trait;
use bitcoin::{Block, BlockHash, Transaction, Txid};

use crate::{
    error::ClientResult,
    types::{SignRawTransactionResult, Unspent},
};

/// Chain lookups the block processor depends on.
#[async_trait]
pub trait Reader: Sync + Send + 'static {
    /// Corresponds to `getblockcount`.
    async fn get_block_count(&self) -> ClientResult<u64>;

    /// Corresponds to `getblockhash`.
    async fn get_block_hash(&self, height: u64) -> ClientResult<BlockHash>;

    /// Fetches a full block by hash.
    async fn get_block(&self, hash: &BlockHash) -> ClientResult<Block>;

    /// Fetches the block at the given height.
    async fn get_block_at(&self, height: u64) -> ClientResult<Block>;
}

/// Wallet lookups the transaction builder depends on.
#[async_trait]
pub trait Wallet: Sync + Send + 'static {
    /// Corresponds to `listunspent`.
    async fn list_unspent(&self) -> ClientResult<Vec<Unspent>>;
}

/// Signing delegated to the node wallet.
#[async_trait]
pub trait Signer: Sync + Send + 'static {
    /// Corresponds to `signrawtransactionwithwallet`.
    async fn sign_raw_transaction_with_wallet(
        &self,
        tx: &Transaction,
    ) -> ClientResult<SignRawTransactionResult>;
}

/// Transaction submission.
#[async_trait]
pub trait Broadcaster: Sync + Send + 'static {
    /// Corresponds to `sendrawtransaction`.
    async fn send_raw_transaction(&self, tx: &Transaction) -> ClientResult<Txid>;
}
