//! Errors during selection and construction of OP_RETURN transactions.

use bitcoin::Amount;
use btcwatch_codec::EncodeError;
use btcwatch_rpc::ClientError;
use thiserror::Error;

use crate::constants::MAX_PAYLOAD_BYTES;

/// Error during building of an OP_RETURN transaction.
#[derive(Debug, Error)]
pub enum TxBuildError {
    /// The wallet's spendable outputs do not cover the target.
    #[error("not enough funds: have {have}, need {need}")]
    InsufficientFunds { have: Amount, need: Amount },

    /// The message exceeds the sender's payload cap.
    #[error("message of {0} bytes exceeds the {MAX_PAYLOAD_BYTES}-byte limit")]
    OversizedMessage(usize),

    /// Selected inputs do not cover amount plus fee.
    #[error("selected inputs do not cover amount plus fee")]
    NegativeChange,

    /// Nothing was selected, so there is no script to send change to.
    #[error("input selection is empty")]
    EmptySelection,

    /// An unspent entry from the wallet has a field we cannot parse.
    #[error("malformed unspent output: {0}")]
    BadUnspent(String),

    /// OP_RETURN framing failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The wallet RPC call failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}
