//! Constructs unsigned OP_RETURN transactions from wallet UTXOs.
//!
//! The inverse direction of the watcher: given a destination, an amount and
//! a message, pick spendable inputs greedily, and assemble a raw transaction
//! whose outputs are, in order, the value transfer, the change back to the
//! first input's script, and the OP_RETURN output. Signing and broadcast are
//! the node wallet's job.

use bitcoin::{Amount, ScriptBuf, Transaction};
use btcwatch_rpc::traits::Wallet;

pub mod build;
pub mod constants;
pub mod errors;
pub mod select;

pub use build::create_unsigned_tx;
pub use constants::{MAX_PAYLOAD_BYTES, STATIC_FEE};
pub use errors::TxBuildError;
pub use select::{select_inputs, InputSelection};

/// Selects inputs covering `amount` plus the static fee and builds the
/// unsigned three-output transaction.
///
/// The message length is checked before anything touches the network.
pub async fn build_op_return_tx<W: Wallet>(
    wallet: &W,
    dest_script: ScriptBuf,
    amount: Amount,
    message: &[u8],
) -> Result<Transaction, TxBuildError> {
    if message.len() > MAX_PAYLOAD_BYTES {
        return Err(TxBuildError::OversizedMessage(message.len()));
    }

    let selection = select_inputs(wallet, amount + STATIC_FEE).await?;
    let change = change_amount(selection.total(), amount, STATIC_FEE)?;
    create_unsigned_tx(&selection, dest_script, amount, change, message)
}

/// What is left for the sender after the transfer and the fee. Selection
/// already guarantees coverage, but a negative change must never reach
/// transaction construction, so this is checked rather than assumed.
pub fn change_amount(
    total: Amount,
    amount: Amount,
    fee: Amount,
) -> Result<Amount, TxBuildError> {
    total
        .checked_sub(amount)
        .and_then(|rest| rest.checked_sub(fee))
        .ok_or(TxBuildError::NegativeChange)
}
