//! Raw transaction assembly.

use bitcoin::{
    absolute::LockTime, transaction::Version, Amount, OutPoint, ScriptBuf, Sequence, Transaction,
    TxIn, Txid, TxOut, Witness,
};
use btcwatch_codec::encode_op_return;

use crate::{constants::MAX_PAYLOAD_BYTES, errors::TxBuildError, select::InputSelection};

/// Builds the unsigned transaction: one input per selected UTXO with an
/// empty signature script (the wallet fills those at signing time), and
/// exactly three outputs in fixed order — the transfer to `dest_script`,
/// the change back to the first selected input's script, and the OP_RETURN
/// output carrying `message` at value zero.
pub fn create_unsigned_tx(
    selection: &InputSelection,
    dest_script: ScriptBuf,
    amount: Amount,
    change: Amount,
    message: &[u8],
) -> Result<Transaction, TxBuildError> {
    if message.len() > MAX_PAYLOAD_BYTES {
        return Err(TxBuildError::OversizedMessage(message.len()));
    }
    let first = selection
        .inputs()
        .first()
        .ok_or(TxBuildError::EmptySelection)?;

    let mut input = Vec::with_capacity(selection.inputs().len());
    for unspent in selection.inputs() {
        let txid = unspent
            .txid
            .parse::<Txid>()
            .map_err(|e| TxBuildError::BadUnspent(format!("txid: {e}")))?;
        input.push(TxIn {
            previous_output: OutPoint::new(txid, unspent.vout),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        });
    }

    let change_script = hex::decode(&first.script_pub_key)
        .map(ScriptBuf::from_bytes)
        .map_err(|e| TxBuildError::BadUnspent(format!("scriptPubKey: {e}")))?;
    let op_return_script = encode_op_return(message)?;

    let output = vec![
        TxOut {
            value: amount,
            script_pubkey: dest_script,
        },
        TxOut {
            value: change,
            script_pubkey: change_script,
        },
        TxOut {
            value: Amount::ZERO,
            script_pubkey: op_return_script,
        },
    ];

    Ok(Transaction {
        version: Version::ONE,
        lock_time: LockTime::ZERO,
        input,
        output,
    })
}
