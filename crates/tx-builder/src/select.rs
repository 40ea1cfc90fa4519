//! Greedy UTXO selection.

use bitcoin::Amount;
use btcwatch_rpc::{traits::Wallet, types::Unspent};

use crate::errors::TxBuildError;

/// Inputs chosen to cover a target amount, immutable once returned.
#[derive(Debug, Clone)]
pub struct InputSelection {
    total: Amount,
    inputs: Vec<Unspent>,
}

impl InputSelection {
    /// Sum of the selected inputs; at least the requested target.
    pub fn total(&self) -> Amount {
        self.total
    }

    /// The selected outputs, in the wallet's listing order.
    pub fn inputs(&self) -> &[Unspent] {
        &self.inputs
    }
}

/// Accumulates spendable unspent outputs in listing order until the running
/// total covers `target`; fails with [`TxBuildError::InsufficientFunds`] if
/// the list runs out first.
pub async fn select_inputs<W: Wallet>(
    wallet: &W,
    target: Amount,
) -> Result<InputSelection, TxBuildError> {
    let unspents = wallet.list_unspent().await?;

    let mut total = Amount::ZERO;
    let mut inputs = Vec::new();
    for unspent in unspents {
        if !unspent.spendable {
            continue;
        }
        let value = Amount::from_btc(unspent.amount)
            .map_err(|e| TxBuildError::BadUnspent(e.to_string()))?;
        total += value;
        inputs.push(unspent);
        if total >= target {
            return Ok(InputSelection { total, inputs });
        }
    }

    Err(TxBuildError::InsufficientFunds {
        have: total,
        need: target,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use async_trait::async_trait;
    use btcwatch_rpc::error::ClientResult;

    use super::*;

    /// Canned wallet listing a fixed set of unspents.
    pub(crate) struct FixedWallet(pub Vec<Unspent>);

    #[async_trait]
    impl Wallet for FixedWallet {
        async fn list_unspent(&self) -> ClientResult<Vec<Unspent>> {
            Ok(self.0.clone())
        }
    }

    pub(crate) fn unspent(txid_byte: u8, vout: u32, btc: f64, spendable: bool) -> Unspent {
        Unspent {
            txid: hex::encode([txid_byte; 32]),
            vout,
            script_pub_key: "76a91462e907b15cbf27d5425399ebf6f0fb50ebb88f1888ac".to_string(),
            amount: btc,
            spendable,
        }
    }

    #[tokio::test]
    async fn stops_as_soon_as_target_is_covered() {
        let wallet = FixedWallet(vec![
            unspent(1, 0, 0.3, true),
            unspent(2, 1, 0.4, true),
            unspent(3, 0, 5.0, true),
        ]);

        let selection = select_inputs(&wallet, Amount::from_btc(0.6).unwrap())
            .await
            .unwrap();
        assert_eq!(selection.inputs().len(), 2);
        assert_eq!(selection.total(), Amount::from_btc(0.7).unwrap());
    }

    #[tokio::test]
    async fn skips_unspendable_outputs() {
        let wallet = FixedWallet(vec![
            unspent(1, 0, 10.0, false),
            unspent(2, 0, 0.5, true),
        ]);

        let selection = select_inputs(&wallet, Amount::from_btc(0.5).unwrap())
            .await
            .unwrap();
        assert_eq!(selection.inputs().len(), 1);
        assert_eq!(selection.inputs()[0].vout, 0);
        assert_eq!(selection.total(), Amount::from_btc(0.5).unwrap());
    }

    #[tokio::test]
    async fn insufficient_funds_when_list_is_exhausted() {
        let wallet = FixedWallet(vec![unspent(1, 0, 0.1, true)]);

        let err = select_inputs(&wallet, Amount::from_btc(1.0).unwrap())
            .await
            .unwrap_err();
        match err {
            TxBuildError::InsufficientFunds { have, need } => {
                assert_eq!(have, Amount::from_btc(0.1).unwrap());
                assert_eq!(need, Amount::from_btc(1.0).unwrap());
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }
    }
}
