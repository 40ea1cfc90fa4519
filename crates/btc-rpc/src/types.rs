//! Typed subsets of the `bitcoind` RPC responses this system reads.

use serde::Deserialize;

/// One entry of a `listunspent` response.
///
/// `txid` and `scriptPubKey` stay hex strings here; the transaction builder
/// parses them when it actually spends the output.
#[derive(Clone, Debug, Deserialize)]
pub struct Unspent {
    pub txid: String,
    pub vout: u32,
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    /// Whole BTC, as bitcoind reports wallet amounts.
    pub amount: f64,
    pub spendable: bool,
}

/// Result of `signrawtransactionwithwallet`.
#[derive(Clone, Debug, Deserialize)]
pub struct SignRawTransactionResult {
    /// Hex of the (possibly partially) signed transaction.
    pub hex: String,
    /// Whether the wallet produced all required signatures.
    pub complete: bool,
}
