//! Wire schema of the published batches.
//!
//! Hand-written protobuf messages; the field numbers are the compatibility
//! contract with existing subscribers and must never change. An unrecognized
//! output occupies its slot as a [`TxResult`] with the oneof unset, so the
//! per-output ordering within a transaction is observable on the wire.

/// One block's worth of classified transactions, the unit of publication.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProcessedBlock {
    #[prost(int32, tag = "1")]
    pub height: i32,
    #[prost(message, repeated, tag = "2")]
    pub txs: ::prost::alloc::vec::Vec<ProcessedTx>,
}

/// A transaction that carried at least one OP_RETURN message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProcessedTx {
    #[prost(string, tag = "1")]
    pub txid: ::prost::alloc::string::String,
    /// One entry per output, in output-index order.
    #[prost(message, repeated, tag = "2")]
    pub results: ::prost::alloc::vec::Vec<TxResult>,
}

/// Classification of a single output.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxResult {
    #[prost(oneof = "tx_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<tx_result::Result>,
}

pub mod tx_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Transfer(super::ValueTransfer),
        #[prost(message, tag = "2")]
        Msg(super::OpReturnMsg),
    }
}

/// A spend to a recognizable address.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValueTransfer {
    #[prost(string, tag = "1")]
    pub address: ::prost::alloc::string::String,
    /// Satoshis.
    #[prost(uint64, tag = "2")]
    pub amount: u64,
}

/// A decoded OP_RETURN payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OpReturnMsg {
    #[prost(string, tag = "1")]
    pub text: ::prost::alloc::string::String,
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;

    #[test]
    fn round_trips_through_protobuf() {
        let block = ProcessedBlock {
            height: 424242,
            txs: vec![ProcessedTx {
                txid: "deadbeef".to_string(),
                results: vec![
                    TxResult {
                        result: Some(tx_result::Result::Transfer(ValueTransfer {
                            address: "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa".to_string(),
                            amount: 50_000,
                        })),
                    },
                    // unrecognized output keeps its slot
                    TxResult::default(),
                    TxResult {
                        result: Some(tx_result::Result::Msg(OpReturnMsg {
                            text: "hello".to_string(),
                        })),
                    },
                ],
            }],
        };

        let buf = block.encode_to_vec();
        let decoded = ProcessedBlock::decode(buf.as_slice()).unwrap();
        assert_eq!(decoded, block);
        assert_eq!(decoded.txs[0].results.len(), 3);
        assert!(decoded.txs[0].results[1].result.is_none());
    }

    #[test]
    fn empty_block_still_encodes_height() {
        let block = ProcessedBlock {
            height: 7,
            txs: vec![],
        };
        let decoded = ProcessedBlock::decode(block.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.height, 7);
        assert!(decoded.txs.is_empty());
    }
}
