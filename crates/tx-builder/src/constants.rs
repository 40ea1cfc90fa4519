//! Constants for OP_RETURN transaction construction.

use bitcoin::Amount;

/// Flat fee attached to every transaction; not derived from its size.
pub const STATIC_FEE: Amount = Amount::from_sat(20_000); // 0.0002 BTC

/// Longest OP_RETURN payload the sender will construct.
pub const MAX_PAYLOAD_BYTES: usize = 80;
