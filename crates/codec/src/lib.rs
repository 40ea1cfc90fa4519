//! Script-level codecs shared by the watcher and the sender.
//!
//! Three concerns live here: the digest conventions bitcoin addresses are
//! built from, the OP_RETURN payload framing (both directions), and the
//! script-pattern recognition that turns an output script into a
//! base58check address string.

pub mod address;
pub mod hash;
pub mod opreturn;

pub use address::resolve_address;
pub use opreturn::{decode_op_return, encode_op_return, EncodeError};
