//! Output-script pattern recognition and base58check address derivation.
//!
//! Only the three legacy single-key patterns are recognized; everything else
//! (multisig, segwit, OP_RETURN, nonstandard) resolves to `None` and is left
//! for the OP_RETURN decoder or the unrecognized bucket. Address resolution
//! and message decoding are therefore mutually exclusive on any script.

use bitcoin::Network;

use crate::hash::{hash160, sha256d};

const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

fn pubkey_hash_version(network: Network) -> u8 {
    match network {
        Network::Bitcoin => 0x00,
        _ => 0x6f,
    }
}

fn script_hash_version(network: Network) -> u8 {
    match network {
        Network::Bitcoin => 0x05,
        _ => 0xc4,
    }
}

/// Maps an output script to a human-readable address string.
///
/// Recognizes pay-to-pubkey-hash, pay-to-script-hash and pay-to-pubkey;
/// returns `None` for any other script.
pub fn resolve_address(script: &[u8], network: Network) -> Option<String> {
    if let Some(hash) = match_p2pkh(script) {
        return Some(base58check(pubkey_hash_version(network), hash));
    }
    if let Some(hash) = match_p2sh(script) {
        return Some(base58check(script_hash_version(network), hash));
    }
    if let Some(pubkey) = match_p2pk(script) {
        return Some(base58check(pubkey_hash_version(network), &hash160(pubkey)));
    }
    None
}

/// `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`
fn match_p2pkh(script: &[u8]) -> Option<&[u8; 20]> {
    if script.len() == 25
        && script[0] == 0x76
        && script[1] == 0xa9
        && script[2] == 0x14
        && script[23] == 0x88
        && script[24] == 0xac
    {
        return script[3..23].try_into().ok();
    }
    None
}

/// `OP_HASH160 <20 bytes> OP_EQUAL`
fn match_p2sh(script: &[u8]) -> Option<&[u8; 20]> {
    if script.len() == 23 && script[0] == 0xa9 && script[1] == 0x14 && script[22] == 0x87 {
        return script[2..22].try_into().ok();
    }
    None
}

/// `<33 or 65 byte pubkey push> OP_CHECKSIG`
fn match_p2pk(script: &[u8]) -> Option<&[u8]> {
    match script.len() {
        35 if script[0] == 0x21 && script[34] == 0xac => Some(&script[1..34]),
        67 if script[0] == 0x41 && script[66] == 0xac => Some(&script[1..66]),
        _ => None,
    }
}

/// version byte + hash + first four bytes of `sha256d` over both.
fn base58check(version: u8, hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(25);
    payload.push(version);
    payload.extend_from_slice(hash);
    let checksum = sha256d(&payload);
    payload.extend_from_slice(&checksum[..4]);
    base58_encode(&payload)
}

fn base58_encode(data: &[u8]) -> String {
    // Each leading zero byte maps to a leading '1' in the output.
    let zeros = data.iter().take_while(|&&b| b == 0).count();

    // Base conversion, digits accumulated little-endian.
    let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 138 / 100 + 1);
    for &byte in data {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat('1').take(zeros));
    for &digit in digits.iter().rev() {
        out.push(BASE58_ALPHABET[digit as usize] as char);
    }
    out
}
