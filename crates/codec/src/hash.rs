//! Digest conventions consumed by address derivation.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256 applied twice, as used for txids and address checksums.
pub fn sha256d(buf: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(buf);
    Sha256::digest(first).into()
}

/// RIPEMD-160 of SHA-256, the short hash embedded in addresses.
pub fn hash160(buf: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(buf);
    Ripemd160::digest(sha).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256d_known_vector() {
        let got = sha256d(b"hello");
        let expected =
            hex::decode("9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50")
                .unwrap();
        assert_eq!(got.as_slice(), expected.as_slice());
    }

    #[test]
    fn hash160_of_genesis_pubkey() {
        // The uncompressed pubkey from the genesis coinbase output.
        let pubkey = hex::decode(
            "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb6\
             49f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f",
        )
        .unwrap();
        let got = hash160(&pubkey);
        let expected = hex::decode("62e907b15cbf27d5425399ebf6f0fb50ebb88f18").unwrap();
        assert_eq!(got.as_slice(), expected.as_slice());
    }
}
