//! Async JSON-RPC client for a `bitcoind` instance, plus the trait seams
//! ([`traits::Reader`], [`traits::Wallet`], [`traits::Signer`],
//! [`traits::Broadcaster`]) the rest of the system consumes so that tests can
//! substitute the node.

pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::BitcoinClient;
pub use error::{ClientError, ClientResult};
