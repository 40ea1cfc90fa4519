//! Error types for the RPC client.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Result type returned by the [`BitcoinClient`](crate::BitcoinClient).
pub type ClientResult<T> = Result<T, ClientError>;

/// The error type for RPC calls against `bitcoind`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Missing username or password for the RPC server.
    #[error("missing username or password")]
    MissingUserPassword,

    /// RPC server returned an error object.
    #[error("rpc server returned error '{1}' (code {0})")]
    Server(i32, String),

    /// Error parsing the RPC response.
    #[error("error parsing rpc response: {0}")]
    Parse(String),

    /// Could not serialize an RPC parameter.
    #[error("could not create rpc param: {0}")]
    Param(String),

    /// Could not reach the server.
    #[error("could not connect: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("timeout")]
    Timeout,

    /// Server answered with a failure status code.
    #[error("failure status: {0}")]
    Status(String),

    /// Anything the other variants do not cover.
    #[error("{0}")]
    Other(String),
}

impl From<SerdeJsonError> for ClientError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Parse(value.to_string())
    }
}

/// Error object in a `bitcoind` RPC response.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitcoinRpcError {
    pub code: i32,
    pub message: String,
}

impl fmt::Display for BitcoinRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rpc error {}: {}", self.code, self.message)
    }
}

impl From<BitcoinRpcError> for ClientError {
    fn from(value: BitcoinRpcError) -> Self {
        Self::Server(value.code, value.message)
    }
}
