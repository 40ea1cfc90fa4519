//! Turns mined blocks into per-block batches of classified outputs and
//! publishes them on a ZMQ PUB socket.
//!
//! The processor fans out one task per transaction, classifies every output
//! as a value transfer, an OP_RETURN message, or unrecognized, and keeps a
//! transaction in the batch only when it carried a message. The publisher
//! owns the socket from a dedicated task so that sends are serialized.

pub mod message;
pub mod processor;
pub mod publisher;

pub use processor::{BlockProcessor, ScanError};
pub use publisher::BlockPublisher;
