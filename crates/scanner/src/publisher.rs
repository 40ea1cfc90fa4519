//! Single-writer ZMQ publisher for processed blocks.

use prost::Message;
use tokio::sync::mpsc;
use tracing::*;
use zeromq::{PubSocket, Socket, SocketSend, ZmqMessage};

use crate::message::ProcessedBlock;

/// Batches waiting for the socket writer. The queue only fills if the socket
/// task has stalled; overflow drops the batch (at-most-once per block).
const PUBLISH_QUEUE_DEPTH: usize = 64;

/// Publishes serialized [`ProcessedBlock`]s on a PUB socket.
///
/// The socket handle is owned by one dedicated task and fed through a
/// channel, so concurrent publishers never touch the socket itself. Clones
/// share the same socket task.
#[derive(Clone)]
pub struct BlockPublisher {
    queue: mpsc::Sender<Vec<u8>>,
}

impl BlockPublisher {
    /// Binds the PUB socket on `endpoint` and spawns its writer task.
    pub async fn bind(endpoint: &str) -> Result<Self, zeromq::ZmqError> {
        let mut socket = PubSocket::new();
        socket.bind(endpoint).await?;
        info!(%endpoint, "zmq publisher bound");

        let (queue, mut pending) = mpsc::channel::<Vec<u8>>(PUBLISH_QUEUE_DEPTH);
        tokio::spawn(async move {
            while let Some(buf) = pending.recv().await {
                if let Err(err) = socket.send(ZmqMessage::from(buf)).await {
                    // No re-queue: delivery is at-most-once per block.
                    error!(%err, "failed to publish block batch");
                }
            }
        });

        Ok(Self { queue })
    }

    /// Serializes and hands off a batch. Never blocks the processor: if the
    /// writer cannot keep up the batch is dropped with a warning.
    pub fn publish(&self, block: &ProcessedBlock) {
        let buf = block.encode_to_vec();
        match self.queue.try_send(buf) {
            Ok(()) => debug!(
                height = block.height,
                txs = block.txs.len(),
                "queued block batch"
            ),
            Err(err) => warn!(%err, height = block.height, "dropping block batch"),
        }
    }
}
