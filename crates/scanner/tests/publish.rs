//! End-to-end publish path over a real PUB/SUB socket pair.

use std::time::Duration;

use btcwatch_scanner::{
    message::{ProcessedBlock, ProcessedTx, TxResult},
    BlockPublisher,
};
use prost::Message;
use tokio::time::{sleep, timeout};
use zeromq::{Socket, SocketRecv, SubSocket};

const ENDPOINT: &str = "tcp://127.0.0.1:29551";

#[tokio::test]
async fn subscriber_receives_published_batch() {
    let publisher = BlockPublisher::bind(ENDPOINT).await.unwrap();

    let mut subscriber = SubSocket::new();
    subscriber.connect(ENDPOINT).await.unwrap();
    // Empty prefix: receive everything.
    subscriber.subscribe("").await.unwrap();

    // Give the slow joiner a moment before publishing.
    sleep(Duration::from_millis(300)).await;

    let block = ProcessedBlock {
        height: 123,
        txs: vec![ProcessedTx {
            txid: "cafe".to_string(),
            results: vec![TxResult::default()],
        }],
    };
    publisher.publish(&block);

    let received = timeout(Duration::from_secs(5), subscriber.recv())
        .await
        .expect("timed out waiting for batch")
        .unwrap();
    let mut payload = Vec::new();
    for frame in received.into_vec() {
        payload.extend_from_slice(&frame);
    }
    let decoded = ProcessedBlock::decode(payload.as_slice()).unwrap();
    assert_eq!(decoded, block);
}
