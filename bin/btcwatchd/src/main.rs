//! Watches the chain tip: each `POST /block` notification from bitcoind
//! triggers a scan of the latest block, and the resulting batch goes out on
//! the ZMQ PUB socket.

use std::{sync::Arc, time::Instant};

use axum::{extract::State, http::StatusCode, routing::post, Router};
use btcwatch_rpc::{traits::Reader, BitcoinClient};
use btcwatch_scanner::{BlockProcessor, BlockPublisher};
use tokio::net::TcpListener;
use tracing::*;

use crate::{args::Args, config::Config};

mod args;
mod config;

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    if let Err(e) = main_inner(args) {
        eprintln!("FATAL ERROR: {e}");
        return Err(e);
    }

    Ok(())
}

fn main_inner(args: Args) -> anyhow::Result<()> {
    init_logging();

    let config = Config::load(&args.config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("btcwatch-rt")
        .build()?;

    runtime.block_on(run(config))
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let filt = tracing_subscriber::EnvFilter::from_default_env();
    let stdout_sub = tracing_subscriber::fmt::layer().compact().with_filter(filt);
    tracing_subscriber::registry().with(stdout_sub).init();
}

#[derive(Clone)]
struct AppState {
    client: Arc<BitcoinClient>,
    processor: Arc<BlockProcessor<BitcoinClient>>,
    publisher: BlockPublisher,
}

async fn run(config: Config) -> anyhow::Result<()> {
    let client = Arc::new(BitcoinClient::new(
        config.rpc_url(),
        config.rpc_user.clone(),
        config.rpc_password.clone(),
    )?);

    let publisher = BlockPublisher::bind(&config.zmq_listen).await?;
    info!(endpoint = %config.zmq_listen, "publishing batches");

    let processor = Arc::new(BlockProcessor::new(client.clone(), config.network));

    let state = AppState {
        client,
        processor,
        publisher,
    };

    let app = Router::new()
        .route("/block", post(block_notify))
        .with_state(state);

    let listener = TcpListener::bind(&config.http_listen).await?;
    info!(listen = %config.http_listen, network = %config.network, "awaiting block notifications");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Scans the current chain tip and publishes the batch. The notification
/// body is ignored; the height is always re-read from the node so that a
/// late or duplicated notification still scans a real block.
async fn block_notify(State(state): State<AppState>) -> (StatusCode, &'static str) {
    let started = Instant::now();

    let height = match state.client.get_block_count().await {
        Ok(height) => height,
        Err(err) => {
            error!(%err, "getblockcount failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "bitcoind rpc failed\n");
        }
    };

    let batch = match state.processor.process_block(height).await {
        Ok(batch) => batch,
        Err(err) => {
            error!(%err, height, "block scan failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "bitcoind rpc failed\n");
        }
    };

    info!(
        height,
        txs = batch.txs.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "block processed"
    );
    state.publisher.publish(&batch);

    (StatusCode::OK, "ok\n")
}
