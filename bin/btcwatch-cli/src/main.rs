//! Builds an OP_RETURN transaction against the node wallet. Dry run by
//! default; `--real` signs through the wallet and broadcasts after an
//! interactive confirmation.

use std::{
    io::{self, Write as _},
    str::FromStr,
};

use anyhow::{bail, Context};
use bitcoin::{
    consensus::encode::{deserialize_hex, serialize_hex},
    Address, Amount, Network, Transaction,
};
use btcwatch_rpc::{
    traits::{Broadcaster, Signer},
    BitcoinClient,
};
use btcwatch_tx_builder::build_op_return_tx;
use tracing::*;

use crate::{
    args::{Args, Subcommand},
    config::Config,
};

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
    let network = if args.testnet {
        Network::Testnet
    } else {
        Network::Bitcoin
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("btcwatch-rt")
        .build()?;

    match args.subc {
        Subcommand::Send(send) => runtime.block_on(run_send(config, network, send, args.real)),
    }
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let filt = tracing_subscriber::EnvFilter::from_default_env();
    let stdout_sub = tracing_subscriber::fmt::layer().compact().with_filter(filt);
    tracing_subscriber::registry().with(stdout_sub).init();
}

async fn run_send(
    config: Config,
    network: Network,
    send: args::SubcSend,
    real: bool,
) -> anyhow::Result<()> {
    // Everything user-supplied is checked before the first RPC call.
    let address = Address::from_str(&send.address)
        .context("can't decode address")?
        .require_network(network)
        .context("address is for the wrong network")?;
    let amount = Amount::from_btc(send.amount).context("bad amount")?;
    let message = send.message.as_bytes();

    let client = BitcoinClient::new(
        config.rpc_url(),
        config.rpc_user.clone(),
        config.rpc_password.clone(),
    )?;

    info!("finding available inputs");
    let tx = build_op_return_tx(&client, address.script_pubkey(), amount, message).await?;
    info!(raw = %serialize_hex(&tx), "created tx");

    if !real {
        info!("dry run, pass --real to sign and broadcast");
        return Ok(());
    }

    let signed = client.sign_raw_transaction_with_wallet(&tx).await?;
    if !signed.complete {
        bail!("wallet could not fully sign the transaction");
    }
    let signed_tx: Transaction =
        deserialize_hex(&signed.hex).context("wallet returned a malformed transaction")?;
    info!(raw = %signed.hex, "signed tx");
    info!("decoded tx:\n{}", describe_tx(&signed_tx));

    if !ask_for_confirmation("Are you going to send the tx?") {
        info!("aborted");
        return Ok(());
    }

    let txid = client.send_raw_transaction(&signed_tx).await?;
    info!(%txid, "tx sent");
    Ok(())
}

/// Human-readable rendering of the signed transaction, shown before the
/// confirmation prompt.
fn describe_tx(tx: &Transaction) -> String {
    use std::fmt::Write as _;

    let mut out = format!("txid: {}\n", tx.compute_txid());
    for (i, txin) in tx.input.iter().enumerate() {
        let _ = writeln!(out, "  in  {i}: {}", txin.previous_output);
    }
    for (i, txout) in tx.output.iter().enumerate() {
        let _ = writeln!(out, "  out {i}: {} {}", txout.value, txout.script_pubkey);
    }
    out
}

/// Prompts until the answer is a recognizable yes or no.
fn ask_for_confirmation(msg: &str) -> bool {
    loop {
        print!("{msg} Type yes or no:[Y/N] ");
        let _ = io::stdout().flush();

        let mut response = String::new();
        if io::stdin().read_line(&mut response).is_err() {
            return false;
        }
        match response.trim() {
            "y" | "Y" | "yes" | "Yes" | "YES" => return true,
            "n" | "N" | "no" | "No" | "NO" => return false,
            _ => println!("Please type yes or no and then press enter:"),
        }
    }
}
