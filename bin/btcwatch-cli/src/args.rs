use std::path::PathBuf;

use argh::FromArgs;

#[derive(Debug, FromArgs)]
#[argh(description = "OP_RETURN transaction tool")]
pub struct Args {
    #[argh(
        option,
        short = 'c',
        default = "PathBuf::from(\"conf.json\")",
        description = "path to configuration"
    )]
    pub config: PathBuf,

    #[argh(switch, description = "use the testnet address format")]
    pub testnet: bool,

    #[argh(switch, description = "sign and broadcast instead of a dry run")]
    pub real: bool,

    #[argh(subcommand)]
    pub subc: Subcommand,
}

#[derive(Debug, FromArgs, PartialEq)]
#[argh(subcommand)]
pub enum Subcommand {
    Send(SubcSend),
}

#[derive(Debug, FromArgs, PartialEq)]
#[argh(
    subcommand,
    name = "send",
    description = "send an OP_RETURN transaction to an address"
)]
pub struct SubcSend {
    #[argh(positional, description = "destination address")]
    pub address: String,

    #[argh(positional, description = "amount in BTC")]
    pub amount: f64,

    #[argh(positional, description = "message to embed, at most 80 bytes")]
    pub message: String,
}
