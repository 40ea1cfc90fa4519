use std::path::PathBuf;

use argh::FromArgs;

#[derive(Debug, Clone, FromArgs)]
#[argh(description = "Block watcher daemon")]
pub struct Args {
    #[argh(
        option,
        short = 'c',
        default = "PathBuf::from(\"conf.json\")",
        description = "path to configuration"
    )]
    pub config: PathBuf,
}
