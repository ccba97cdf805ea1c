use structopt::StructOpt;

use bin_common::Config as BinCommonConfig;
use checkpoints::Config as CheckpointsConfig;
use crypto::Hash256;

#[derive(StructOpt, Debug)]
#[structopt(rename_all = "kebab-case", name = "unprll-checkpoints")]
pub struct Config {
    #[structopt(flatten)]
    pub bin_common_config: BinCommonConfig,

    #[structopt(flatten)]
    pub checkpoints_config: CheckpointsConfig,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug)]
#[structopt(rename_all = "kebab-case")]
pub enum Command {
    /// Lists every loaded checkpoint
    Show,

    /// Checks a block ID against the checkpoint at its height
    Verify {
        height: u64,
        hash: Hash256,
    },

    /// Checks whether an alternative chain may be considered
    AltChain {
        current_height: u64,
        fork_height: u64,
    },

    /// Prints the loaded checkpoints in the checkpoints file format
    Export,
}
