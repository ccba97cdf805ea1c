use std::path::{Path, PathBuf};

use structopt::StructOpt;

use common::NetworkType;

use crate::dns::{StaticTxtRecords, TxtRecordPin};
use crate::file::JSON_HASH_FILE_NAME;

/// Checkpoint loading configuration
#[derive(StructOpt, Debug)]
#[structopt(rename_all = "kebab-case")]
pub struct Config {
    /// Network to load checkpoints for (main, test, stage, fake)
    #[structopt(long, default_value = "main")]
    pub network: NetworkType,

    /// Path to a JSON checkpoints file
    /// If unset, checkpoints.json in the data directory is used
    #[structopt(long)]
    pub checkpoints_file: Option<PathBuf>,

    /// Also load checkpoints published in DNS TXT records
    #[structopt(long)]
    pub enable_dns_checkpoints: bool,

    /// Pins a checkpoint TXT answer as <domain>=<height>:<hash>, used in place of resolving
    /// <domain>. May be given more than once
    #[structopt(long = "dns-checkpoint-record", raw(number_of_values = "1"))]
    pub dns_checkpoint_records: Vec<TxtRecordPin>,
}

impl Config {
    /// Gets the checkpoints file to load, falling back to one in `data_dir`
    pub fn checkpoints_file_path(&self, data_dir: &Path) -> PathBuf {
        match &self.checkpoints_file {
            Some(path) => path.clone(),
            None => data_dir.join(JSON_HASH_FILE_NAME),
        }
    }

    /// Gets the TXT answers pinned on the command line
    pub fn dns_source(&self) -> StaticTxtRecords {
        StaticTxtRecords::from(self.dns_checkpoint_records.as_slice())
    }
}
