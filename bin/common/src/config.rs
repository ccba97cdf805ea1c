use std::io;
use std::path::PathBuf;

use structopt::StructOpt;

/// Configuration for common systems
#[derive(StructOpt, Debug)]
#[structopt(rename_all = "kebab-case")]
pub struct Config {
    /// Sets the log level for the logger
    /// The levels correspond to the following:
    ///
    ///   0 - Warn
    ///   1 - Info
    ///   2 - Debug
    ///   3 - Trace
    #[structopt(long, default_value = "1")]
    pub log_level: u8,

    /// Sets the data directory to be used
    /// If unset, the default data directory is used
    #[structopt(long)]
    pub data_directory: Option<PathBuf>
}

impl Config {
    /// Gets the data directory in use, creating it if needed
    pub fn data_dir(&self) -> io::Result<PathBuf> {
        match &self.data_directory {
            Some(custom_data_directory) => {
                common::ensure_dir_exists(custom_data_directory)?;
                Ok(custom_data_directory.to_path_buf())
            },
            None => common::get_default_data_dir()
        }
    }

    /// Gets the log filter matching `log_level`
    ///
    /// Anything above 3 is treated as 3
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace
        }
    }
}
