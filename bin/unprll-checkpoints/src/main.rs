use log::{error, info};
use structopt::StructOpt;

use checkpoints::{BlockVerdict, CheckpointLoader, Checkpoints, JsonFileSource};

mod config;
use config::{Command, Config};

fn main() {
    // Command Line Arguments
    let config = Config::from_args();

    // Logging
    let data_dir = config.bin_common_config.data_dir().expect("Failed to create data directory");
    bin_common::logger::init(&config.bin_common_config, &data_dir, "unprll-checkpoints").expect("Failed to initialise logger");

    // Main
    if let Err(err) = run(config, &data_dir) {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run(config: Config, data_dir: &std::path::Path) -> anyhow::Result<()> {
    let checkpoints_config = &config.checkpoints_config;
    let path = checkpoints_config.checkpoints_file_path(data_dir);

    // No resolver ships with the node, so DNS checkpoints come from answers pinned on the command line
    let loader = CheckpointLoader::new(JsonFileSource, checkpoints_config.dns_source());
    let mut checkpoints = Checkpoints::new();
    loader.load(&mut checkpoints, &path, checkpoints_config.network, checkpoints_config.enable_dns_checkpoints)?;

    match config.command {
        Command::Show => {
            for checkpoint in checkpoints.iter() {
                println!("{}\t{}", checkpoint.height, checkpoint.hash);
            }
        },
        Command::Verify { height, hash } => match checkpoints.check_block(height, &hash) {
            BlockVerdict::Accept => println!("Block {} at height {} matches its checkpoint", hash, height),
            BlockVerdict::NotCheckpointed => println!("No checkpoint at height {}", height),
            BlockVerdict::Reject { expected, observed } => {
                anyhow::bail!("Block {} at height {} conflicts with checkpoint {}", observed, height, expected)
            },
        },
        Command::AltChain { current_height, fork_height } => {
            checkpoints.check_alternative_chain(current_height, fork_height)?;
            println!("Alternative chain forking at {} is allowed at height {}", fork_height, current_height);
        },
        Command::Export => {
            println!("{}", serde_json::to_string_pretty(&checkpoints.to_hash_file())?);
        },
    }

    info!("Exiting");
    Ok(())
}
