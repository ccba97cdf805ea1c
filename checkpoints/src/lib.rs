#![deny(missing_docs)]

//! # Blockchain checkpoints
//!
//! Pins (height, block ID) pairs known to be part of the canonical chain, and uses them to
//! refuse blocks and reorganizations that would rewrite pinned history.
//!
//! Checkpoints come from three sources, loaded in order by [`CheckpointLoader`]: the ones
//! compiled into the node, an optional JSON file, and optionally DNS TXT records. Once
//! loaded, the set is handed to the validation threads as a [`SharedCheckpoints`].

mod config;
pub mod defaults;
mod dns;
mod error;
mod file;
mod loader;
mod shared;
mod store;

pub use config::Config;
pub use dns::{DnsRecordSource, NoDnsRecords, StaticTxtRecords, TxtRecordPin};
pub use error::{Error, Result};
pub use file::{FileRecordSource, HashFile, HashLine, JsonFileSource, JSON_HASH_FILE_NAME};
pub use loader::{parse_dns_record, CheckpointLoader};
pub use shared::SharedCheckpoints;
pub use store::{BlockVerdict, Checkpoint, Checkpoints};
