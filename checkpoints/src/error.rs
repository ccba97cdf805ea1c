use std::path::PathBuf;

use crypto::Hash256;

/// Type alias for the Result returned from functions in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for checkpoint operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a checkpoint hash isn't exactly 64 hex characters
    #[error("Malformed checkpoint hash \"{hash}\": {source}")]
    MalformedHash {
        /// The offending input
        hash: String,
        /// Why decoding failed
        source: hex::FromHexError,
    },

    /// Returned when a checkpoint already exists at a height with a different hash
    #[error("Checkpoint at height {height} already exists with hash {existing}, refusing {new}")]
    ConflictingCheckpoint {
        /// Height of the conflicting checkpoint
        height: u64,
        /// Hash that is already pinned
        existing: Hash256,
        /// Hash that was refused
        new: Hash256,
    },

    /// Returned when a checkpoint source has nothing to offer (missing file, no DNS answer)
    #[error("Checkpoint source unavailable: {0}")]
    ResourceUnavailable(String),

    /// Returned when a checkpoints file exists but can't be parsed
    #[error("Checkpoints file {} is corrupt: {source}", .path.display())]
    ResourceCorrupt {
        /// Path of the file
        path: PathBuf,
        /// Parser error
        source: serde_json::Error,
    },

    /// Returned for a fork at height 0, which would replace the genesis block
    #[error("Alternative chain cannot fork at height 0")]
    InvalidForkHeight,

    /// Returned when an alternative chain would rewrite a checkpointed block
    #[error("Alternative chain forking at height {fork_height} would rewrite the checkpoint at height {checkpoint_height}")]
    ForkBeforeCheckpoint {
        /// Height the alternative chain branches from
        fork_height: u64,
        /// Highest checkpoint at or below the current chain height
        checkpoint_height: u64,
    },

    /// Returned when querying the highest checkpoint of an empty set
    #[error("No checkpoints loaded")]
    EmptyStore,

    /// Returned when reading a checkpoint source fails for any other reason
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error only means "nothing to load" rather than bad data
    pub fn is_unavailable(&self) -> bool {
        match self {
            Error::ResourceUnavailable(_) => true,
            _ => false,
        }
    }
}
