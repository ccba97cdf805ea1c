use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the checkpoints file looked up in the data directory
pub const JSON_HASH_FILE_NAME: &str = "checkpoints.json";

/// A single checkpoint as it appears in a checkpoints file
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HashLine {
    /// Block height
    pub height: u64,
    /// Hex-encoded block ID, decoded only when the line is applied
    pub hash: String,
}

/// Contents of a checkpoints file
///
/// ```json
/// { "hashlines": [ { "height": 1300, "hash": "61c0c8a7..." } ] }
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HashFile {
    /// Checkpoints in file order
    pub hashlines: Vec<HashLine>,
}

/// Reads checkpoint records from a file on disk
pub trait FileRecordSource {
    /// Reads the records stored at `path`, in file order
    ///
    /// # Errors
    /// * `ResourceUnavailable` if there is no file at `path`
    /// * `ResourceCorrupt` if the file can't be parsed
    /// * `Io` if the file exists but can't be read
    fn read_records(&self, path: &Path) -> Result<Vec<HashLine>>;
}

/// Reads checkpoints files in the JSON format described by [`HashFile`]
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFileSource;

impl FileRecordSource for JsonFileSource {
    fn read_records(&self, path: &Path) -> Result<Vec<HashLine>> {
        let contents = match std::fs::read(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::ResourceUnavailable(format!("no checkpoints file at {}", path.display())));
            }
            Err(err) => return Err(err.into()),
        };

        let file: HashFile = serde_json::from_slice(&contents).map_err(|source| Error::ResourceCorrupt {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(file.hashlines)
    }
}
