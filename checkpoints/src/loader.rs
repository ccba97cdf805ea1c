use std::convert::TryFrom;
use std::path::Path;

use log::{debug, error, info};

use common::NetworkType;
use crypto::Hash256;

use crate::defaults;
use crate::dns::DnsRecordSource;
use crate::error::Result;
use crate::file::{FileRecordSource, HashLine};
use crate::store::Checkpoints;

/// # Checkpoint Loader
///
/// Populates a [`Checkpoints`] set at startup, in order, from:
///
/// 1. the checkpoints compiled into the node
/// 2. a checkpoints file, if one exists
/// 3. DNS TXT records, if enabled
///
/// A corrupt file or conflicting data anywhere is fatal, since the node must not validate
/// blocks against a poisoned checkpoint set. DNS is best effort: failing to resolve anything
/// only means there are no extra checkpoints.
pub struct CheckpointLoader<F, D>
where
    F: FileRecordSource,
    D: DnsRecordSource,
{
    file_source: F,
    dns_source: D,
}

impl<F, D> CheckpointLoader<F, D>
where
    F: FileRecordSource,
    D: DnsRecordSource,
{
    /// Creates a loader reading from the given sources
    pub fn new(file_source: F, dns_source: D) -> Self {
        CheckpointLoader {
            file_source,
            dns_source,
        }
    }

    /// Loads every source into `checkpoints`
    ///
    /// Stops at the first phase that fails. DNS records are only consulted when `enable_dns`
    /// is set, and only after the embedded and file checkpoints loaded cleanly
    ///
    /// # Errors
    /// * `ResourceCorrupt` or `Io` if the checkpoints file can't be read
    /// * `MalformedHash` if a checkpoints file record can't be decoded
    /// * `ConflictingCheckpoint` if the file or DNS disagree with checkpoints already loaded
    pub fn load(&self, checkpoints: &mut Checkpoints, path: &Path, network: NetworkType, enable_dns: bool) -> Result<()> {
        self.load_defaults(checkpoints, network);
        self.load_from_file(checkpoints, path)?;
        if enable_dns {
            self.load_from_dns(checkpoints, network)?;
        }
        info!("Loaded {} checkpoints for network {}", checkpoints.len(), network);
        Ok(())
    }

    /// Adds the checkpoints compiled in for `network`
    ///
    /// # Panics
    /// If the compiled-in table is invalid or conflicts with `checkpoints`. The table is
    /// static data, so this can only be a build error
    pub fn load_defaults(&self, checkpoints: &mut Checkpoints, network: NetworkType) {
        for (height, hash) in defaults::embedded_checkpoints(network) {
            checkpoints
                .add_checkpoint_hex(*height, hash)
                .unwrap_or_else(|err| panic!("Hard-coded checkpoint at height {} is invalid: {}", height, err));
        }
    }

    /// Reads the checkpoints file at `path`
    ///
    /// # Returns
    /// `None` if there is no file, otherwise the records in file order
    ///
    /// # Errors
    /// `ResourceCorrupt` or `Io` if the file exists but can't be read
    pub fn read_file(&self, path: &Path) -> Result<Option<Vec<HashLine>>> {
        match self.file_source.read_records(path) {
            Ok(records) => Ok(Some(records)),
            Err(err) if err.is_unavailable() => {
                debug!("Blockchain checkpoints file not found at {}", path.display());
                Ok(None)
            }
            Err(err) => {
                error!("Error loading checkpoints from {}: {}", path.display(), err);
                Err(err)
            }
        }
    }

    /// Adds the records from the checkpoints file at `path`
    ///
    /// # Returns
    /// The number of records applied. A missing file applies nothing
    ///
    /// # Errors
    /// As [`read_file`](CheckpointLoader::read_file) and
    /// [`apply_file_records`](CheckpointLoader::apply_file_records)
    pub fn load_from_file(&self, checkpoints: &mut Checkpoints, path: &Path) -> Result<usize> {
        match self.read_file(path)? {
            Some(records) => {
                info!("Adding checkpoints from blockchain hashfile {}", path.display());
                self.apply_file_records(checkpoints, &records)
            }
            None => Ok(0),
        }
    }

    /// Adds file records above the current highest checkpoint, in order
    ///
    /// Records at or below the highest checkpoint held when this is called are ignored, so a
    /// file can't resurrect history below a point that is already trusted. Records applied
    /// before a failing one are kept
    ///
    /// # Returns
    /// The number of records applied
    ///
    /// # Errors
    /// `MalformedHash` or `ConflictingCheckpoint` for the first record that can't be added
    pub fn apply_file_records(&self, checkpoints: &mut Checkpoints, records: &[HashLine]) -> Result<usize> {
        let boundary = checkpoints.max_height().ok();
        match boundary {
            Some(height) => debug!("Max checkpoint height before loading file is {}", height),
            None => debug!("No checkpoints loaded before file"),
        }

        let mut applied = 0;
        for record in records {
            if boundary.map_or(false, |boundary| record.height <= boundary) {
                debug!("Ignoring checkpoint height {}", record.height);
                continue;
            }
            debug!("Adding checkpoint height {}, hash={}", record.height, record.hash);
            checkpoints.add_checkpoint_hex(record.height, &record.hash).map_err(|err| {
                error!("Failed to add checkpoint from file: {}", err);
                err
            })?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Adds checkpoints published as TXT records for `network`
    ///
    /// Records that don't parse are skipped. Failing to resolve anything isn't an error
    ///
    /// # Returns
    /// The number of records applied
    ///
    /// # Errors
    /// `ConflictingCheckpoint` if a well-formed record disagrees with `checkpoints`
    pub fn load_from_dns(&self, checkpoints: &mut Checkpoints, network: NetworkType) -> Result<usize> {
        let domains = defaults::dns_checkpoint_domains(network);
        let records = match self.dns_source.load_txt_records(domains) {
            Ok(records) => records,
            Err(err) => {
                info!("No checkpoints loaded from DNS: {}", err);
                return Ok(0);
            }
        };

        let mut applied = 0;
        for record in &records {
            let (height, hash) = match parse_dns_record(record) {
                Some(checkpoint) => checkpoint,
                None => {
                    debug!("Skipping malformed DNS checkpoint record \"{}\"", record);
                    continue;
                }
            };
            checkpoints.add_checkpoint(height, hash).map_err(|err| {
                error!("Failed to add checkpoint from DNS: {}", err);
                err
            })?;
            applied += 1;
        }
        info!("Loaded {} checkpoints from DNS", applied);
        Ok(applied)
    }
}

/// Parses a `<height>:<hex hash>` TXT record
pub fn parse_dns_record(record: &str) -> Option<(u64, Hash256)> {
    let separator = record.find(':')?;
    let height = record[..separator].parse::<u64>().ok()?;
    let hash = Hash256::try_from(&record[separator + 1..]).ok()?;
    Some((height, hash))
}
