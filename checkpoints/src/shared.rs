use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::info;

use crypto::Hash256;

use crate::dns::DnsRecordSource;
use crate::error::Result;
use crate::file::FileRecordSource;
use crate::loader::CheckpointLoader;
use crate::store::{BlockVerdict, Checkpoints};

/// A checkpoint set shared between the validation threads
///
/// Readers never block each other. The only writer is an operator-triggered reload, which
/// swaps in a fully validated set under the write lock
#[derive(Clone, Debug, Default)]
pub struct SharedCheckpoints {
    inner: Arc<RwLock<Checkpoints>>,
}

impl SharedCheckpoints {
    /// Wraps a loaded checkpoint set
    pub fn new(checkpoints: Checkpoints) -> Self {
        SharedCheckpoints {
            inner: Arc::new(RwLock::new(checkpoints)),
        }
    }

    /// Gets read access to the checkpoint set
    pub fn read(&self) -> RwLockReadGuard<'_, Checkpoints> {
        // Writers only ever swap in a complete set, so a poisoned lock still holds a valid one
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Checkpoints> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Checkpoints::get`]
    pub fn get(&self, height: u64) -> Option<Hash256> {
        self.read().get(height).cloned()
    }

    /// See [`Checkpoints::in_checkpoint_zone`]
    pub fn in_checkpoint_zone(&self, height: u64) -> bool {
        self.read().in_checkpoint_zone(height)
    }

    /// See [`Checkpoints::check_block`]
    pub fn check_block(&self, height: u64, hash: &Hash256) -> BlockVerdict {
        self.read().check_block(height, hash)
    }

    /// See [`Checkpoints::is_alternative_chain_allowed`]
    pub fn is_alternative_chain_allowed(&self, current_height: u64, fork_height: u64) -> bool {
        self.read().is_alternative_chain_allowed(current_height, fork_height)
    }

    /// Re-reads the checkpoints file at `path` and adds its new records
    ///
    /// The file is read before taking the write lock. Records are applied to a copy of the
    /// set which replaces the live one only if every record applied, so a failed reload
    /// leaves the live set untouched
    ///
    /// # Returns
    /// The number of records added
    ///
    /// # Errors
    /// As [`CheckpointLoader::load_from_file`]
    pub fn reload_from_file<F, D>(&self, loader: &CheckpointLoader<F, D>, path: &Path) -> Result<usize>
    where
        F: FileRecordSource,
        D: DnsRecordSource,
    {
        let records = match loader.read_file(path)? {
            Some(records) => records,
            None => return Ok(0),
        };

        let mut live = self.write();
        let mut staged = live.clone();
        let applied = loader.apply_file_records(&mut staged, &records)?;
        *live = staged;
        info!("Reloaded checkpoints from {}, {} added", path.display(), applied);
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::dns::NoDnsRecords;
    use crate::error::Error;
    use crate::file::{JsonFileSource, JSON_HASH_FILE_NAME};

    const HASH_A: &str = "0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a";
    const HASH_B: &str = "0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b";

    fn shared_at(heights: &[u64]) -> SharedCheckpoints {
        let mut checkpoints = Checkpoints::new();
        for height in heights {
            checkpoints.add_checkpoint_hex(*height, HASH_A).unwrap();
        }
        SharedCheckpoints::new(checkpoints)
    }

    fn write_file(path: &Path, contents: &str) {
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn queries_go_through_to_the_set() {
        let shared = shared_at(&[100, 200]);
        let hash_a: Hash256 = HASH_A.parse().unwrap();
        let hash_b: Hash256 = HASH_B.parse().unwrap();
        assert_eq!(shared.get(100), Some(hash_a.clone()));
        assert!(shared.in_checkpoint_zone(200));
        assert!(!shared.in_checkpoint_zone(201));
        assert_eq!(shared.check_block(100, &hash_a), BlockVerdict::Accept);
        assert!(!shared.check_block(200, &hash_b).is_pass());
        assert!(!shared.is_alternative_chain_allowed(150, 100));
        assert!(shared.is_alternative_chain_allowed(150, 101));
    }

    #[test]
    fn reload_adds_new_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(JSON_HASH_FILE_NAME);
        let loader = CheckpointLoader::new(JsonFileSource, NoDnsRecords);
        let shared = shared_at(&[100]);

        // Nothing to reload yet
        assert_eq!(shared.reload_from_file(&loader, &path).unwrap(), 0);

        write_file(&path, &format!(r#"{{"hashlines": [{{"height": 50, "hash": "{}"}}, {{"height": 300, "hash": "{}"}}]}}"#, HASH_B, HASH_B));
        assert_eq!(shared.reload_from_file(&loader, &path).unwrap(), 1);
        assert_eq!(shared.read().max_height().unwrap(), 300);
        assert_eq!(shared.get(50), None);
    }

    #[test]
    fn failed_reload_leaves_set_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(JSON_HASH_FILE_NAME);
        let loader = CheckpointLoader::new(JsonFileSource, NoDnsRecords);
        let shared = shared_at(&[100]);
        let before = shared.read().clone();

        write_file(&path, &format!(r#"{{"hashlines": [{{"height": 300, "hash": "{}"}}, {{"height": 400, "hash": "bad"}}]}}"#, HASH_B));
        assert!(matches!(shared.reload_from_file(&loader, &path), Err(Error::MalformedHash { .. })));
        assert_eq!(*shared.read(), before);

        write_file(&path, "not json");
        assert!(matches!(shared.reload_from_file(&loader, &path), Err(Error::ResourceCorrupt { .. })));
        assert_eq!(*shared.read(), before);
    }

    #[test]
    fn readers_see_a_complete_set_during_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(JSON_HASH_FILE_NAME);
        let lines: Vec<String> = (101..=200)
            .map(|height| format!(r#"{{"height": {}, "hash": "{}"}}"#, height, HASH_B))
            .collect();
        write_file(&path, &format!(r#"{{"hashlines": [{}]}}"#, lines.join(",")));

        let shared = shared_at(&[100]);
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        let len = shared.read().len();
                        assert!(len == 1 || len == 101, "observed partial set of {}", len);
                    }
                })
            })
            .collect();

        let loader = CheckpointLoader::new(JsonFileSource, NoDnsRecords);
        assert_eq!(shared.reload_from_file(&loader, &path).unwrap(), 100);
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(shared.read().len(), 101);
    }
}
