use std::collections::BTreeMap;
use std::convert::TryFrom;

use ensure_macro::ensure;
use log::{debug, warn};

use crypto::Hash256;

use crate::error::{Error, Result};
use crate::file::{HashFile, HashLine};

/// A pinned block
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    /// Block height
    pub height: u64,
    /// Expected block ID at `height`
    pub hash: Hash256,
}

/// Outcome of checking a block against the checkpoint set
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BlockVerdict {
    /// A checkpoint exists at the block's height and the hashes match
    Accept,
    /// A checkpoint exists at the block's height and the hashes differ
    Reject {
        /// Hash pinned by the checkpoint
        expected: Hash256,
        /// Hash of the block that was checked
        observed: Hash256,
    },
    /// No checkpoint at the block's height
    NotCheckpointed,
}

impl BlockVerdict {
    /// Whether the block may proceed to the rest of validation
    pub fn is_pass(&self) -> bool {
        match self {
            BlockVerdict::Reject { .. } => false,
            _ => true,
        }
    }
}

/// # Checkpoints
///
/// An ordered set of (height, block ID) pairs known to be part of the canonical chain.
///
/// Entries are only ever added: a height can't be re-pinned to a different hash, and
/// re-adding an identical pair is a no-op. Blocks and alternative chains are checked
/// against the set to refuse any reorganization that would rewrite pinned history.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Checkpoints {
    checkpoints: BTreeMap<u64, Hash256>,
}

impl Checkpoints {
    /// Creates an empty checkpoint set
    pub fn new() -> Checkpoints {
        Checkpoints {
            checkpoints: BTreeMap::new(),
        }
    }

    /// Pins `hash` at `height`
    ///
    /// # Errors
    /// `ConflictingCheckpoint` if `height` is already pinned to another hash. The set is left
    /// unmodified in that case
    pub fn add_checkpoint(&mut self, height: u64, hash: Hash256) -> Result<()> {
        if let Some(existing) = self.checkpoints.get(&height) {
            ensure!(*existing == hash, Error::ConflictingCheckpoint {
                height,
                existing: existing.clone(),
                new: hash,
            });
            return Ok(());
        }
        self.checkpoints.insert(height, hash);
        Ok(())
    }

    /// Pins a hex-encoded hash at `height`
    ///
    /// # Errors
    /// `MalformedHash` if `hash` doesn't decode, before the set is touched. Otherwise as
    /// [`add_checkpoint`](Checkpoints::add_checkpoint)
    pub fn add_checkpoint_hex(&mut self, height: u64, hash: &str) -> Result<()> {
        let decoded = Hash256::try_from(hash).map_err(|source| Error::MalformedHash {
            hash: hash.to_string(),
            source,
        })?;
        self.add_checkpoint(height, decoded)
    }

    /// Gets the hash pinned at `height`
    pub fn get(&self, height: u64) -> Option<&Hash256> {
        self.checkpoints.get(&height)
    }

    /// Whether `height` is at or below the highest checkpoint
    ///
    /// Always false while the set is empty
    pub fn in_checkpoint_zone(&self, height: u64) -> bool {
        match self.max_height() {
            Ok(max_height) => height <= max_height,
            Err(_) => false,
        }
    }

    /// Checks a block ID against the checkpoint at `height`
    ///
    /// A mismatch is logged at warn level with both hashes, and the returned verdict carries
    /// them so callers can refuse the block
    pub fn check_block(&self, height: u64, hash: &Hash256) -> BlockVerdict {
        match self.checkpoints.get(&height) {
            None => BlockVerdict::NotCheckpointed,
            Some(expected) if expected == hash => {
                debug!("CHECKPOINT PASSED FOR HEIGHT {} {}", height, hash);
                BlockVerdict::Accept
            }
            Some(expected) => {
                warn!("CHECKPOINT FAILED FOR HEIGHT {}. EXPECTED HASH: {}, FETCHED HASH: {}", height, expected, hash);
                BlockVerdict::Reject {
                    expected: expected.clone(),
                    observed: hash.clone(),
                }
            }
        }
    }

    /// Whether an alternative chain branching at `fork_height` may be considered while our
    /// chain is at `current_height`
    ///
    /// See [`check_alternative_chain`](Checkpoints::check_alternative_chain) for the rules
    pub fn is_alternative_chain_allowed(&self, current_height: u64, fork_height: u64) -> bool {
        self.check_alternative_chain(current_height, fork_height).is_ok()
    }

    /// Checks whether an alternative chain branching at `fork_height` may be considered while
    /// our chain is at `current_height`
    ///
    /// A fork must branch strictly above the highest checkpoint at or below `current_height`.
    /// If our chain hasn't reached any checkpoint yet, every fork (other than at 0) is allowed.
    ///
    /// # Errors
    /// * `InvalidForkHeight` if `fork_height` is 0
    /// * `ForkBeforeCheckpoint` if the fork would rewrite a checkpointed block
    pub fn check_alternative_chain(&self, current_height: u64, fork_height: u64) -> Result<()> {
        ensure!(fork_height != 0, Error::InvalidForkHeight);

        if let Some((&checkpoint_height, _)) = self.checkpoints.range(..=current_height).next_back() {
            ensure!(fork_height > checkpoint_height, Error::ForkBeforeCheckpoint {
                fork_height,
                checkpoint_height,
            });
        }
        Ok(())
    }

    /// Gets the highest checkpointed height
    ///
    /// # Errors
    /// `EmptyStore` if there are no checkpoints
    pub fn max_height(&self) -> Result<u64> {
        self.checkpoints
            .keys()
            .next_back()
            .copied()
            .ok_or(Error::EmptyStore)
    }

    /// Checks that every checkpoint in `other` agrees with this set where heights overlap
    ///
    /// # Errors
    /// `ConflictingCheckpoint` for the lowest overlapping height whose hashes differ
    pub fn check_for_conflicts(&self, other: &Checkpoints) -> Result<()> {
        for (height, hash) in other.checkpoints.iter() {
            if let Some(existing) = self.checkpoints.get(height) {
                ensure!(existing == hash, Error::ConflictingCheckpoint {
                    height: *height,
                    existing: existing.clone(),
                    new: hash.clone(),
                });
            }
        }
        Ok(())
    }

    /// Adds every checkpoint from `other` to this set
    ///
    /// The merge is all-or-nothing: conflicts are checked up front, so a failed merge leaves
    /// this set unmodified
    ///
    /// # Errors
    /// `ConflictingCheckpoint` as in [`check_for_conflicts`](Checkpoints::check_for_conflicts)
    pub fn merge(&mut self, other: &Checkpoints) -> Result<()> {
        self.check_for_conflicts(other)?;
        for (height, hash) in other.checkpoints.iter() {
            self.checkpoints.insert(*height, hash.clone());
        }
        Ok(())
    }

    /// Read-only view of the checkpoints, ordered by height
    pub fn points(&self) -> &BTreeMap<u64, Hash256> {
        &self.checkpoints
    }

    /// Iterates over the checkpoints in height order
    pub fn iter(&self) -> impl Iterator<Item = Checkpoint> + '_ {
        self.checkpoints.iter().map(|(height, hash)| Checkpoint {
            height: *height,
            hash: hash.clone(),
        })
    }

    /// Number of checkpoints
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Whether there are no checkpoints
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Exports the set in the checkpoints file format
    pub fn to_hash_file(&self) -> HashFile {
        HashFile {
            hashlines: self
                .iter()
                .map(|checkpoint| HashLine {
                    height: checkpoint.height,
                    hash: checkpoint.hash.to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(byte: u8) -> Hash256 {
        Hash256::from([byte; 32])
    }

    fn checkpoints_at(heights: &[u64]) -> Checkpoints {
        let mut c = Checkpoints::new();
        for height in heights {
            c.add_checkpoint(*height, hash(*height as u8)).unwrap();
        }
        c
    }

    #[test]
    fn distinct_heights_do_not_interfere() {
        let mut c = Checkpoints::new();
        c.add_checkpoint(100, hash(1)).unwrap();
        c.add_checkpoint(200, hash(2)).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.get(100), Some(&hash(1)));
        assert_eq!(c.get(200), Some(&hash(2)));
        assert_eq!(c.get(150), None);
    }

    #[test]
    fn readding_identical_checkpoint_is_noop() {
        let mut c = Checkpoints::new();
        c.add_checkpoint(100, hash(1)).unwrap();
        c.add_checkpoint(100, hash(1)).unwrap();
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn conflicting_checkpoint_is_refused() {
        let mut c = Checkpoints::new();
        c.add_checkpoint(100, hash(1)).unwrap();
        match c.add_checkpoint(100, hash(2)) {
            Err(Error::ConflictingCheckpoint { height, existing, new }) => {
                assert_eq!(height, 100);
                assert_eq!(existing, hash(1));
                assert_eq!(new, hash(2));
            }
            other => panic!("Expected a conflict, got {:?}", other),
        }
        assert_eq!(c.get(100), Some(&hash(1)));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn hex_checkpoints_are_decoded() {
        let mut c = Checkpoints::new();
        c.add_checkpoint_hex(0, "20c1047c2411b076855977031bf8ccaed4bf544cd03cbc7dbebfef95891248a5").unwrap();
        assert_eq!(
            c.get(0).unwrap().to_string(),
            "20c1047c2411b076855977031bf8ccaed4bf544cd03cbc7dbebfef95891248a5"
        );
    }

    #[test]
    fn malformed_hex_leaves_set_untouched() {
        let mut c = Checkpoints::new();
        assert!(matches!(c.add_checkpoint_hex(5, "1234"), Err(Error::MalformedHash { .. })));
        assert!(matches!(
            c.add_checkpoint_hex(5, "g0c1047c2411b076855977031bf8ccaed4bf544cd03cbc7dbebfef95891248a5"),
            Err(Error::MalformedHash { .. })
        ));
        assert!(c.is_empty());
    }

    #[test]
    fn checkpoint_zone() {
        let mut c = Checkpoints::new();
        for height in &[0, 1, 100, u64::max_value()] {
            assert!(!c.in_checkpoint_zone(*height));
        }
        c.add_checkpoint(100, hash(1)).unwrap();
        assert!(c.in_checkpoint_zone(0));
        assert!(c.in_checkpoint_zone(100));
        assert!(!c.in_checkpoint_zone(101));
    }

    #[test]
    fn max_height() {
        let mut c = Checkpoints::new();
        assert!(matches!(c.max_height(), Err(Error::EmptyStore)));
        c.add_checkpoint(200, hash(2)).unwrap();
        c.add_checkpoint(100, hash(1)).unwrap();
        assert_eq!(c.max_height().unwrap(), 200);
    }

    #[test]
    fn check_block() {
        let c = checkpoints_at(&[100, 200, 300]);
        assert_eq!(c.check_block(100, &hash(100)), BlockVerdict::Accept);
        assert_eq!(
            c.check_block(100, &hash(7)),
            BlockVerdict::Reject {
                expected: hash(100),
                observed: hash(7),
            }
        );
        assert_eq!(c.check_block(150, &hash(7)), BlockVerdict::NotCheckpointed);
        assert!(c.check_block(150, &hash(7)).is_pass());
        assert!(!c.check_block(100, &hash(7)).is_pass());
    }

    #[test]
    fn alternative_chains() {
        let c = checkpoints_at(&[100, 200, 300]);
        // Nearest checkpoint at or below 250 is 200
        assert!(!c.is_alternative_chain_allowed(250, 150));
        assert!(!c.is_alternative_chain_allowed(250, 200));
        assert!(c.is_alternative_chain_allowed(250, 201));
        assert!(c.is_alternative_chain_allowed(250, 250));
        // Current height exactly on a checkpoint
        assert!(!c.is_alternative_chain_allowed(300, 300));
        assert!(c.is_alternative_chain_allowed(300, 301));
        // Before the first checkpoint anything goes
        assert!(c.is_alternative_chain_allowed(99, 1));
    }

    #[test]
    fn fork_at_genesis_is_never_allowed() {
        let empty = Checkpoints::new();
        let c = checkpoints_at(&[100]);
        for current_height in &[0, 50, 1000] {
            assert!(!empty.is_alternative_chain_allowed(*current_height, 0));
            assert!(!c.is_alternative_chain_allowed(*current_height, 0));
        }
        assert!(matches!(c.check_alternative_chain(10, 0), Err(Error::InvalidForkHeight)));
    }

    #[test]
    fn fork_before_checkpoint_reports_heights() {
        let c = checkpoints_at(&[100, 200, 300]);
        match c.check_alternative_chain(250, 150) {
            Err(Error::ForkBeforeCheckpoint { fork_height, checkpoint_height }) => {
                assert_eq!(fork_height, 150);
                assert_eq!(checkpoint_height, 200);
            }
            other => panic!("Expected fork to be refused, got {:?}", other),
        }
    }

    #[test]
    fn merge_disjoint_sets() {
        let mut a = checkpoints_at(&[100, 300]);
        let b = checkpoints_at(&[200, 400]);
        a.merge(&b).unwrap();
        assert_eq!(a.points().keys().copied().collect::<Vec<_>>(), vec![100, 200, 300, 400]);
    }

    #[test]
    fn merge_overlapping_identical_sets() {
        let mut a = checkpoints_at(&[100, 200]);
        let b = checkpoints_at(&[200, 300]);
        a.merge(&b).unwrap();
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn failed_merge_leaves_target_untouched() {
        let mut a = checkpoints_at(&[100, 300]);
        let mut b = Checkpoints::new();
        b.add_checkpoint(200, hash(2)).unwrap();
        b.add_checkpoint(300, hash(9)).unwrap();
        let before = a.clone();
        assert!(matches!(a.merge(&b), Err(Error::ConflictingCheckpoint { height: 300, .. })));
        assert_eq!(a, before);
        assert!(a.check_for_conflicts(&b).is_err());
        assert!(b.check_for_conflicts(&checkpoints_at(&[100])).is_ok());
    }

    #[test]
    fn exports_in_height_order() {
        let c = checkpoints_at(&[300, 100]);
        let file = c.to_hash_file();
        assert_eq!(file.hashlines.len(), 2);
        assert_eq!(file.hashlines[0].height, 100);
        assert_eq!(file.hashlines[0].hash, hash(100).to_string());
        assert_eq!(file.hashlines[1].height, 300);
    }
}
