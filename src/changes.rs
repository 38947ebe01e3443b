use crate::block_id::FullBlockId;
use crate::position::BlockPos;
use rustc_hash::FxHashMap;

/// Insertion-ordered map of pre-edit block states, one entry per coordinate.
///
/// Recording is first-write-wins: the state observed when a coordinate is
/// first touched is what undo must restore, and later touches within the
/// same session must not overwrite it. Entries iterate in insertion order.
#[derive(Debug, Default, Clone)]
pub struct BlockChangeSet {
    entries: Vec<(BlockPos, FullBlockId)>,
    index: FxHashMap<BlockPos, usize>,
}

impl BlockChangeSet {
    pub fn new() -> Self {
        BlockChangeSet::default()
    }

    /// Record the pre-edit state of a coordinate. Returns false (and keeps
    /// the existing entry) if the coordinate was already recorded.
    pub fn record(&mut self, pos: BlockPos, id: FullBlockId) -> bool {
        if self.index.contains_key(&pos) {
            return false;
        }
        self.index.insert(pos, self.entries.len());
        self.entries.push((pos, id));
        true
    }

    pub fn get(&self, pos: BlockPos) -> Option<FullBlockId> {
        self.index.get(&pos).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, FullBlockId)> + '_ {
        self.entries.iter().copied()
    }
}

/// Insertion-ordered map of pre-edit tile payloads (serialized, detached
/// copies). Same first-write-wins behavior as [`BlockChangeSet`].
#[derive(Debug, Default, Clone)]
pub struct TileChangeSet {
    entries: Vec<(BlockPos, Vec<u8>)>,
    index: FxHashMap<BlockPos, usize>,
}

impl TileChangeSet {
    pub fn new() -> Self {
        TileChangeSet::default()
    }

    pub fn record(&mut self, pos: BlockPos, payload: Vec<u8>) -> bool {
        if self.index.contains_key(&pos) {
            return false;
        }
        self.index.insert(pos, self.entries.len());
        self.entries.push((pos, payload));
        true
    }

    pub fn get(&self, pos: BlockPos) -> Option<&[u8]> {
        self.index.get(&pos).map(|&i| self.entries[i].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, &[u8])> + '_ {
        self.entries.iter().map(|(pos, payload)| (*pos, payload.as_slice()))
    }
}
