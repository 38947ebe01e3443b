use crate::position::{WORLD_MAX_Y, WORLD_MIN_Y};
use crate::world::{ChunkManager, SharedChunk};

/// Result of moving the cursor to an absolute coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// Still inside the same 16-cell as the previous move; nothing re-resolved.
    Ok,
    /// Crossed a chunk or sub-chunk boundary and re-resolved.
    Moved,
    /// The containing chunk is not resident, or y is outside the world range.
    Invalid,
}

impl MoveStatus {
    #[inline]
    pub fn is_valid(self) -> bool {
        !matches!(self, MoveStatus::Invalid)
    }
}

/// Resolves and caches the chunk and sub-chunk containing the coordinates a
/// bulk edit is walking over.
///
/// Re-resolution only happens when a move crosses a 16-unit cell boundary on
/// some axis or the store's generation counter has advanced since the cached
/// handle was resolved; consecutive moves within one sub-chunk are a couple
/// of integer compares. Exclusively owned by one session, which must
/// invalidate it on close.
pub struct SubChunkCursor<'w, M: ChunkManager> {
    world: &'w M,
    chunk: Option<SharedChunk>,
    chunk_x: i32,
    chunk_z: i32,
    sub_chunk_y: i32,
    generation: u64,
}

impl<'w, M: ChunkManager> SubChunkCursor<'w, M> {
    pub fn new(world: &'w M) -> Self {
        SubChunkCursor {
            world,
            chunk: None,
            chunk_x: i32::MIN,
            chunk_z: i32::MIN,
            sub_chunk_y: i32::MIN,
            generation: 0,
        }
    }

    /// Resolve the chunk and sub-chunk containing (x, y, z).
    pub fn move_to(&mut self, x: i32, y: i32, z: i32) -> MoveStatus {
        if !(WORLD_MIN_Y..=WORLD_MAX_Y).contains(&y) {
            return MoveStatus::Invalid;
        }

        let chunk_x = x >> 4;
        let chunk_z = z >> 4;
        let sub_chunk_y = y >> 4;
        let generation = self.world.generation();

        if self.chunk.is_some()
            && chunk_x == self.chunk_x
            && chunk_z == self.chunk_z
            && generation == self.generation
        {
            if sub_chunk_y == self.sub_chunk_y {
                return MoveStatus::Ok;
            }
            self.sub_chunk_y = sub_chunk_y;
            return MoveStatus::Moved;
        }

        match self.world.chunk(chunk_x, chunk_z) {
            Some(chunk) => {
                self.chunk = Some(chunk);
                self.chunk_x = chunk_x;
                self.chunk_z = chunk_z;
                self.sub_chunk_y = sub_chunk_y;
                self.generation = generation;
                MoveStatus::Moved
            }
            None => {
                self.invalidate();
                MoveStatus::Invalid
            }
        }
    }

    /// The chunk resolved by the last successful move.
    #[inline]
    pub fn chunk(&self) -> Option<&SharedChunk> {
        self.chunk.as_ref()
    }

    /// Vertical sub-chunk index resolved by the last successful move.
    #[inline]
    pub fn sub_chunk_index(&self) -> usize {
        self.sub_chunk_y as usize
    }

    /// Release the cached chunk handle. Idempotent.
    pub fn invalidate(&mut self) {
        self.chunk = None;
        self.chunk_x = i32::MIN;
        self.chunk_z = i32::MIN;
        self.sub_chunk_y = i32::MIN;
    }
}
