use crate::block_id::FullBlockId;
use crate::tile::Tile;
use rustc_hash::FxHashMap;

/// Edge length of a sub-chunk.
pub const SUB_CHUNK_SIZE: usize = 16;
/// Blocks per sub-chunk (16x16x16).
pub const SUB_CHUNK_VOLUME: usize = SUB_CHUNK_SIZE * SUB_CHUNK_SIZE * SUB_CHUNK_SIZE;
/// Sub-chunks stacked in one chunk column.
pub const SUB_CHUNKS_PER_CHUNK: usize = 16;

/// A 16x16x16 cell of the voxel grid, the unit of storage residency.
/// Blocks are raw full block ids in a flat array indexed `y << 8 | z << 4 | x`.
#[derive(Debug, Clone)]
pub struct SubChunk {
    blocks: Box<[u32; SUB_CHUNK_VOLUME]>,
}

impl SubChunk {
    pub fn new() -> Self {
        SubChunk {
            blocks: Box::new([0; SUB_CHUNK_VOLUME]),
        }
    }

    #[inline(always)]
    fn index(lx: usize, ly: usize, lz: usize) -> usize {
        ly << 8 | lz << 4 | lx
    }

    #[inline]
    pub fn get_full_block(&self, lx: usize, ly: usize, lz: usize) -> FullBlockId {
        FullBlockId::from_raw(self.blocks[Self::index(lx, ly, lz)])
    }

    #[inline]
    pub fn set_full_block(&mut self, lx: usize, ly: usize, lz: usize, id: FullBlockId) {
        self.blocks[Self::index(lx, ly, lz)] = id.raw();
    }
}

impl Default for SubChunk {
    fn default() -> Self {
        SubChunk::new()
    }
}

/// A full-height chunk column: 16 vertically stacked sub-chunks, a 16x16
/// biome layer, and the tiles attached to blocks in the column.
///
/// Sub-chunks materialize on first write; an unmaterialized sub-chunk reads
/// as all air. Tiles are keyed by (local x, absolute y, local z); y is not
/// chunk-sharded, the column spans the whole vertical range.
#[derive(Debug)]
pub struct Chunk {
    x: i32,
    z: i32,
    sub_chunks: [Option<Box<SubChunk>>; SUB_CHUNKS_PER_CHUNK],
    biomes: [u8; SUB_CHUNK_SIZE * SUB_CHUNK_SIZE],
    tiles: FxHashMap<(usize, i32, usize), Tile>,
}

impl Chunk {
    pub fn new(x: i32, z: i32) -> Self {
        Chunk {
            x,
            z,
            sub_chunks: Default::default(),
            biomes: [0; SUB_CHUNK_SIZE * SUB_CHUNK_SIZE],
            tiles: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.z
    }

    /// The sub-chunk at the given vertical index, if it has been materialized.
    #[inline]
    pub fn sub_chunk(&self, index: usize) -> Option<&SubChunk> {
        self.sub_chunks[index].as_deref()
    }

    /// The sub-chunk at the given vertical index, materializing it on demand.
    #[inline]
    pub fn sub_chunk_mut(&mut self, index: usize) -> &mut SubChunk {
        self.sub_chunks[index].get_or_insert_with(Default::default)
    }

    pub fn materialized_sub_chunks(&self) -> usize {
        self.sub_chunks.iter().filter(|s| s.is_some()).count()
    }

    /// Read a block by local x/z and absolute y. Unmaterialized sub-chunks
    /// read as air.
    pub fn get_full_block(&self, lx: usize, y: i32, lz: usize) -> FullBlockId {
        match self.sub_chunk((y >> 4) as usize) {
            Some(sub) => sub.get_full_block(lx, (y & 0xf) as usize, lz),
            None => FullBlockId::AIR,
        }
    }

    /// Write a block by local x/z and absolute y.
    pub fn set_full_block(&mut self, lx: usize, y: i32, lz: usize, id: FullBlockId) {
        self.sub_chunk_mut((y >> 4) as usize)
            .set_full_block(lx, (y & 0xf) as usize, lz, id);
    }

    #[inline]
    pub fn biome(&self, lx: usize, lz: usize) -> u8 {
        self.biomes[lz << 4 | lx]
    }

    #[inline]
    pub fn set_biome(&mut self, lx: usize, lz: usize, id: u8) {
        self.biomes[lz << 4 | lx] = id;
    }

    /// The tile attached at (local x, absolute y, local z), if any.
    pub fn tile(&self, lx: usize, y: i32, lz: usize) -> Option<&Tile> {
        self.tiles.get(&(lx, y, lz))
    }

    /// Attach a tile, keyed by its own position. Any previous tile at that
    /// coordinate is returned so the caller decides its fate.
    pub fn add_tile(&mut self, tile: Tile) -> Option<Tile> {
        let pos = tile.pos();
        self.tiles
            .insert((pos.local_x(), pos.y, pos.local_z()), tile)
    }

    /// Detach and return the tile at a coordinate. Dropping the returned
    /// value closes the tile for good.
    pub fn remove_tile(&mut self, lx: usize, y: i32, lz: usize) -> Option<Tile> {
        self.tiles.remove(&(lx, y, lz))
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}
