use crate::chunk::Chunk;
use crate::registry::BlockRegistry;
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A chunk column shared within the single-threaded editing model.
pub type SharedChunk = Rc<RefCell<Chunk>>;

/// A client observing some chunks, notified when they are re-committed.
pub trait Viewer {
    fn refresh(&mut self, chunk_x: i32, chunk_z: i32);
}

pub type SharedViewer = Rc<RefCell<dyn Viewer>>;

/// Residency view of the host chunk store.
///
/// `generation` is bumped by the store whenever chunk residency changes; a
/// cached chunk handle is only valid for the generation it was resolved
/// under, and holders must re-resolve once the counter moves.
pub trait ChunkManager {
    /// The chunk column at the given chunk coordinates, if resident.
    fn chunk(&self, chunk_x: i32, chunk_z: i32) -> Option<SharedChunk>;

    /// Invalidation token for cached chunk handles.
    fn generation(&self) -> u64;
}

/// Full world store interface: residency control and view synchronization on
/// top of [`ChunkManager`]. Methods take `&self`; implementations are
/// expected to use interior mutability (the engine is single-threaded).
pub trait WorldHandle: ChunkManager {
    /// Ensure the chunk at the given coordinates is resident.
    fn load_chunk(&self, chunk_x: i32, chunk_z: i32);

    /// Re-commit a chunk to the store after a bulk edit.
    fn commit_chunk(&self, chunk_x: i32, chunk_z: i32, chunk: SharedChunk);

    /// The clients currently observing the given chunk.
    fn viewers_of(&self, chunk_x: i32, chunk_z: i32) -> Vec<SharedViewer>;
}

/// Material classification consumed by the highest-block scan.
pub trait BlockClassifier {
    fn is_solid(&self, type_id: u32, meta: u32) -> bool;
}

/// In-memory reference implementation of the world store, used by tests and
/// benches. Loading a missing chunk materializes an empty column; every
/// residency change bumps the generation counter.
pub struct MemoryWorld {
    chunks: RefCell<FxHashMap<(i32, i32), SharedChunk>>,
    viewers: RefCell<FxHashMap<(i32, i32), Vec<SharedViewer>>>,
    registry: BlockRegistry,
    generation: Cell<u64>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        MemoryWorld::with_registry(BlockRegistry::with_defaults())
    }

    pub fn with_registry(registry: BlockRegistry) -> Self {
        MemoryWorld {
            chunks: RefCell::new(FxHashMap::default()),
            viewers: RefCell::new(FxHashMap::default()),
            registry,
            generation: Cell::new(0),
        }
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.borrow().len()
    }

    /// Drop a chunk from residency. Cached handles pointing at it are cut off
    /// by the generation bump.
    pub fn unload_chunk(&self, chunk_x: i32, chunk_z: i32) -> bool {
        let removed = self.chunks.borrow_mut().remove(&(chunk_x, chunk_z)).is_some();
        if removed {
            self.bump_generation();
        }
        removed
    }

    pub fn add_viewer(&self, chunk_x: i32, chunk_z: i32, viewer: SharedViewer) {
        self.viewers
            .borrow_mut()
            .entry((chunk_x, chunk_z))
            .or_default()
            .push(viewer);
    }

    fn bump_generation(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}

impl Default for MemoryWorld {
    fn default() -> Self {
        MemoryWorld::new()
    }
}

impl ChunkManager for MemoryWorld {
    fn chunk(&self, chunk_x: i32, chunk_z: i32) -> Option<SharedChunk> {
        self.chunks.borrow().get(&(chunk_x, chunk_z)).cloned()
    }

    fn generation(&self) -> u64 {
        self.generation.get()
    }
}

impl WorldHandle for MemoryWorld {
    fn load_chunk(&self, chunk_x: i32, chunk_z: i32) {
        let mut chunks = self.chunks.borrow_mut();
        if !chunks.contains_key(&(chunk_x, chunk_z)) {
            chunks.insert(
                (chunk_x, chunk_z),
                Rc::new(RefCell::new(Chunk::new(chunk_x, chunk_z))),
            );
            drop(chunks);
            self.bump_generation();
        }
    }

    fn commit_chunk(&self, chunk_x: i32, chunk_z: i32, chunk: SharedChunk) {
        self.chunks.borrow_mut().insert((chunk_x, chunk_z), chunk);
        self.bump_generation();
    }

    fn viewers_of(&self, chunk_x: i32, chunk_z: i32) -> Vec<SharedViewer> {
        self.viewers
            .borrow()
            .get(&(chunk_x, chunk_z))
            .cloned()
            .unwrap_or_default()
    }
}

impl BlockClassifier for MemoryWorld {
    fn is_solid(&self, type_id: u32, meta: u32) -> bool {
        self.registry.is_solid(type_id, meta)
    }
}
