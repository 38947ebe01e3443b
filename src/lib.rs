//! A region-editing engine for chunk-column voxel worlds.
//!
//! The world is organized into full-height chunk columns of 16x16x16
//! sub-chunks. A [`FillSession`] is the bulk read/write facade over an
//! axis-aligned region of that grid: it lazily addresses only the sub-chunks
//! an edit actually touches, tracks the minimal chunk rectangle affected so
//! the host can reload just what changed, and can capture every pre-edit
//! block/tile state so the edit is exactly reversible.
//!
//! ```
//! use accretion::{
//!     BlockPos, EditHistory, FillPattern, FillSessionOptions, FullBlockId, Inserter,
//!     MemoryWorld, fill_cuboid,
//! };
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let world = MemoryWorld::new();
//! let mut history = EditHistory::new();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let pattern = FillPattern::parse("stone", world.registry()).unwrap();
//! let report = fill_cuboid(
//!     &world,
//!     BlockPos::new(0, 60, 0),
//!     BlockPos::new(15, 64, 15),
//!     &pattern,
//!     &mut rng,
//!     FillSessionOptions::default(),
//! )
//! .unwrap();
//! history.record_undo(report.action.unwrap());
//!
//! // Reverse the edit; what it overwrites becomes the redo action.
//! let undo = history.next_undo_action().unwrap();
//! let outcome = Inserter::new(&undo).insert(&world).unwrap();
//! history.save_redo(outcome.reverse);
//! ```

pub mod block_id;
pub mod changes;
pub mod chunk;
pub mod cursor;
pub mod diagnostics;
pub mod editor;
pub mod error;
pub mod history;
pub mod inserter;
pub mod pattern;
pub mod position;
pub mod registry;
pub mod session;
pub mod tile;
pub mod world;

pub use block_id::{FullBlockId, METADATA_BITS};
pub use changes::{BlockChangeSet, TileChangeSet};
pub use chunk::{Chunk, SubChunk, SUB_CHUNKS_PER_CHUNK, SUB_CHUNK_SIZE, SUB_CHUNK_VOLUME};
pub use cursor::{MoveStatus, SubChunkCursor};
pub use diagnostics::{DiagnosticsSink, LogSink};
pub use editor::{fill_cuboid, FillReport};
pub use error::{Error, Result};
pub use history::{EditAction, EditHistory};
pub use inserter::{InsertOutcome, Inserter};
pub use pattern::FillPattern;
pub use position::{BlockPos, WORLD_MAX_Y, WORLD_MIN_Y};
pub use registry::{BlockInfo, BlockRegistry};
pub use session::{FillSession, FillSessionOptions, XzBounds};
pub use tile::Tile;
pub use world::{
    BlockClassifier, ChunkManager, MemoryWorld, SharedChunk, SharedViewer, Viewer, WorldHandle,
};
