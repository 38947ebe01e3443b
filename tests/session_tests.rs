use accretion::{
    BlockPos, ChunkManager, DiagnosticsSink, FillSession, FillSessionOptions, FullBlockId,
    MemoryWorld, Tile, Viewer, WorldHandle,
};
use quartz_nbt::NbtCompound;
use std::cell::RefCell;
use std::rc::Rc;

fn loaded_world(chunk_range: i32) -> MemoryWorld {
    let world = MemoryWorld::new();
    for x in 0..chunk_range {
        for z in 0..chunk_range {
            world.load_chunk(x, z);
        }
    }
    world
}

fn chest_tile(pos: BlockPos) -> Tile {
    let mut nbt = NbtCompound::new();
    nbt.insert("id", "Chest".to_string());
    nbt.insert("Items", 3i32);
    Tile::new(pos, nbt)
}

#[test]
fn test_set_then_get_round_trip() {
    let world = loaded_world(2);
    let mut session = FillSession::new(&world, FillSessionOptions::default());

    let stone = FullBlockId::new(1, 0);
    let wool = FullBlockId::new(35, 14);
    session.set_block_at(3, 70, 5, stone);
    session.set_block_at(17, 0, 30, wool);

    assert_eq!(session.get_block_at(3, 70, 5), Some(stone));
    assert_eq!(session.get_block_at(17, 0, 30), Some(wool));
    assert_eq!(session.blocks_changed(), 2);
}

#[test]
fn test_unloaded_chunk_is_skipped() {
    let world = loaded_world(1);
    let mut session = FillSession::new(&world, FillSessionOptions::default());

    // Chunk (2, 2) was never loaded
    session.set_block_at(40, 70, 40, FullBlockId::new(1, 0));
    assert_eq!(session.blocks_changed(), 0);
    assert_eq!(session.get_block_at(40, 70, 40), None);

    // Out-of-range y is the same non-fatal skip
    session.set_block_at(3, 256, 3, FullBlockId::new(1, 0));
    assert_eq!(session.blocks_changed(), 0);
}

#[test]
fn test_bounding_box_is_exact() {
    let world = loaded_world(4);
    let mut session = FillSession::new(&world, FillSessionOptions::default());
    assert!(session.dimensions().is_none());

    session.set_block_at(5, 64, 9, FullBlockId::new(1, 0));
    session.set_block_at(-2, 64, 30, FullBlockId::new(1, 0));
    session.set_block_at(12, 64, 1, FullBlockId::new(1, 0));

    // Only the in-bounds writes count: (-2, 30) resolves no chunk
    let bounds = session.dimensions().unwrap();
    assert_eq!(
        (bounds.min_x, bounds.max_x, bounds.min_z, bounds.max_z),
        (5, 12, 1, 9)
    );
}

#[test]
fn test_untracked_session_rejects_change_requests() {
    let world = loaded_world(1);
    let options = FillSessionOptions::default().with_save_changes(false);
    let mut session = FillSession::new(&world, options);

    session.set_block_at(1, 64, 1, FullBlockId::new(1, 0));
    assert!(session.block_changes().is_err());
    assert!(session.tile_changes().is_err());
}

#[test]
fn test_tile_replacement_leaves_single_tile() {
    let world = loaded_world(1);
    let mut session = FillSession::new(&world, FillSessionOptions::default());
    let pos = BlockPos::new(4, 64, 4);

    session.set_block_and_tile_at(4, 64, 4, FullBlockId::new(54, 2), Some(chest_tile(pos)));

    let mut nbt = NbtCompound::new();
    nbt.insert("id", "Furnace".to_string());
    session.set_block_and_tile_at(4, 64, 4, FullBlockId::new(61, 0), Some(Tile::new(pos, nbt)));

    let chunk = world.chunk(0, 0).unwrap();
    let chunk = chunk.borrow();
    assert_eq!(chunk.tile_count(), 1);
    let tile = chunk.tile(4, 64, 4).unwrap();
    assert_eq!(tile.nbt().get::<_, &str>("id").unwrap(), "Furnace");
}

#[test]
fn test_tile_removed_when_replaced_with_none() {
    let world = loaded_world(1);
    let mut session = FillSession::new(&world, FillSessionOptions::default());
    let pos = BlockPos::new(9, 80, 2);

    session.set_block_and_tile_at(9, 80, 2, FullBlockId::new(54, 0), Some(chest_tile(pos)));
    session.set_block_and_tile_at(9, 80, 2, FullBlockId::new(20, 0), None);

    let (id, tile) = session.get_block_and_tile_at(9, 80, 2).unwrap();
    assert_eq!(id, FullBlockId::new(20, 0));
    assert!(tile.is_none());
    assert_eq!(world.chunk(0, 0).unwrap().borrow().tile_count(), 0);
}

#[test]
fn test_get_block_and_tile_returns_detached_copy() {
    let world = loaded_world(1);
    let mut session = FillSession::new(&world, FillSessionOptions::default());
    let pos = BlockPos::new(1, 64, 1);

    session.set_block_and_tile_at(1, 64, 1, FullBlockId::new(54, 0), Some(chest_tile(pos)));

    let (_, tile) = session.get_block_and_tile_at(1, 64, 1).unwrap();
    let mut tile = tile.unwrap();
    tile.nbt_mut().insert("Items", 99i32);

    // Mutating the copy must not touch the stored tile
    let chunk = world.chunk(0, 0).unwrap();
    let chunk = chunk.borrow();
    let stored = chunk.tile(1, 64, 1).unwrap();
    assert_eq!(stored.nbt().get::<_, i32>("Items").unwrap(), 3);
}

#[test]
fn test_biome_writes_count_but_do_not_track() {
    let world = loaded_world(1);
    let mut session = FillSession::new(&world, FillSessionOptions::default());

    session.set_biome_at(7, 11, 23);
    assert_eq!(session.blocks_changed(), 1);
    assert!(session.dimensions().is_none());
    assert_eq!(session.block_changes().unwrap().len(), 0);
    assert_eq!(world.chunk(0, 0).unwrap().borrow().biome(7, 11), 23);
}

#[test]
fn test_highest_block() {
    let world = loaded_world(1);
    let mut session = FillSession::new(&world, FillSessionOptions::default());

    session.set_block_at(3, 10, 3, FullBlockId::new(1, 0));
    assert_eq!(session.highest_block_at(3, 3), Some(11));

    // The first non-air block from the top decides: a torch above the stone
    // means "no solid surface"
    session.set_block_at(3, 20, 3, FullBlockId::new(50, 0));
    assert_eq!(session.highest_block_at(3, 3), None);

    // All-air column
    assert_eq!(session.highest_block_at(8, 8), None);
}

#[test]
fn test_load_chunks_materializes_rectangle() {
    let world = MemoryWorld::new();
    assert_eq!(world.chunk_count(), 0);

    let mut session = FillSession::new(&world, FillSessionOptions::default());
    session.set_dimensions(0, 47, 0, 15).load_chunks();
    assert_eq!(world.chunk_count(), 3);

    session.set_block_at(33, 64, 7, FullBlockId::new(1, 0));
    assert_eq!(session.blocks_changed(), 1);
}

struct RecordingViewer {
    refreshed: Vec<(i32, i32)>,
}

impl Viewer for RecordingViewer {
    fn refresh(&mut self, chunk_x: i32, chunk_z: i32) {
        self.refreshed.push((chunk_x, chunk_z));
    }
}

#[test]
fn test_reload_refreshes_viewers_of_touched_chunks() {
    let world = loaded_world(3);
    let viewer = Rc::new(RefCell::new(RecordingViewer { refreshed: vec![] }));
    world.add_viewer(0, 0, viewer.clone());
    world.add_viewer(1, 0, viewer.clone());
    world.add_viewer(2, 2, viewer.clone());

    let mut session = FillSession::new(&world, FillSessionOptions::default());
    session.set_block_at(2, 64, 2, FullBlockId::new(1, 0));
    session.set_block_at(20, 64, 2, FullBlockId::new(1, 0));
    session.reload_chunks();

    let viewer = viewer.borrow();
    let refreshed = &viewer.refreshed;
    assert!(refreshed.contains(&(0, 0)));
    assert!(refreshed.contains(&(1, 0)));
    // Chunk (2, 2) was never part of the edit
    assert!(!refreshed.contains(&(2, 2)));
}

#[test]
fn test_reload_without_bounds_is_a_no_op() {
    let world = loaded_world(2);
    let viewer = Rc::new(RefCell::new(RecordingViewer { refreshed: vec![] }));
    world.add_viewer(0, 0, viewer.clone());

    let mut session = FillSession::new(&world, FillSessionOptions::default());
    session.reload_chunks();
    assert!(viewer.borrow().refreshed.is_empty());
}

#[derive(Default)]
struct CollectingSink {
    debug: RefCell<Vec<String>>,
    notices: RefCell<Vec<String>>,
}

impl DiagnosticsSink for CollectingSink {
    fn debug(&self, message: &str) {
        self.debug.borrow_mut().push(message.to_string());
    }

    fn notice(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}

#[test]
fn test_diagnostics_report_missing_chunks_and_empty_reloads() {
    let world = loaded_world(1);
    let sink = CollectingSink::default();

    let mut session =
        FillSession::with_diagnostics(&world, FillSessionOptions::default(), &sink);
    session.reload_chunks();
    assert_eq!(sink.debug.borrow().len(), 1);
    assert!(sink.notices.borrow().is_empty());

    // A write into a missing chunk is skipped, then surfaced once at reload
    session.set_block_at(100, 64, 100, FullBlockId::new(1, 0));
    session.set_block_at(1, 64, 1, FullBlockId::new(1, 0));
    session.reload_chunks();
    assert_eq!(sink.notices.borrow().len(), 1);
}

#[test]
fn test_only_touched_sub_chunks_materialize() {
    let world = loaded_world(1);
    let mut session = FillSession::new(&world, FillSessionOptions::default());

    session.set_block_at(8, 200, 8, FullBlockId::new(1, 0));
    session.set_block_at(9, 201, 9, FullBlockId::new(1, 0));
    session.close();

    let chunk = world.chunk(0, 0).unwrap();
    assert_eq!(chunk.borrow().materialized_sub_chunks(), 1);
}
