use crate::block_id::FullBlockId;
use crate::changes::{BlockChangeSet, TileChangeSet};
use crate::cursor::SubChunkCursor;
use crate::diagnostics::{DiagnosticsSink, LogSink};
use crate::error::{Error, Result};
use crate::history::EditAction;
use crate::position::{BlockPos, WORLD_MAX_Y, WORLD_MIN_Y};
use crate::tile::Tile;
use crate::world::{BlockClassifier, SharedChunk, WorldHandle};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

fn default_true() -> bool {
    true
}

/// Construction options for a [`FillSession`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillSessionOptions {
    /// Track the XZ bounding box of touched coordinates.
    #[serde(default = "default_true")]
    pub calculate_dimensions: bool,
    /// Capture pre-edit block states for undo.
    #[serde(default = "default_true")]
    pub save_changes: bool,
    /// Capture pre-edit tile payloads as well. Only meaningful together with
    /// `save_changes`.
    #[serde(default = "default_true")]
    pub save_tile_changes: bool,
}

impl Default for FillSessionOptions {
    fn default() -> Self {
        FillSessionOptions {
            calculate_dimensions: true,
            save_changes: true,
            save_tile_changes: true,
        }
    }
}

impl FillSessionOptions {
    pub fn with_calculate_dimensions(mut self, value: bool) -> Self {
        self.calculate_dimensions = value;
        self
    }

    pub fn with_save_changes(mut self, value: bool) -> Self {
        self.save_changes = value;
        self
    }

    pub fn with_save_tile_changes(mut self, value: bool) -> Self {
        self.save_tile_changes = value;
        self
    }
}

/// Minimal XZ bounding box of the coordinates a session has touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XzBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl XzBounds {
    fn point(x: i32, z: i32) -> Self {
        XzBounds {
            min_x: x,
            max_x: x,
            min_z: z,
            max_z: z,
        }
    }

    fn widen(&mut self, x: i32, z: i32) {
        if x < self.min_x {
            self.min_x = x;
        }
        if x > self.max_x {
            self.max_x = x;
        }
        if z < self.min_z {
            self.min_z = z;
        }
        if z > self.max_z {
            self.max_z = z;
        }
    }

    /// The covered rectangle in chunk coordinates:
    /// (min_x, max_x, min_z, max_z), all inclusive.
    pub fn chunk_range(&self) -> (i32, i32, i32, i32) {
        (
            self.min_x >> 4,
            self.max_x >> 4,
            self.min_z >> 4,
            self.max_z >> 4,
        )
    }
}

/// Bulk read/write facade over a region of the voxel grid.
///
/// A session is created per logical operation (fill, paste, undo replay),
/// driven to completion on one thread, and discarded. It owns a
/// [`SubChunkCursor`] for addressing, optionally captures pre-edit state for
/// undo, and tracks the minimal chunk rectangle to reload afterwards.
///
/// Operations that reach an unresolvable coordinate (chunk not resident,
/// y outside the world) skip it silently; bulk edits are expected to
/// tolerate partially unloaded regions.
pub struct FillSession<'w, W: WorldHandle> {
    world: &'w W,
    cursor: SubChunkCursor<'w, W>,
    options: FillSessionOptions,
    block_changes: Option<BlockChangeSet>,
    tile_changes: Option<TileChangeSet>,
    bounds: Option<XzBounds>,
    blocks_changed: u32,
    chunk_miss: bool,
    diagnostics: &'w dyn DiagnosticsSink,
}

impl<'w, W: WorldHandle> FillSession<'w, W> {
    pub fn new(world: &'w W, options: FillSessionOptions) -> Self {
        FillSession::with_diagnostics(world, options, &LogSink)
    }

    pub fn with_diagnostics(
        world: &'w W,
        options: FillSessionOptions,
        diagnostics: &'w dyn DiagnosticsSink,
    ) -> Self {
        let block_changes = options.save_changes.then(BlockChangeSet::new);
        let tile_changes = (options.save_changes && options.save_tile_changes)
            .then(TileChangeSet::new);
        FillSession {
            world,
            cursor: SubChunkCursor::new(world),
            options,
            block_changes,
            tile_changes,
            bounds: None,
            blocks_changed: 0,
            chunk_miss: false,
            diagnostics,
        }
    }

    /// Preset the bounding box (block coordinates, not chunk ones) so
    /// [`FillSession::load_chunks`] can run before the first write.
    pub fn set_dimensions(&mut self, min_x: i32, max_x: i32, min_z: i32, max_z: i32) -> &mut Self {
        self.bounds = Some(XzBounds {
            min_x,
            max_x,
            min_z,
            max_z,
        });
        self
    }

    /// Write a full block id. Records the pre-image first when change
    /// tracking is on.
    pub fn set_block_at(&mut self, x: i32, y: i32, z: i32, id: FullBlockId) {
        if !self.move_to(x, y, z) {
            return;
        }
        let Some((chunk, sub_index)) = self.current_cell() else {
            return;
        };

        let pos = BlockPos::new(x, y, z);
        self.record_pre_image(pos, &chunk, sub_index);

        chunk
            .borrow_mut()
            .sub_chunk_mut(sub_index)
            .set_full_block(pos.local_x(), pos.local_y(), pos.local_z(), id);
        self.blocks_changed += 1;
    }

    /// Pure read; no recording, no changed-count.
    pub fn get_block_at(&mut self, x: i32, y: i32, z: i32) -> Option<FullBlockId> {
        if !self.move_to(x, y, z) {
            return None;
        }
        let (chunk, sub_index) = self.current_cell()?;

        let pos = BlockPos::new(x, y, z);
        let id = chunk.borrow().sub_chunk(sub_index).map_or(FullBlockId::AIR, |sub| {
            sub.get_full_block(pos.local_x(), pos.local_y(), pos.local_z())
        });
        Some(id)
    }

    /// Write a block and replace its attached tile. Any tile already at the
    /// coordinate is detached and dropped before the new one (if any) is
    /// attached, so a coordinate never holds two live tiles.
    pub fn set_block_and_tile_at(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        id: FullBlockId,
        tile: Option<Tile>,
    ) {
        if !self.move_to(x, y, z) {
            return;
        }
        let Some((chunk, sub_index)) = self.current_cell() else {
            return;
        };

        let pos = BlockPos::new(x, y, z);
        self.record_pre_image(pos, &chunk, sub_index);

        let mut chunk = chunk.borrow_mut();
        chunk
            .sub_chunk_mut(sub_index)
            .set_full_block(pos.local_x(), pos.local_y(), pos.local_z(), id);

        chunk.remove_tile(pos.local_x(), pos.y, pos.local_z());
        if let Some(tile) = tile {
            chunk.add_tile(tile);
        }

        self.blocks_changed += 1;
    }

    /// Pure read of a block together with a detached copy of its tile.
    pub fn get_block_and_tile_at(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
    ) -> Option<(FullBlockId, Option<Tile>)> {
        if !self.move_to(x, y, z) {
            return None;
        }
        let (chunk, sub_index) = self.current_cell()?;

        let pos = BlockPos::new(x, y, z);
        let chunk = chunk.borrow();
        let id = chunk.sub_chunk(sub_index).map_or(FullBlockId::AIR, |sub| {
            sub.get_full_block(pos.local_x(), pos.local_y(), pos.local_z())
        });
        let tile = chunk.tile(pos.local_x(), pos.y, pos.local_z()).cloned();
        Some((id, tile))
    }

    /// Write a column biome id. Counts as a change but never participates in
    /// change recording or bounds tracking.
    pub fn set_biome_at(&mut self, x: i32, z: i32, id: u8) {
        if !self.cursor.move_to(x, 0, z).is_valid() {
            return;
        }
        let Some(chunk) = self.cursor.chunk() else {
            return;
        };
        let pos = BlockPos::new(x, 0, z);
        chunk.borrow_mut().set_biome(pos.local_x(), pos.local_z(), id);
        self.blocks_changed += 1;
    }

    /// Y coordinate directly above the topmost block of the column, if that
    /// block is solid. Scans from the top of the world range downward; the
    /// first non-air block decides. Bypasses bounds tracking and recording.
    pub fn highest_block_at(&mut self, x: i32, z: i32) -> Option<i32>
    where
        W: BlockClassifier,
    {
        for y in (WORLD_MIN_Y..=WORLD_MAX_Y).rev() {
            if !self.cursor.move_to(x, y, z).is_valid() {
                continue;
            }
            let Some(chunk) = self.cursor.chunk() else {
                continue;
            };
            let pos = BlockPos::new(x, y, z);
            let id = chunk.borrow().get_full_block(pos.local_x(), y, pos.local_z());
            if !id.is_air() {
                if self.world.is_solid(id.type_id(), id.meta()) {
                    return Some(y + 1);
                }
                return None;
            }
        }
        None
    }

    /// Ensure every chunk in the covered rectangle is resident, triggering a
    /// load for the missing ones. Must run before bulk edits that assume
    /// residency; moving the cursor never loads by itself.
    pub fn load_chunks(&mut self) -> &mut Self {
        let Some(bounds) = self.bounds else {
            self.diagnostics
                .debug("Requested to load chunks with no dimensions set");
            return self;
        };

        let (min_x, max_x, min_z, max_z) = bounds.chunk_range();
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                if self.world.chunk(x, z).is_none() {
                    self.world.load_chunk(x, z);
                }
            }
        }
        self
    }

    /// Re-commit every resident chunk in the covered rectangle and refresh
    /// its viewers. A no-op (with a debug note) when nothing was touched.
    pub fn reload_chunks(&mut self) {
        if self.chunk_miss {
            self.diagnostics.notice("Some chunks were not found");
        }

        let Some(bounds) = self.bounds else {
            self.diagnostics
                .debug("Requested to reload chunks for empty fill session");
            return;
        };

        let (min_x, max_x, min_z, max_z) = bounds.chunk_range();
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                let Some(chunk) = self.world.chunk(x, z) else {
                    continue;
                };
                self.world.commit_chunk(x, z, chunk);
                for viewer in self.world.viewers_of(x, z) {
                    viewer.borrow_mut().refresh(x, z);
                }
            }
        }
    }

    /// Captured block changes. Requesting them from a session constructed
    /// without change tracking is a caller-contract violation.
    pub fn block_changes(&self) -> Result<&BlockChangeSet> {
        self.block_changes.as_ref().ok_or(Error::ChangesNotTracked)
    }

    /// Captured tile changes, under the same contract as
    /// [`FillSession::block_changes`].
    pub fn tile_changes(&self) -> Result<&TileChangeSet> {
        self.tile_changes
            .as_ref()
            .ok_or(Error::TileChangesNotTracked)
    }

    /// Consume the session and hand its captured changes off as an undo
    /// action.
    pub fn into_action(mut self) -> Result<EditAction> {
        let blocks = self
            .block_changes
            .take()
            .ok_or(Error::ChangesNotTracked)?;
        let tiles = self.tile_changes.take().unwrap_or_default();
        Ok(EditAction::new(blocks, tiles))
    }

    pub fn blocks_changed(&self) -> u32 {
        self.blocks_changed
    }

    /// Tracked bounds; `None` means no coordinate was ever resolved.
    pub fn dimensions(&self) -> Option<XzBounds> {
        self.bounds
    }

    /// Release the cursor's chunk handle. Also runs on drop, so early exits
    /// cannot leave a chunk reference pinned.
    pub fn close(&mut self) {
        self.cursor.invalidate();
    }

    fn move_to(&mut self, x: i32, y: i32, z: i32) -> bool {
        if !self.cursor.move_to(x, y, z).is_valid() {
            self.chunk_miss = true;
            return false;
        }

        if self.options.calculate_dimensions {
            match self.bounds.as_mut() {
                Some(bounds) => bounds.widen(x, z),
                None => self.bounds = Some(XzBounds::point(x, z)),
            }
        }
        true
    }

    fn current_cell(&self) -> Option<(SharedChunk, usize)> {
        self.cursor
            .chunk()
            .map(|chunk| (Rc::clone(chunk), self.cursor.sub_chunk_index()))
    }

    /// Capture the pre-edit state of a coordinate. Must run strictly before
    /// the mutating write.
    fn record_pre_image(&mut self, pos: BlockPos, chunk: &SharedChunk, sub_index: usize) {
        let Some(block_changes) = self.block_changes.as_mut() else {
            return;
        };

        let chunk = chunk.borrow();
        let current = chunk.sub_chunk(sub_index).map_or(FullBlockId::AIR, |sub| {
            sub.get_full_block(pos.local_x(), pos.local_y(), pos.local_z())
        });
        if !block_changes.record(pos, current) {
            // First touch already captured
            return;
        }

        if let Some(tile_changes) = self.tile_changes.as_mut() {
            if let Some(tile) = chunk.tile(pos.local_x(), pos.y, pos.local_z()) {
                match tile.serialize() {
                    Ok(payload) => {
                        tile_changes.record(pos, payload);
                    }
                    Err(err) => self
                        .diagnostics
                        .notice(&format!("Could not serialize tile at {}: {}", pos, err)),
                }
            }
        }
    }
}

impl<W: WorldHandle> Drop for FillSession<'_, W> {
    fn drop(&mut self) {
        self.cursor.invalidate();
    }
}
