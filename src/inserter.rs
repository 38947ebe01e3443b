use crate::error::Result;
use crate::history::EditAction;
use crate::session::{FillSession, FillSessionOptions};
use crate::tile::Tile;
use crate::world::WorldHandle;

/// Result of replaying an action: the opposite action (what the replay
/// overwrote) and how many blocks it changed.
#[derive(Debug)]
pub struct InsertOutcome {
    pub reverse: EditAction,
    pub blocks_changed: u32,
}

/// Replays a captured action against the world, restoring every recorded
/// coordinate to its recorded state.
///
/// The replay runs through a change-tracking [`FillSession`], so the states
/// it overwrites become the opposite action: inserting an undo action yields
/// the matching redo action, and vice versa.
pub struct Inserter<'a> {
    action: &'a EditAction,
}

impl<'a> Inserter<'a> {
    pub fn new(action: &'a EditAction) -> Self {
        Inserter { action }
    }

    pub fn insert<W: WorldHandle>(&self, world: &W) -> Result<InsertOutcome> {
        let mut session = FillSession::new(world, FillSessionOptions::default());

        if let Some((min_x, max_x, min_z, max_z)) = self.entry_bounds() {
            session.set_dimensions(min_x, max_x, min_z, max_z).load_chunks();
        }

        // Entries replay in their original insertion order; should a
        // duplicate coordinate ever appear, the later entry wins.
        for (pos, id) in self.action.blocks().iter() {
            let tile = match self.action.tiles().get(pos) {
                Some(payload) => Some(Tile::deserialize(pos, payload)?),
                None => None,
            };
            session.set_block_and_tile_at(pos.x, pos.y, pos.z, id, tile);
        }

        session.reload_chunks();

        let blocks_changed = session.blocks_changed();
        let reverse = session.into_action()?;
        Ok(InsertOutcome {
            reverse,
            blocks_changed,
        })
    }

    fn entry_bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let mut entries = self.action.blocks().iter();
        let (first, _) = entries.next()?;
        let mut bounds = (first.x, first.x, first.z, first.z);
        for (pos, _) in entries {
            bounds.0 = bounds.0.min(pos.x);
            bounds.1 = bounds.1.max(pos.x);
            bounds.2 = bounds.2.min(pos.z);
            bounds.3 = bounds.3.max(pos.z);
        }
        Some(bounds)
    }
}
