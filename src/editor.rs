use crate::error::Result;
use crate::history::EditAction;
use crate::pattern::FillPattern;
use crate::position::{BlockPos, WORLD_MAX_Y, WORLD_MIN_Y};
use crate::session::{FillSession, FillSessionOptions};
use crate::world::WorldHandle;
use rand::Rng;

/// Outcome of a bulk fill: the captured undo action (when change tracking
/// was on) and the number of blocks written.
#[derive(Debug)]
pub struct FillReport {
    pub action: Option<EditAction>,
    pub blocks_changed: u32,
}

/// Fill an axis-aligned cuboid with blocks drawn from a pattern.
///
/// Corner order does not matter; y is clamped to the world range. Chunks in
/// the covered rectangle are loaded up front, written through one session,
/// and re-committed with viewer refresh afterwards. The returned action is
/// ready for [`crate::EditHistory::record_undo`].
pub fn fill_cuboid<W, R>(
    world: &W,
    corner_a: BlockPos,
    corner_b: BlockPos,
    pattern: &FillPattern,
    rng: &mut R,
    options: FillSessionOptions,
) -> Result<FillReport>
where
    W: WorldHandle,
    R: Rng,
{
    let min_x = corner_a.x.min(corner_b.x);
    let max_x = corner_a.x.max(corner_b.x);
    let min_z = corner_a.z.min(corner_b.z);
    let max_z = corner_a.z.max(corner_b.z);
    let min_y = corner_a.y.min(corner_b.y).max(WORLD_MIN_Y);
    let max_y = corner_a.y.max(corner_b.y).min(WORLD_MAX_Y);

    let save_changes = options.save_changes;
    let mut session = FillSession::new(world, options);
    session.set_dimensions(min_x, max_x, min_z, max_z).load_chunks();

    for y in min_y..=max_y {
        for z in min_z..=max_z {
            for x in min_x..=max_x {
                session.set_block_at(x, y, z, pattern.next_block(rng));
            }
        }
    }

    session.reload_chunks();

    let blocks_changed = session.blocks_changed();
    let action = if save_changes {
        Some(session.into_action()?)
    } else {
        None
    };
    Ok(FillReport {
        action,
        blocks_changed,
    })
}
