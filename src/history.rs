use crate::changes::{BlockChangeSet, TileChangeSet};

/// One reversible edit: the pre-edit block states and tile payloads captured
/// by a session. Immutable once pushed onto a history stack; consuming it
/// (by replaying) frees it.
#[derive(Debug, Default)]
pub struct EditAction {
    blocks: BlockChangeSet,
    tiles: TileChangeSet,
}

impl EditAction {
    pub fn new(blocks: BlockChangeSet, tiles: TileChangeSet) -> Self {
        EditAction { blocks, tiles }
    }

    pub fn blocks(&self) -> &BlockChangeSet {
        &self.blocks
    }

    pub fn tiles(&self) -> &TileChangeSet {
        &self.tiles
    }

    /// Number of recorded block entries.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Per-editing-context undo/redo stacks.
///
/// A fresh edit invalidates the redo history; replaying an undo does not
/// (its counterpart is pushed with [`EditHistory::restore_undo`]).
#[derive(Debug, Default)]
pub struct EditHistory {
    undo: Vec<EditAction>,
    redo: Vec<EditAction>,
}

impl EditHistory {
    pub fn new() -> Self {
        EditHistory::default()
    }

    /// Record the undo action of a new edit. Clears the redo stack.
    pub fn record_undo(&mut self, action: EditAction) {
        self.undo.push(action);
        self.redo.clear();
    }

    /// Push an undo action produced by replaying a redo. Keeps the redo
    /// stack intact.
    pub fn restore_undo(&mut self, action: EditAction) {
        self.undo.push(action);
    }

    pub fn save_redo(&mut self, action: EditAction) {
        self.redo.push(action);
    }

    /// Pop the most recent undo action. `None` means nothing to undo, which
    /// is a normal outcome.
    pub fn next_undo_action(&mut self) -> Option<EditAction> {
        self.undo.pop()
    }

    pub fn next_redo_action(&mut self) -> Option<EditAction> {
        self.redo.pop()
    }

    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }
}
