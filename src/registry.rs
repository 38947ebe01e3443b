use crate::world::BlockClassifier;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Material facts for one block type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockInfo {
    pub name: SmolStr,
    pub solid: bool,
}

/// Maps numeric block type ids to names and material classification.
///
/// The registry is owned by the host (typically the world) and passed by
/// reference wherever classification is needed; there is no process-wide
/// instance.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    blocks: FxHashMap<u32, BlockInfo>,
    by_name: FxHashMap<SmolStr, u32>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        BlockRegistry::default()
    }

    /// A registry covering the common vanilla ids used by tests and demos.
    pub fn with_defaults() -> Self {
        let mut registry = BlockRegistry::new();
        for &(id, name, solid) in &[
            (0, "air", false),
            (1, "stone", true),
            (2, "grass", true),
            (3, "dirt", true),
            (4, "cobblestone", true),
            (5, "planks", true),
            (6, "sapling", false),
            (7, "bedrock", true),
            (8, "flowing_water", false),
            (9, "water", false),
            (10, "flowing_lava", false),
            (11, "lava", false),
            (12, "sand", true),
            (13, "gravel", true),
            (17, "log", true),
            (18, "leaves", true),
            (20, "glass", true),
            (24, "sandstone", true),
            (35, "wool", true),
            (45, "bricks", true),
            (46, "tnt", true),
            (49, "obsidian", true),
            (50, "torch", false),
            (54, "chest", true),
            (63, "sign", false),
        ] {
            registry.register(id, name, solid);
        }
        registry
    }

    pub fn register(&mut self, type_id: u32, name: impl Into<SmolStr>, solid: bool) {
        let name = name.into();
        self.by_name.insert(name.clone(), type_id);
        self.blocks.insert(type_id, BlockInfo { name, solid });
    }

    pub fn info(&self, type_id: u32) -> Option<&BlockInfo> {
        self.blocks.get(&type_id)
    }

    /// Look up a type id by name. An optional `minecraft:` namespace prefix
    /// is accepted and ignored.
    pub fn find(&self, name: &str) -> Option<u32> {
        let name = name.strip_prefix("minecraft:").unwrap_or(name);
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl BlockClassifier for BlockRegistry {
    fn is_solid(&self, type_id: u32, _meta: u32) -> bool {
        self.blocks.get(&type_id).is_some_and(|info| info.solid)
    }
}
