use crate::block_id::FullBlockId;
use crate::error::{Error, Result};
use crate::registry::BlockRegistry;
use rand::Rng;

/// Source of blocks for a fill: a single id or a weighted random mix.
///
/// Parsed from user input such as `"stone"`, `"stone:2"` or
/// `"50%stone,50%dirt"`; bare entries weigh 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillPattern {
    entries: Vec<(u32, FullBlockId)>,
    total_weight: u32,
}

impl FillPattern {
    pub fn single(id: FullBlockId) -> Self {
        FillPattern {
            entries: vec![(1, id)],
            total_weight: 1,
        }
    }

    pub fn mix(entries: Vec<(u32, FullBlockId)>) -> Result<Self> {
        let total_weight: u32 = entries.iter().map(|(weight, _)| weight).sum();
        if total_weight == 0 {
            return Err(Error::InvalidPattern(
                "pattern needs at least one weighted entry".to_string(),
            ));
        }
        Ok(FillPattern {
            entries,
            total_weight,
        })
    }

    /// Parse a comma-separated pattern against a registry. Each entry is
    /// `[weight%]name_or_id[:meta]`.
    pub fn parse(input: &str, registry: &BlockRegistry) -> Result<Self> {
        let mut entries = Vec::new();
        for raw in input.split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }

            let (weight, block) = match raw.split_once('%') {
                Some((weight, block)) => {
                    let weight: u32 = weight.trim().parse().map_err(|_| {
                        Error::InvalidPattern(format!("bad weight in entry '{}'", raw))
                    })?;
                    (weight, block.trim())
                }
                None => (1, raw),
            };

            let (name, meta) = match block.split_once(':') {
                Some((name, meta)) if meta.chars().all(|c| c.is_ascii_digit()) => {
                    let meta: u32 = meta.parse().map_err(|_| {
                        Error::InvalidPattern(format!("bad metadata in entry '{}'", raw))
                    })?;
                    (name, meta)
                }
                // A non-numeric suffix is part of a namespaced name
                _ => (block, 0),
            };

            let type_id = match registry.find(name) {
                Some(id) => id,
                None => name
                    .parse()
                    .map_err(|_| Error::UnknownBlock(name.to_string()))?,
            };
            entries.push((weight, FullBlockId::new(type_id, meta)));
        }

        FillPattern::mix(entries)
    }

    /// Draw the next block to place.
    pub fn next_block<R: Rng>(&self, rng: &mut R) -> FullBlockId {
        if self.entries.len() == 1 {
            return self.entries[0].1;
        }

        let mut roll = rng.gen_range(0..self.total_weight);
        for &(weight, id) in &self.entries {
            if roll < weight {
                return id;
            }
            roll -= weight;
        }
        self.entries[self.entries.len() - 1].1
    }

    pub fn is_single(&self) -> bool {
        self.entries.len() == 1
    }
}
