use crate::error::Result;
use crate::position::BlockPos;
use quartz_nbt::io::Flavor;
use quartz_nbt::NbtCompound;
use std::io::Cursor;

/// A metadata object attached to a single block (a chest inventory, a sign's
/// text, ...). Tiles are owned values: attaching one to a chunk moves it into
/// the chunk's tile map, detaching removes and returns it. A coordinate can
/// therefore never hold two live tiles, and a detached tile cannot be closed
/// twice.
#[derive(Debug, Clone)]
pub struct Tile {
    pos: BlockPos,
    nbt: NbtCompound,
}

impl Tile {
    pub fn new(pos: BlockPos, nbt: NbtCompound) -> Self {
        Tile { pos, nbt }
    }

    #[inline]
    pub fn pos(&self) -> BlockPos {
        self.pos
    }

    pub fn nbt(&self) -> &NbtCompound {
        &self.nbt
    }

    pub fn nbt_mut(&mut self) -> &mut NbtCompound {
        &mut self.nbt
    }

    /// Serialize the NBT payload to a detached byte blob.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        quartz_nbt::io::write_nbt(&mut buf, None, &self.nbt, Flavor::Uncompressed)?;
        Ok(buf)
    }

    /// Rebuild a tile from a blob produced by [`Tile::serialize`].
    pub fn deserialize(pos: BlockPos, data: &[u8]) -> Result<Self> {
        let (nbt, _) = quartz_nbt::io::read_nbt(&mut Cursor::new(data), Flavor::Uncompressed)?;
        Ok(Tile { pos, nbt })
    }
}

#[cfg(test)]
mod tests {
    use super::Tile;
    use crate::position::BlockPos;
    use quartz_nbt::NbtCompound;

    #[test]
    fn test_serialize_round_trip() {
        let mut nbt = NbtCompound::new();
        nbt.insert("id", "Chest".to_string());
        nbt.insert("Count", 27i32);

        let tile = Tile::new(BlockPos::new(4, 70, -3), nbt);
        let bytes = tile.serialize().unwrap();

        let back = Tile::deserialize(tile.pos(), &bytes).unwrap();
        assert_eq!(back.pos(), tile.pos());
        assert_eq!(back.nbt().get::<_, &str>("id").unwrap(), "Chest");
        assert_eq!(back.nbt().get::<_, i32>("Count").unwrap(), 27);
    }
}
