/// Error type for editing operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("block changes were not tracked by this session")]
    ChangesNotTracked,
    #[error("tile changes were not tracked by this session")]
    TileChangesNotTracked,
    #[error("NBT error: {0}")]
    Nbt(#[from] quartz_nbt::io::NbtIoError),
    #[error("unknown block: {0}")]
    UnknownBlock(String),
    #[error("invalid fill pattern: {0}")]
    InvalidPattern(String),
}

pub type Result<T> = std::result::Result<T, Error>;
