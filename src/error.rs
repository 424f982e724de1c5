use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not locate a data directory")]
    NoDataDir,

    #[error("unknown mode `{0}` (expected normal, sound-only, light-only or free-board)")]
    UnknownMode(String),

    #[error("unknown tile {0} (expected 1-4)")]
    UnknownTile(u8),

    #[error("logging setup failed: {0}")]
    Logging(String),
}
