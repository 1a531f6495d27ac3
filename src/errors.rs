//! Error types for carving and configuration.

use std::path::PathBuf;
use thiserror::Error;

use crate::room::{Direction, RoomId};

/// Carving failures. Any of these aborts the whole generation run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarveError {
    #[error("exit at offset {offset} on the {side:?} side of room {room} does not fit a {len}-cell edge")]
    ExitOutOfBounds {
        room: RoomId,
        side: Direction,
        offset: i32,
        len: i32,
    },

    #[error("room {room} is {width}x{height} world units, not a whole number of {cell_size}-unit cells")]
    MisalignedRoom {
        room: RoomId,
        width: i32,
        height: i32,
        cell_size: i32,
    },
}

/// Configuration loading and validation failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}
