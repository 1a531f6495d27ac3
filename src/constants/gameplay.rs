//! Core gameplay constants (player placement, tick rate, draw order).

/// Player spawn cell, relative to the root room's top-left corner
pub const PLAYER_START_CELL: i32 = 7;
/// Draw order of the player
pub const PLAYER_Z: i32 = 2;
/// Draw order of wall and trap tiles
pub const WALL_Z: i32 = 10;
/// Draw order of floor tiles
pub const FLOOR_Z: i32 = 0;
/// Nominal tick rate of the simulation
pub const DEFAULT_FPS: u32 = 60;
