//! Dungeon generation constants.

/// Edge length of one grid cell in world units
pub const GRID_SIZE: i32 = 32;
/// Number of rooms a generation run grows to
pub const DUNGEON_TARGET_ROOMS: usize = 12;
/// Minimum room edge in cells
pub const DUNGEON_MIN_ROOM_CELLS: i32 = 10;
/// Maximum room edge in cells
pub const DUNGEON_MAX_ROOM_CELLS: i32 = 20;
/// Edge of the square root room in cells
pub const DUNGEON_ROOT_ROOM_CELLS: i32 = 15;
/// Width of an exit opening in cells
pub const EXIT_WIDTH: i32 = 2;
/// Minimum span two neighbouring rooms share: the exit plus one corner cell per side
pub const MIN_SHARED_SPAN: i32 = EXIT_WIDTH + 2;
/// Smallest room edge that still fits an exit between its corners
pub const MIN_CARVABLE_CELLS: i32 = MIN_SHARED_SPAN;
