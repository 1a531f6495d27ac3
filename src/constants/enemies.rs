//! Enemy constants.

/// Ticks a skeleton waits between deciding on a step and taking it (1s at 60 fps)
pub const SKELETON_MOVEMENT_DELAY_TICKS: u32 = 60;
/// Draw order of skeletons
pub const SKELETON_Z: i32 = 1;
/// Cell of the root room where the first skeleton wakes once the dungeon is carved
pub const SKELETON_START_CELL: i32 = 4;
