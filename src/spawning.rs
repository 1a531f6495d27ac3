//! Descriptors for the objects the game places besides carved tiles.

use crate::components::Tag;
use crate::constants::{PLAYER_Z, SKELETON_Z};
use crate::geometry::Rect;
use crate::room::RoomId;
use crate::scene::{Behavior, ObjectDescriptor};

/// The knight. Blocks movement so enemies stop next to it rather than on it.
pub fn player(x: i32, y: i32, grid_size: i32) -> ObjectDescriptor {
    ObjectDescriptor::new(x, y, grid_size, grid_size)
        .with_z(PLAYER_Z)
        .with_tags(&[Tag::Player])
        .with_behavior(Behavior::Player)
        .blocking()
}

pub fn skeleton(x: i32, y: i32, grid_size: i32, movement_delay_ticks: u32) -> ObjectDescriptor {
    ObjectDescriptor::new(x, y, grid_size, grid_size)
        .with_z(SKELETON_Z)
        .with_tags(&[Tag::Enemy, Tag::Skeleton, Tag::Brick])
        .with_behavior(Behavior::Chase { movement_delay_ticks })
        .blocking()
}

/// The structure object that stands for a committed room in the scene
pub fn structure(room: RoomId, rect: &Rect) -> ObjectDescriptor {
    ObjectDescriptor::new(rect.x, rect.y, rect.width, rect.height)
        .with_tags(&[Tag::Structure, Tag::Room])
        .in_room(room)
}
